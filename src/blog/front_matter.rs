// src/blog/front_matter.rs
// =============================================================================
// This module separates a post's YAML front matter from its body.
//
// A post file looks like this:
//
//   ---
//   title: Hello
//   date: 2024-01-02
//   excerpt: First post
//   tags: [rust, notes]
//   ---
//   The body starts here...
//
// The block between the two `---` lines is parsed with `serde_yaml` into
// a `Metadata` struct. Everything after the closing line is the body.
// =============================================================================

use serde::Deserialize;
use thiserror::Error;

// The line that opens and closes a front matter block
const DELIMITER: &str = "---";

// Everything that can go wrong while reading a post's header
//
// The loader never shows these to its callers (a broken post is treated
// the same as a missing one), but they end up in the logs.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("document does not start with a front matter block")]
    Missing,

    #[error("front matter block is never closed")]
    Unterminated,

    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// The fields a post header must (or may) define
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub date: String,
    pub excerpt: String,
    /// `tags:` may be absent or explicitly null; both mean "no tags"
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

// Splits a document into (header, body)
//
// Returns borrowed slices of the input, so nothing is copied here.
// The body starts on the line right after the closing delimiter.
pub fn split(source: &str) -> Result<(&str, &str), FrontMatterError> {
    // Editors on Windows sometimes save a byte-order mark
    let source = source.trim_start_matches('\u{feff}');

    let after_open = source
        .strip_prefix(DELIMITER)
        .ok_or(FrontMatterError::Missing)?;

    // The rest of the opening line must be blank ("---   \n" is fine)
    let (opening_rest, rest) = after_open
        .split_once('\n')
        .ok_or(FrontMatterError::Unterminated)?;
    if !opening_rest.trim().is_empty() {
        return Err(FrontMatterError::Missing);
    }

    // Walk line by line, tracking the byte offset so we can slice afterwards
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((header, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

// Splits the document and deserializes its header
pub fn parse(source: &str) -> Result<(Metadata, &str), FrontMatterError> {
    let (header, body) = split(source)?;
    let metadata: Metadata = serde_yaml::from_str(header)?;
    Ok((metadata, body))
}
