// src/blog/loader.rs
// =============================================================================
// This module loads blog posts from a directory of `.mdx` files.
//
// What it provides:
// - list_all:    every post, newest first
// - get_by_slug: one post, or None if it is missing or broken
// - all_slugs:   just the identifiers (used to pre-build per-post pages)
//
// Every call reads straight from disk. Nothing is cached between calls,
// so a post added while the program runs shows up on the next call.
//
// A missing directory is not an error: a site with no posts yet simply
// gets an empty list.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::front_matter;

/// File extension of post documents (without the dot)
pub const POST_EXTENSION: &str = "mdx";

/// Reading speed used for the "N min read" estimate
pub const WORDS_PER_MINUTE: usize = 250;

/// One published article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// File name without the extension; unique within the directory
    pub slug: String,
    pub title: String,
    /// Kept as written (ISO-like), so string order is date order
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    /// The markdown body, front matter removed
    pub content: String,
    pub reading_time: u32,
}

// Returns every post in `dir`, newest first
//
// Documents whose front matter can't be parsed are skipped (with a warning
// in the logs) instead of failing the whole listing.
pub fn list_all(dir: &Path) -> Vec<Post> {
    let mut posts: Vec<Post> = post_files(dir)
        .into_iter()
        .filter_map(|(slug, path)| match load_post(&slug, &path) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "Skipping unreadable post");
                None
            }
        })
        .collect();

    sort_newest_first(&mut posts);
    posts
}

// Loads exactly one post by its slug
//
// Returns None when:
// - the file doesn't exist
// - the file can't be read
// - the front matter is missing or malformed
// - the slug tries to escape the content directory
//
// The caller can't tell these apart. A broken post and a missing post
// both show up as "not found".
pub fn get_by_slug(dir: &Path, slug: &str) -> Option<Post> {
    if !is_valid_slug(slug) {
        tracing::debug!(slug, "Rejecting slug with path components");
        return None;
    }

    let path = dir.join(format!("{slug}.{POST_EXTENSION}"));
    match load_post(slug, &path) {
        Ok(post) => Some(post),
        Err(e) => {
            tracing::debug!(slug, error = %format!("{e:#}"), "Post not found");
            None
        }
    }
}

// Returns the slug of every post document in `dir`
//
// This doesn't open the files, so a broken post still has a slug here
// even though list_all would skip it.
pub fn all_slugs(dir: &Path) -> Vec<String> {
    post_files(dir).into_iter().map(|(slug, _)| slug).collect()
}

// Keeps only posts carrying `tag` (case-insensitive)
pub fn filter_by_tag(posts: Vec<Post>, tag: &str) -> Vec<Post> {
    let wanted = tag.to_lowercase();
    posts
        .into_iter()
        .filter(|post| post.tags.iter().any(|t| t.to_lowercase() == wanted))
        .collect()
}

// Estimates minutes needed to read `body`
//
// ceil(words / 250): 500 words -> 2 minutes, 501 words -> 3 minutes.
// An empty body reads in 0 minutes.
pub fn reading_time(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

// Builds a Post from a document's raw text
pub fn parse_post(slug: &str, source: &str) -> Result<Post, front_matter::FrontMatterError> {
    let (metadata, body) = front_matter::parse(source)?;

    Ok(Post {
        slug: slug.to_string(),
        title: metadata.title,
        date: metadata.date,
        excerpt: metadata.excerpt,
        tags: metadata.tags.unwrap_or_default(),
        reading_time: reading_time(body),
        content: body.to_string(),
    })
}

// Reads and parses one file
fn load_post(slug: &str, path: &Path) -> Result<Post> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let post = parse_post(slug, &source)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(post)
}

// Lists (slug, path) for every post document, sorted by slug
//
// Sorting here makes the final order stable when two posts share a date:
// read_dir order depends on the filesystem.
fn post_files(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "Content directory does not exist yet");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Could not read content directory");
            return Vec::new();
        }
    };

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let slug = slug_for(&path)?;
            Some((slug, path))
        })
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    tracing::debug!(dir = %dir.display(), count = files.len(), "Scanned content directory");
    files
}

// "hello-world.mdx" -> Some("hello-world"); anything else -> None
fn slug_for(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != POST_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    // Every listed slug must also be loadable by get_by_slug
    if !is_valid_slug(stem) {
        return None;
    }
    Some(stem.to_string())
}

// A slug is a bare file name: no separators, no "." or ".."
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

// Newest first; the sort is stable so equal dates keep slug order
fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why return Vec<Post> and not Result<Vec<Post>>?
//    - Missing content is normal for a personal site
//    - Callers would only ever turn the error into an empty list anyway
//
// 2. Why is the date a String?
//    - Dates are written as "2024-01-02", which sorts correctly as text
//    - Parsing is only needed for display (see display::display_date)
//
// 3. What does `{e:#}` do for anyhow errors?
//    - The alternate format prints the whole chain on one line:
//      "Failed to parse x.mdx: invalid front matter: missing field `title`"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, slug: &str, date: &str, body: &str) {
        let source = format!(
            "---\ntitle: Post {slug}\ndate: {date}\nexcerpt: About {slug}\n---\n{body}"
        );
        fs::write(dir.join(format!("{slug}.mdx")), source).unwrap();
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(&words(500)), 2);
        assert_eq!(reading_time(&words(501)), 3);
        assert_eq!(reading_time(&words(1)), 1);
        assert_eq!(reading_time(""), 0);
    }

    #[test]
    fn test_reading_time_counts_any_whitespace() {
        let body = "one\ttwo\n\nthree   four\r\nfive";
        assert_eq!(body.split_whitespace().count(), 5);
        assert_eq!(reading_time(body), 1);
    }

    #[test]
    fn test_reading_time_never_decreases_when_doubled() {
        for n in [0, 1, 124, 125, 249, 250, 251, 999, 1000] {
            assert!(reading_time(&words(n * 2)) >= reading_time(&words(n)));
        }
    }

    #[test]
    fn test_list_all_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(list_all(&missing).is_empty());
        assert!(all_slugs(&missing).is_empty());
    }

    #[test]
    fn test_list_all_sorted_newest_first() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "old", "2023-12-31", "old body");
        write_post(tmp.path(), "new", "2024-01-02", "new body");
        write_post(tmp.path(), "middle", "2024-01-01", "middle body");

        let posts = list_all(tmp.path());
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "middle", "old"]);

        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_list_all_one_item_per_document() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "a", "2024-01-01", "x");
        write_post(tmp.path(), "b", "2024-01-01", "y");
        fs::write(tmp.path().join("notes.txt"), "not a post").unwrap();

        let posts = list_all(tmp.path());
        assert_eq!(posts.len(), 2);
        // equal dates keep slug order
        assert_eq!(posts[0].slug, "a");
        assert_eq!(posts[1].slug, "b");
    }

    #[test]
    fn test_list_all_skips_malformed_posts() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "good", "2024-01-01", "fine");
        fs::write(tmp.path().join("broken.mdx"), "no front matter here").unwrap();

        let posts = list_all(tmp.path());
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");

        // The slug still exists even though the post can't be parsed
        assert_eq!(all_slugs(tmp.path()), vec!["broken", "good"]);
    }

    #[test]
    fn test_get_by_slug_parses_fields() {
        let tmp = TempDir::new().unwrap();
        let source = "---\ntitle: Hello\ndate: 2024-03-05\nexcerpt: Hi there\ntags: [rust, teaching]\n---\n# Heading\n\nSome words here.\n";
        fs::write(tmp.path().join("hello.mdx"), source).unwrap();

        let post = get_by_slug(tmp.path(), "hello").unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.date, "2024-03-05");
        assert_eq!(post.excerpt, "Hi there");
        assert_eq!(post.tags, vec!["rust", "teaching"]);
        assert_eq!(post.content, "# Heading\n\nSome words here.\n");
        assert_eq!(post.reading_time, 1);
    }

    #[test]
    fn test_get_by_slug_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(get_by_slug(tmp.path(), "missing-slug").is_none());
    }

    #[test]
    fn test_get_by_slug_malformed_is_none() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.mdx"), "---\ntitle: [unclosed\n---\n").unwrap();
        assert!(get_by_slug(tmp.path(), "bad").is_none());
    }

    #[test]
    fn test_get_by_slug_rejects_traversal() {
        let tmp = TempDir::new().unwrap();
        let inner = tmp.path().join("blog");
        fs::create_dir(&inner).unwrap();
        write_post(tmp.path(), "secret", "2024-01-01", "outside");

        assert!(get_by_slug(&inner, "../secret").is_none());
        assert!(get_by_slug(&inner, "..").is_none());
        assert!(get_by_slug(&inner, "").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_listed_slugs_are_all_loadable() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "plain", "2024-01-01", "ok");
        // Legal file name on Unix, but not a usable slug
        write_post(tmp.path(), "a\\b", "2024-01-02", "odd");

        let slugs = all_slugs(tmp.path());
        assert_eq!(slugs, vec!["plain"]);
        for slug in &slugs {
            assert!(get_by_slug(tmp.path(), slug).is_some());
        }

        let posts = list_all(tmp.path());
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "plain");
    }

    #[test]
    fn test_filter_by_tag_ignores_case() {
        let post = |slug: &str, tags: &[&str]| Post {
            slug: slug.to_string(),
            title: String::new(),
            date: String::new(),
            excerpt: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content: String::new(),
            reading_time: 0,
        };
        let posts = vec![post("a", &["Rust"]), post("b", &["web"]), post("c", &[])];

        let filtered = filter_by_tag(posts, "rust");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].slug, "a");
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = parse_post("x", "---\ntitle: T\ndate: 2024-01-01\nexcerpt: E\n---\nbody").unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["readingTime"], 1);
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
