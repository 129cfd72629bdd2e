// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is the "calling layer" for the two read-side components:
// - posts / post / slugs read the local blog content
// - repos lists public GitHub repositories (with an optional one-hour cache)
//
// Configuration is nothing more than these arguments. The GitHub token
// can also come from the GITHUB_TOKEN environment variable; clap reads it
// here so the fetcher itself never touches the environment.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// Account whose repositories `repos` lists when none is given
pub const DEFAULT_ACCOUNT: &str = "kpfister44";

/// Where posts live, relative to the working directory
pub const DEFAULT_CONTENT_DIR: &str = "content/blog";

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-content",
    version,
    about = "Loads portfolio blog posts and lists public GitHub repositories",
    long_about = "portfolio-content reads blog posts from a directory of MDX files (YAML front matter \
                  plus markdown body) and lists an account's public GitHub repositories. \
                  Output is a table by default, or JSON with --json."
)]
pub struct Cli {
    /// Directory containing the blog's .mdx files
    #[arg(long, global = true, default_value = DEFAULT_CONTENT_DIR)]
    pub content_dir: PathBuf,

    /// Output JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all posts, newest first
    ///
    /// Example: portfolio-content posts --tag rust
    Posts {
        /// Only show posts with this tag (case-insensitive)
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show a single post by slug
    ///
    /// Example: portfolio-content post hello-world --html
    Post {
        /// File name of the post without its .mdx extension
        slug: String,

        /// Print the body rendered as HTML instead of raw markdown
        #[arg(long)]
        html: bool,
    },

    /// Print every post slug, one per line
    Slugs,

    /// List an account's public GitHub repositories, most recently pushed first
    ///
    /// Example: portfolio-content repos octocat --language Rust
    Repos {
        /// GitHub account name
        #[arg(default_value = DEFAULT_ACCOUNT)]
        account: String,

        /// Only show repositories whose primary language matches exactly
        #[arg(long)]
        language: Option<String>,

        /// GitHub API token (raises the rate limit)
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Base URL of the GitHub REST API
        #[arg(long, default_value = crate::github::DEFAULT_API_BASE)]
        api_base: Url,

        /// Reuse results stored in this file while they are fresh
        #[arg(long)]
        cache_file: Option<PathBuf>,

        /// How long cached results stay fresh, in seconds
        #[arg(long, default_value_t = crate::snapshot::DEFAULT_MAX_AGE.as_secs())]
        max_age_secs: u64,
    },
}
