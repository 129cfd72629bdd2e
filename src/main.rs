// src/main.rs
// =============================================================================
// This is the entry point of the portfolio content tool.
//
// What happens here:
// 1. Set up logging (stderr, level from RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print results as a table or JSON
// 5. Exit with a proper code (0 = success, 1 = post not found, 2 = error)
// =============================================================================

mod blog;      // src/blog/ - MDX posts: front matter, reading time, lookup
mod cli;       // src/cli.rs - command-line parsing
mod display;   // src/display.rs - date and text formatting for tables
mod github;    // src/github/ - public repository listing
mod logging;   // src/logging.rs - tracing subscriber setup
mod snapshot;  // src/snapshot.rs - freshness window for fetched data

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

#[tokio::main]
async fn main() {
    logging::init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = success
//   Ok(1) = requested post does not exist
//   Ok(2) = repositories could not be fetched
//   Err   = unexpected error (bad output, unusable config)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Posts { tag } => handle_posts(&cli.content_dir, tag.as_deref(), cli.json),
        Commands::Post { slug, html } => handle_post(&cli.content_dir, &slug, html, cli.json),
        Commands::Slugs => handle_slugs(&cli.content_dir, cli.json),
        Commands::Repos {
            account,
            language,
            token,
            api_base,
            cache_file,
            max_age_secs,
        } => {
            let request = RepoRequest {
                account,
                language,
                token,
                api_base,
                cache_file,
                max_age: Duration::from_secs(max_age_secs),
            };
            handle_repos(request, cli.json).await
        }
    }
}

// Handles the 'posts' subcommand
fn handle_posts(content_dir: &Path, tag: Option<&str>, json: bool) -> Result<i32> {
    tracing::info!(dir = %content_dir.display(), "Loading posts");

    let mut posts = blog::list_all(content_dir);
    if let Some(tag) = tag {
        posts = blog::filter_by_tag(posts, tag);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(0);
    }

    if posts.is_empty() {
        println!("No blog posts yet. Check back soon!");
        return Ok(0);
    }

    println!("{:<20} {:<40} {:<10} {:<30}", "DATE", "TITLE", "READ", "TAGS");
    println!("{}", "=".repeat(100));
    for post in &posts {
        println!(
            "{:<20} {:<40} {:<10} {:<30}",
            display::display_date(&post.date),
            display::truncate(&post.title, 38),
            format!("{} min", post.reading_time),
            post.tags.join(", "),
        );
    }
    println!();
    println!("📝 {} post(s)", posts.len());

    Ok(0)
}

// Handles the 'post' subcommand
fn handle_post(content_dir: &Path, slug: &str, html: bool, json: bool) -> Result<i32> {
    let Some(post) = blog::get_by_slug(content_dir, slug) else {
        eprintln!("Post not found: {}", slug);
        return Ok(1);
    };

    let body = if html {
        blog::render_html(&post.content)
    } else {
        post.content.clone()
    };

    if json {
        let mut value = serde_json::to_value(&post)?;
        if html {
            value["html"] = serde_json::Value::String(body);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(0);
    }

    println!("{}", post.title);
    println!(
        "{} · {} min read",
        display::display_date(&post.date),
        post.reading_time
    );
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    println!();
    println!("{}", body);

    Ok(0)
}

// Handles the 'slugs' subcommand
fn handle_slugs(content_dir: &Path, json: bool) -> Result<i32> {
    let slugs = blog::all_slugs(content_dir);

    if json {
        println!("{}", serde_json::to_string_pretty(&slugs)?);
    } else {
        for slug in &slugs {
            println!("{}", slug);
        }
    }

    Ok(0)
}

// Everything the 'repos' subcommand was asked to do
struct RepoRequest {
    account: String,
    language: Option<String>,
    token: Option<String>,
    api_base: Url,
    cache_file: Option<PathBuf>,
    max_age: Duration,
}

// Handles the 'repos' subcommand
//
// The fetcher reports only a generic failure; the real cause has already
// been logged by the time we get here.
async fn handle_repos(request: RepoRequest, json: bool) -> Result<i32> {
    let key = cache_key(&request.account, &request.api_base);
    let config = github::GithubConfig::new(request.api_base, request.token);
    let fetcher = github::RepoFetcher::new(&config).context("Failed to set up the GitHub client")?;

    tracing::info!(account = %request.account, "Listing public repositories");

    let result = snapshot::fresh_or_fetch(
        request.cache_file.as_deref(),
        &key,
        request.max_age,
        || fetcher.list_public_repos(&request.account),
    )
    .await;

    let repos = match result {
        Ok(repos) => repos,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(2);
        }
    };

    let languages = github::languages(&repos);
    let repos = github::filter_by_language(repos, request.language.as_deref());

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
        return Ok(0);
    }

    print_repo_table(&repos, &languages);
    Ok(0)
}

// Cached repositories are only reused for the same account on the same API
//
// Example: ("octocat", https://api.github.com/) -> "octocat@https://api.github.com/"
fn cache_key(account: &str, api_base: &Url) -> String {
    format!("{}@{}", account, api_base)
}

// Prints repositories as a human-readable table
fn print_repo_table(repos: &[github::Repository], languages: &[String]) {
    if repos.is_empty() {
        println!("No projects found for this filter.");
        return;
    }

    let now = Utc::now();

    println!(
        "{:<30} {:<8} {:<14} {:<16} {:<30}",
        "NAME", "STARS", "LANGUAGE", "UPDATED", "TOPICS"
    );
    println!("{}", "=".repeat(100));

    for repo in repos {
        println!(
            "{:<30} {:<8} {:<14} {:<16} {:<30}",
            display::truncate(&repo.name, 28),
            repo.stargazer_count,
            repo.language.as_deref().unwrap_or("-"),
            display::relative_age(&repo.pushed_at, now),
            display::topic_list(&repo.topics),
        );
        if let Some(description) = repo.description.as_deref() {
            println!("    {}", display::truncate(description, 90));
        }
    }

    println!();
    println!("📦 {} repositor{}", repos.len(), if repos.len() == 1 { "y" } else { "ies" });
    if !languages.is_empty() {
        println!("🔤 Languages: {}", languages.join(", "));
    }
}
