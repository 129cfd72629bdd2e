// src/github/mod.rs
// =============================================================================
// This module lists an account's public repositories through the GitHub
// REST API and normalizes them for display.
//
// Submodules:
// - fetch: the HTTP call, its transport trait, and the single FetchError
// - repository: the raw API record, the local Repository shape, and the
//   language filter used by the projects listing
// =============================================================================

mod fetch;
mod repository;

pub use fetch::{GithubConfig, RepoFetcher, DEFAULT_API_BASE};
pub use repository::{filter_by_language, languages, Repository};
