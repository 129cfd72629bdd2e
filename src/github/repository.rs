// src/github/repository.rs
// =============================================================================
// The two shapes of a repository:
//
// - ApiRepository: what the GitHub REST API sends us (snake_case, lots of
//   nullable fields). We only declare the fields we use; serde ignores
//   the rest of the (very large) payload.
// - Repository: the local, display-ready shape the rest of the program
//   sees. Optional fields are always present, as `null` when empty, never
//   left out of the JSON.
// =============================================================================

use serde::{Deserialize, Serialize};

// One record from GET /users/{account}/repos
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub pushed_at: Option<String>,
    // Older API versions leave this out entirely
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

/// Normalized view of one public repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub homepage: Option<String>,
    pub stargazer_count: u64,
    pub language: Option<String>,
    /// ISO-8601 timestamp, or "" when GitHub didn't send one
    pub pushed_at: String,
    pub topics: Vec<String>,
}

impl From<ApiRepository> for Repository {
    fn from(api: ApiRepository) -> Self {
        Self {
            name: api.name,
            description: api.description,
            url: api.html_url,
            homepage: api.homepage,
            stargazer_count: api.stargazers_count,
            language: api.language,
            pushed_at: api.pushed_at.unwrap_or_default(),
            topics: api.topics.unwrap_or_default(),
        }
    }
}

// Distinct languages across `repos`, in the order they first appear
//
// Repositories without a language are ignored.
pub fn languages(repos: &[Repository]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        if !seen.iter().any(|l| l == language) {
            seen.push(language.to_string());
        }
    }
    seen
}

// Keeps repositories written in `language`; None keeps everything
pub fn filter_by_language(repos: Vec<Repository>, language: Option<&str>) -> Vec<Repository> {
    match language {
        None => repos,
        Some(wanted) => repos
            .into_iter()
            .filter(|r| r.language.as_deref() == Some(wanted))
            .collect(),
    }
}
