// src/snapshot.rs
// =============================================================================
// Time-boxed reuse of fetched data (the "freshness window").
//
// The GitHub fetcher never caches anything itself. This module is the
// calling layer's policy on top of it:
//
// 1. If a cache file exists, holds a snapshot for the same key (account),
//    and is younger than the window (one hour by default), serve it.
// 2. Otherwise call the fetcher and write the new result to the cache.
//
// A missing, unreadable, or corrupt cache file just means "no snapshot".
// A failed fetch is returned as-is; we never fall back to stale data.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// How long fetched repository data stays valid
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Data plus when (and for whom) it was fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub key: String,
    pub fetched_at: DateTime<Utc>,
    pub data: T,
}

impl<T> Snapshot<T> {
    pub fn new(key: &str, fetched_at: DateTime<Utc>, data: T) -> Self {
        Self {
            key: key.to_string(),
            fetched_at,
            data,
        }
    }

    // True while `now - fetched_at` is inside [0, max_age)
    //
    // A snapshot stamped in the future (clock moved backwards) counts as
    // stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let age = now.signed_duration_since(self.fetched_at);
        let Ok(max_age) = chrono::Duration::from_std(max_age) else {
            // Larger than chrono can represent: effectively "forever"
            return age >= chrono::Duration::zero();
        };
        age >= chrono::Duration::zero() && age < max_age
    }
}

impl<T: DeserializeOwned> Snapshot<T> {
    // Reads a snapshot; None if the file is absent or can't be decoded
    pub fn load(path: &Path) -> Option<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No cached snapshot");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt snapshot");
                None
            }
        }
    }
}

impl<T: Serialize> Snapshot<T> {
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

// Serves a fresh cached snapshot for `key`, or runs `fetch` and caches it
//
// With `cache` set to None this is just `fetch().await`.
// A cache write failure is logged but doesn't fail the call: the data
// was fetched fine.
pub async fn fresh_or_fetch<T, E, F, Fut>(
    cache: Option<&Path>,
    key: &str,
    max_age: Duration,
    fetch: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let Some(path) = cache else {
        return fetch().await;
    };

    if let Some(snapshot) = Snapshot::<T>::load(path) {
        if snapshot.key == key && snapshot.is_fresh(Utc::now(), max_age) {
            tracing::info!(key, fetched_at = %snapshot.fetched_at, "Serving cached snapshot");
            return Ok(snapshot.data);
        }
        tracing::debug!(key, "Cached snapshot is stale or for another key");
    }

    let data = fetch().await?;

    let snapshot = Snapshot::new(key, Utc::now(), data);
    if let Err(e) = snapshot.save(path) {
        tracing::warn!(error = %format!("{e:#}"), "Could not write snapshot");
    }

    Ok(snapshot.data)
}
