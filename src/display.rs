// src/display.rs
// =============================================================================
// Small formatting helpers for the human-readable tables.
//
// - display_date: "2024-01-02" -> "January 2, 2024"
// - relative_age: "2024-05-01T08:00:00Z" -> "3 days ago"
//
// Both fall back gracefully: a date we can't parse is shown as written,
// and a missing push timestamp is shown as "unknown".
// =============================================================================

use chrono::{DateTime, NaiveDate, Utc};

/// How many topics a project row shows before it gets noisy
pub const MAX_TOPICS_SHOWN: usize = 3;

// Formats a post date for humans
//
// Accepts plain dates ("2024-01-02") and full RFC 3339 timestamps.
pub fn display_date(date: &str) -> String {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.date_naive()));

    match parsed {
        Some(day) => day.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

// Describes how long ago `timestamp` was, relative to `now`
pub fn relative_age(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(timestamp) else {
        return "unknown".to_string();
    };

    let age = now.signed_duration_since(then.with_timezone(&Utc));
    if age.num_seconds() < 60 {
        return "just now".to_string();
    }

    let (amount, unit) = if age.num_minutes() < 60 {
        (age.num_minutes(), "minute")
    } else if age.num_hours() < 24 {
        (age.num_hours(), "hour")
    } else if age.num_days() < 30 {
        (age.num_days(), "day")
    } else if age.num_days() < 365 {
        (age.num_days() / 30, "month")
    } else {
        (age.num_days() / 365, "year")
    };

    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} ago")
}

// Joins at most MAX_TOPICS_SHOWN topics with commas
pub fn topic_list(topics: &[String]) -> String {
    topics
        .iter()
        .take(MAX_TOPICS_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// Shortens `text` to `width` characters, ending in "..." when cut
//
// Counts chars rather than bytes so multi-byte titles never split
// mid-character.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
