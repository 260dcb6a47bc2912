//! Render helpers for comment panels.

use chrono::DateTime;

/// Deepest reply level that still offers a "Reply" action.
pub const MAX_REPLY_DEPTH: usize = 3;

/// Whether a comment rendered at `depth` (roots are 0) can be replied to.
pub fn can_reply_at(depth: usize) -> bool {
    depth < MAX_REPLY_DEPTH
}

/// Relative age of a comment, e.g. `"5 minutes ago"`.
///
/// Anything a week or older is shown as a `YYYY-MM-DD` date.
pub fn format_time_ago(created_at_ms: i64, now_ms: i64) -> String {
    let seconds = (now_ms - created_at_ms).max(0) / 1000;
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 7 {
        return plural(days, "day");
    }

    DateTime::from_timestamp_millis(created_at_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Up to two uppercase initials for an avatar fallback.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
