//! Human-readable formatting for durations, dates and percentages.

use chrono::{DateTime, NaiveDate, Utc};

/// Formats a downtime duration: `"45m"`, `"2h"`, `"3h 15m"`.
pub fn format_duration(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{}m", minutes.round() as i64);
    }
    let hours = (minutes / 60.0).floor() as i64;
    let rest = (minutes % 60.0).round() as i64;
    if rest > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{hours}h")
    }
}

/// `"Jan 1, 2024"`
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// `"Jan 1"`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `"03:00 AM UTC"`
pub fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%I:%M %p UTC").to_string()
}

/// Uptime label with two decimals at or above 99.99%, one otherwise.
pub fn format_uptime(pct: f64) -> String {
    let decimals = if pct >= 99.99 { 2 } else { 1 };
    format!("{pct:.decimals$}% uptime")
}
