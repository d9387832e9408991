use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Trims a raw query; `None` when nothing searchable remains.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reduces a catalog identifier such as `/works/OL123W` to its bare key.
pub fn strip_identifier_prefix(identifier: &str) -> &str {
    identifier
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Formats a catalog timestamp as `Thu Oct 15 2009`.
pub fn format_created(timestamp: &str) -> Option<String> {
    let timestamp = timestamp.trim();

    let date = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .or_else(|_| NaiveDate::parse_from_str(timestamp, "%Y-%m-%d"))
        .ok()?;

    Some(date.format("%a %b %d %Y").to_string())
}
