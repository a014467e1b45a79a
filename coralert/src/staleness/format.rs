//! Human-readable age labels.
//!
//! Both functions take whole minutes and use integer hour division, so
//! 119 minutes is "1 hours ago" / "1h".

/// Long form: `"now"`, `"N min ago"`, `"H hours ago"`.
pub fn age_formatted(minutes: u64) -> String {
    match minutes {
        0 => "now".to_string(),
        1..=59 => format!("{} min ago", minutes),
        _ => format!("{} hours ago", minutes / 60),
    }
}

/// Compact form: `"<1m"`, `"Nm"`, `"Hh"`.
pub fn age_compact(minutes: u64) -> String {
    match minutes {
        0 => "<1m".to_string(),
        1..=59 => format!("{}m", minutes),
        _ => format!("{}h", minutes / 60),
    }
}
