//! Display formatting for addresses, timestamps, and button labels.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, Utc};

/// Abbreviate an account for the header: `0x1234...abcd`.
///
/// Values too short to abbreviate are returned unchanged.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Wave timestamp as shown in the list. Always rendered in UTC.
pub fn wave_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a %b %e %Y %H:%M:%S UTC").to_string()
}

pub fn wave_button_label(sending: bool) -> &'static str {
    if sending { "Loading..." } else { "Wave at Me" }
}
