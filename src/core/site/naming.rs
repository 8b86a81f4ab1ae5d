//! Site directory naming and the clock it depends on

use chrono::DateTime;

/// Fallback token for titles with no usable characters
const UNTITLED: &str = "untitled";

/// Source of the current time, in whole seconds since the Unix epoch
pub trait Clock {
    /// Current time as seconds since the Unix epoch
    fn now_epoch_seconds(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock stuck at one instant, for reproducible names and dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> i64 {
        self.0
    }
}

/// Turn a free-form title into a filesystem-safe token
///
/// Alphanumerics, `-`, `_` and `.` are kept; whitespace runs become a single
/// `_`; everything else (separators, NUL, punctuation, control characters) is
/// dropped. Leading/trailing `_` and `.` are trimmed so the result can never
/// be `.`, `..` or a hidden file. Returns `untitled` if nothing is left.
#[must_use]
pub fn legalize(title: &str) -> String {
    let mut token = String::with_capacity(title.len());

    for c in title.trim().chars() {
        let mapped = if c.is_alphanumeric() || c == '-' || c == '.' {
            c
        } else if c == '_' || c.is_whitespace() {
            '_'
        } else {
            continue;
        };
        if mapped == '_' && token.ends_with('_') {
            continue;
        }
        token.push(mapped);
    }

    let token = token.trim_matches(|c| c == '_' || c == '.');
    if token.is_empty() {
        UNTITLED.to_string()
    } else {
        token.to_string()
    }
}

/// Derive the site directory name: `<legalized-title>_<epoch-seconds>`
///
/// Two calls with the same title in the same second yield the same name; the
/// builder reports that as [`Error::DirectoryExists`](crate::core::error::Error::DirectoryExists).
#[must_use]
pub fn site_name(title: &str, epoch_seconds: i64) -> String {
    format!("{}_{epoch_seconds}", legalize(title))
}

/// Human-readable form of an epoch timestamp, used for the document `date`
#[must_use]
pub fn format_date(epoch_seconds: i64) -> String {
    DateTime::from_timestamp(epoch_seconds, 0).map_or_else(
        || epoch_seconds.to_string(),
        |instant| instant.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}
