//! Commit timestamps.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The instant a commit was created, with the author's timezone offset.
///
/// Ordering: `seconds` → `offset_minutes` (total order). The offset only
/// participates to keep the order total; two commits at the same instant in
/// different timezones compare by offset, which is an arbitrary but stable
/// tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommitTime {
    /// Seconds since the UNIX epoch.
    pub seconds: i64,
    /// Timezone offset from UTC, in minutes.
    pub offset_minutes: i16,
}

impl CommitTime {
    /// Create a timestamp with explicit values.
    pub fn new(seconds: i64, offset_minutes: i16) -> Self {
        Self {
            seconds,
            offset_minutes,
        }
    }

    /// The current wall-clock time in UTC.
    pub fn now() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        Self {
            seconds,
            offset_minutes: 0,
        }
    }

    /// The epoch timestamp.
    pub const fn zero() -> Self {
        Self {
            seconds: 0,
            offset_minutes: 0,
        }
    }

    /// Returns `true` if this timestamp is strictly after `other`.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns `true` if this timestamp is strictly before `other`.
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }
}

impl fmt::Display for CommitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let abs = self.offset_minutes.unsigned_abs();
        write!(f, "{} {}{:02}{:02}", self.seconds, sign, abs / 60, abs % 60)
    }
}
