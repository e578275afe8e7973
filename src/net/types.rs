//! Record types shared by the contract layer, controller, and views.
//!
//! DESIGN
//! ======
//! `RawWave` mirrors what the contract returns (epoch seconds); `Wave` is the
//! display record with a real point in time. Conversion is the only place the
//! numeric timestamp is interpreted.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{DateTime, Utc};

/// One wave exactly as decoded from `getAllWaves`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawWave {
    pub waver: String,
    pub message: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

/// One wave as displayed to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wave {
    pub waver: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<RawWave> for Wave {
    fn from(raw: RawWave) -> Self {
        Self { waver: raw.waver, message: raw.message, timestamp: epoch_seconds(raw.timestamp) }
    }
}

/// Convert epoch seconds to a UTC point in time.
///
/// Values beyond chrono's range clamp to `DateTime::<Utc>::MAX_UTC`.
pub fn epoch_seconds(secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
