//! Event timestamps for back-dated tracking calls.
//!
//! The wire format carries timestamps as whole seconds since the Unix epoch
//! (`_t`), guarded by the `_d=1` flag. Conversions that can only lose
//! fractional seconds are infallible; conversions that can fail outright
//! (non-numeric text, non-finite floats, pre-epoch system times) return
//! [`Error::InvalidTimestamp`].

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seconds since the Unix epoch, as the tracking service expects them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The current time, to whole-second precision.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Returns the wrapped seconds-since-epoch value.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.0
    }

    /// Returns true for the zero timestamp.
    ///
    /// Zero counts as "no timestamp": queries omit `_d`/`_t` for it, the
    /// same way they omit an absent timestamp.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for Timestamp {
    fn from(seconds: i64) -> Self {
        Self(seconds)
    }
}

impl From<i32> for Timestamp {
    fn from(seconds: i32) -> Self {
        Self(i64::from(seconds))
    }
}

impl From<u32> for Timestamp {
    fn from(seconds: u32) -> Self {
        Self(i64::from(seconds))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp())
    }
}

impl TryFrom<u64> for Timestamp {
    type Error = Error;

    fn try_from(seconds: u64) -> Result<Self> {
        i64::try_from(seconds)
            .map(Self)
            .map_err(|_| Error::InvalidTimestamp(format!("seconds out of range: {seconds}")))
    }
}

impl TryFrom<f64> for Timestamp {
    type Error = Error;

    /// Fractional seconds truncate toward zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn try_from(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() {
            return Err(Error::InvalidTimestamp(format!(
                "not a finite number: {seconds}"
            )));
        }
        let truncated = seconds.trunc();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
            return Err(Error::InvalidTimestamp(format!(
                "seconds out of range: {seconds}"
            )));
        }
        Ok(Self(truncated as i64))
    }
}

impl TryFrom<SystemTime> for Timestamp {
    type Error = Error;

    fn try_from(time: SystemTime) -> Result<Self> {
        let since_epoch = time
            .duration_since(UNIX_EPOCH)
            .map_err(|_| Error::InvalidTimestamp("system time precedes the epoch".to_string()))?;
        Self::try_from(since_epoch.as_secs())
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    /// Parses a whole-second integer literal, ignoring surrounding
    /// whitespace. Fractional text such as `"12.5"` is rejected.
    fn from_str(text: &str) -> Result<Self> {
        text.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| Error::InvalidTimestamp(format!("not a whole number: {text:?}")))
    }
}

impl TryFrom<&str> for Timestamp {
    type Error = Error;

    fn try_from(text: &str) -> Result<Self> {
        text.parse()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
