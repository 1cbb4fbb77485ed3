//! Backup timestamps
//!
//! The suffix of every backup file is a 14-digit `YYYYMMDDHHMMSS` stamp.
//! Parsing only checks the shape of the string; calendar fields are not
//! range-checked, so `20082030185243` is a valid (if odd) timestamp.

use std::fmt;

use chrono::NaiveDateTime;

/// Number of digits in a backup timestamp
pub const TIMESTAMP_LEN: usize = 14;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// A parsed backup timestamp, ordered by numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackupTimestamp(u64);

impl BackupTimestamp {
    /// Parse a filename suffix
    ///
    /// Returns `None` unless the suffix is exactly 14 ASCII digits.
    pub fn parse(suffix: &str) -> Option<Self> {
        if suffix.len() != TIMESTAMP_LEN || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok().map(Self)
    }

    /// Stamp for the given moment
    pub fn from_datetime(moment: NaiveDateTime) -> Self {
        let formatted = moment.format(TIMESTAMP_FORMAT).to_string();
        // chrono pads every field, so only years past 9999 fall through
        Self::parse(&formatted).unwrap_or(Self(99_991_231_235_959))
    }

    /// Stamp for the current local time
    pub fn now() -> Self {
        Self::from_datetime(chrono::Local::now().naive_local())
    }

    /// Numeric value of the stamp
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Interpret the stamp as a calendar date, if its fields are in range
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.to_string(), TIMESTAMP_FORMAT).ok()
    }
}

impl fmt::Display for BackupTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:014}", self.0)
    }
}
