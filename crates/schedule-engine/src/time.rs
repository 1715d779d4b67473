//! Time-of-day normalization and formatting.
//!
//! Every schedule time is reduced to a [`MinuteOfDay`] (0–1439) before any
//! comparison happens. Storage rows carry times as strings, sometimes with a
//! trailing seconds component (`"22:00:00"`), sometimes dirty or empty; all of
//! that is absorbed here by [`normalize_time`] so the evaluator only ever sees
//! well-formed minutes.
//!
//! No timezone handling happens at this level: a `MinuteOfDay` is wall-clock
//! time already local to the business.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::error::ScheduleError;

/// Number of minutes in a day; the modulus for all wraparound arithmetic.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A wall-clock time of day at minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight (`00:00`).
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);

    /// Wrap a raw minute count. Returns `None` outside 0–1439.
    pub fn new(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(MinuteOfDay(minutes))
    }

    /// Build from an hour (0–23) and minute (0–59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(MinuteOfDay((hour * 60 + minute) as u16))
    }

    /// Total minutes since midnight.
    pub fn as_minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }

    fn as_naive_time(self) -> NaiveTime {
        // hour() < 24 and minute() < 60 by construction
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    /// Render as a 12-hour clock string, e.g. `"9:05 PM"`, `"12:30 AM"`.
    ///
    /// ```
    /// use schedule_engine::time::MinuteOfDay;
    ///
    /// let t = MinuteOfDay::from_hm(22, 0).unwrap();
    /// assert_eq!(t.to_12_hour(), "10:00 PM");
    /// ```
    pub fn to_12_hour(self) -> String {
        self.as_naive_time().format("%-I:%M %p").to_string()
    }

    /// Minutes from `self` forward to `later`, wrapping past midnight.
    ///
    /// `23:30 → 01:00` is 90 minutes, not negative. Equal times yield 0.
    pub fn minutes_until(self, later: MinuteOfDay) -> u16 {
        if later.0 >= self.0 {
            later.0 - self.0
        } else {
            MINUTES_PER_DAY - self.0 + later.0
        }
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for MinuteOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_time(s).ok_or_else(|| ScheduleError::MalformedTime(s.to_string()))
    }
}

impl From<NaiveTime> for MinuteOfDay {
    fn from(time: NaiveTime) -> Self {
        MinuteOfDay((time.hour() * 60 + time.minute()) as u16)
    }
}

/// Normalize a raw time string to minutes since midnight.
///
/// The input is trimmed and its first five characters must read `HH:MM`
/// with a valid hour (00–23) and minute (00–59). Anything after the fifth
/// character (typically `":SS"`) is ignored. Empty, short, or out-of-range
/// input yields `None`; this never panics.
///
/// # Examples
///
/// ```
/// use schedule_engine::time::normalize_time;
///
/// assert_eq!(normalize_time("22:00:00").map(|t| t.as_minutes()), Some(1320));
/// assert_eq!(normalize_time(" 09:30 ").map(|t| t.as_minutes()), Some(570));
/// assert!(normalize_time("25:99").is_none());
/// assert!(normalize_time("").is_none());
/// assert!(normalize_time("9:30").is_none());
/// ```
pub fn normalize_time(raw: &str) -> Option<MinuteOfDay> {
    let hhmm = raw.trim().get(..5)?;
    let bytes = hhmm.as_bytes();
    let shaped = bytes[2] == b':' && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveTime::parse_from_str(hhmm, "%H:%M")
        .ok()
        .map(MinuteOfDay::from)
}

// ── Tests ───────────────────────────────────────────────────────────────────
