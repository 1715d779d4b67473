//! Weekly opening intervals and the storage-row boundary.
//!
//! Storage hands back loosely shaped rows ([`IntervalRecord`]): a numeric
//! day, two optional time strings and a closed flag. They are validated once
//! here and turned into [`WeeklyInterval`], so the evaluator never has to
//! second-guess field presence.
//!
//! Day indices follow the storage convention: 0 = Sunday … 6 = Saturday.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::time::{normalize_time, MinuteOfDay};

/// Map a storage day index (0 = Sunday) to a [`Weekday`].
pub fn weekday_from_index(index: i64) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Storage day index (0 = Sunday) of a [`Weekday`].
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// One day's row of a recurring weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyInterval {
    pub day: Weekday,
    /// When set, the business is closed all day whatever the times say.
    pub closed: bool,
    pub opens_at: Option<MinuteOfDay>,
    pub closes_at: Option<MinuteOfDay>,
}

impl WeeklyInterval {
    /// An open interval from `opens_at` to `closes_at`.
    ///
    /// `closes_at` earlier than `opens_at` means the interval runs past
    /// midnight into the next day.
    pub fn open(day: Weekday, opens_at: MinuteOfDay, closes_at: MinuteOfDay) -> Self {
        Self {
            day,
            closed: false,
            opens_at: Some(opens_at),
            closes_at: Some(closes_at),
        }
    }

    /// A day marked closed.
    pub fn closed(day: Weekday) -> Self {
        Self {
            day,
            closed: true,
            opens_at: None,
            closes_at: None,
        }
    }

    /// The `(opens, closes)` pair if this row describes an actual opening.
    ///
    /// Closed rows and rows missing either time count as no opening at all.
    pub fn opening_window(&self) -> Option<(MinuteOfDay, MinuteOfDay)> {
        if self.closed {
            return None;
        }
        Some((self.opens_at?, self.closes_at?))
    }

    /// Whether the opening runs past midnight (`opens > closes`).
    pub fn crosses_midnight(&self) -> bool {
        self.opening_window()
            .is_some_and(|(opens, closes)| opens > closes)
    }
}

/// A schedule row as stored, before validation.
///
/// Field names accept both the camelCase API spelling and the column names
/// of the `Horarios` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalRecord {
    #[serde(default, alias = "diaSemana")]
    pub day_of_week: Option<i64>,
    #[serde(default, alias = "cerrado")]
    pub is_closed: Option<bool>,
    #[serde(default, alias = "apertura")]
    pub opens_at: Option<String>,
    #[serde(default, alias = "cierre")]
    pub closes_at: Option<String>,
}

impl TryFrom<IntervalRecord> for WeeklyInterval {
    type Error = ScheduleError;

    fn try_from(record: IntervalRecord) -> Result<Self> {
        let index = record.day_of_week.ok_or(ScheduleError::MissingWeekday)?;
        let day = weekday_from_index(index).ok_or(ScheduleError::InvalidWeekday(index))?;
        let closed = record.is_closed.unwrap_or(false);

        let opens_at = normalize_field(day, "opens_at", record.opens_at.as_deref(), closed);
        let closes_at = normalize_field(day, "closes_at", record.closes_at.as_deref(), closed);

        Ok(WeeklyInterval {
            day,
            closed,
            opens_at,
            closes_at,
        })
    }
}

/// Normalize an optional raw time, logging when an open day loses a time.
fn normalize_field(day: Weekday, field: &str, raw: Option<&str>, closed: bool) -> Option<MinuteOfDay> {
    let normalized = raw.and_then(normalize_time);
    if !closed && normalized.is_none() {
        warn!(?day, field, ?raw, "schedule row has no usable time; day treated as closed");
    }
    normalized
}

/// Validate a batch of storage rows, keeping their order.
///
/// Rows whose day index is missing or outside 0–6 are dropped (and logged);
/// every other row is kept even if its times are unusable, so "first row for
/// a day wins" still sees it.
pub fn intervals_from_records<I>(records: I) -> Vec<WeeklyInterval>
where
    I: IntoIterator<Item = IntervalRecord>,
{
    records
        .into_iter()
        .filter_map(|record| match WeeklyInterval::try_from(record) {
            Ok(interval) => Some(interval),
            Err(err) => {
                warn!(%err, "dropping schedule row");
                None
            }
        })
        .collect()
}

/// Parse a JSON array of storage rows into validated intervals.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidRecord`] if the text is not a JSON array
/// of row objects. Missing or bad days and bad times are not errors; see
/// [`intervals_from_records`].
///
/// # Examples
///
/// ```
/// use schedule_engine::interval::parse_schedule_json;
///
/// let json = r#"[
///     {"diaSemana": 1, "apertura": "11:00:00", "cierre": "22:00:00", "cerrado": false},
///     {"dayOfWeek": 2, "isClosed": true}
/// ]"#;
/// let intervals = parse_schedule_json(json).unwrap();
/// assert_eq!(intervals.len(), 2);
/// assert!(intervals[1].closed);
/// ```
pub fn parse_schedule_json(json: &str) -> Result<Vec<WeeklyInterval>> {
    let records: Vec<IntervalRecord> = serde_json::from_str(json)?;
    Ok(intervals_from_records(records))
}

// ── Tests ───────────────────────────────────────────────────────────────────
