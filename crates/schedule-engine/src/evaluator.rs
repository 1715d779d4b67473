//! Open/closed evaluation of a weekly schedule at a given instant.
//!
//! All functions are pure: they take the week's intervals and an
//! already-resolved local day and minute, and never read a clock. The
//! caller owns the interval list and lends it for the duration of a call.
//!
//! # Overnight intervals
//!
//! An interval whose closing time is earlier than its opening time runs past
//! midnight. Friday `20:00–03:00` makes the business open on Friday from
//! 20:00 and on Saturday until 03:00. Saturday's early hours are found by
//! looking back at Friday's row (the "carry-over"), after Saturday's own row
//! has been checked.
//!
//! # Duplicate days
//!
//! If several rows share a day, the first one in the slice is used and the
//! rest are ignored. Rows are never merged.

use chrono::{DateTime, Datelike, TimeZone, Weekday};
use serde::Serialize;

use crate::interval::WeeklyInterval;
use crate::time::{normalize_time, MinuteOfDay};

// ── EvaluationInstant ────────────────────────────────────────────────────────

/// The local day and time at which a schedule is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvaluationInstant {
    pub day: Weekday,
    pub minute: MinuteOfDay,
}

impl EvaluationInstant {
    pub fn new(day: Weekday, minute: MinuteOfDay) -> Self {
        Self { day, minute }
    }

    /// Take the weekday and wall-clock minute of a zoned datetime.
    ///
    /// The datetime should already be in the business's timezone; no
    /// conversion happens here.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            day: dt.weekday(),
            minute: MinuteOfDay::from(dt.time()),
        }
    }
}

// ── evaluate_current ─────────────────────────────────────────────────────────

/// Which rule produced a [`ScheduleVerdict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictBasis {
    /// No intervals were supplied, or "now" could not be normalized.
    InsufficientData,
    /// Open within today's own interval.
    SameDay,
    /// Open in the after-midnight tail of yesterday's interval.
    CarriedOver,
    /// Closed according to the schedule.
    Closed,
}

/// Open/closed answer for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleVerdict {
    pub is_open: bool,
    /// Closing time of the interval that is currently open.
    pub closes_at: Option<MinuteOfDay>,
    pub basis: VerdictBasis,
    /// The row found for the queried day, if any.
    pub today: Option<WeeklyInterval>,
    /// The row found for the previous day, if any.
    pub yesterday: Option<WeeklyInterval>,
}

impl ScheduleVerdict {
    fn insufficient() -> Self {
        Self {
            is_open: false,
            closes_at: None,
            basis: VerdictBasis::InsufficientData,
            today: None,
            yesterday: None,
        }
    }

    /// Minutes from `now` until closing, wrapping past midnight.
    ///
    /// `None` when the verdict is closed.
    pub fn minutes_until_close(&self, now: MinuteOfDay) -> Option<u16> {
        self.closes_at.map(|closes| now.minutes_until(closes))
    }
}

/// Decide whether the business is open on `day` at `minute`.
///
/// Today's row is checked first; a same-day interval is open on
/// `opens <= now < closes`, an overnight one on `now >= opens || now < closes`.
/// If that fails, yesterday's row is checked for an overnight interval whose
/// closing time has not passed yet. Today's row wins when both would match.
///
/// An empty `intervals` slice or a `None` minute gives a closed verdict with
/// [`VerdictBasis::InsufficientData`].
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use schedule_engine::evaluator::{evaluate_current, VerdictBasis};
/// use schedule_engine::interval::WeeklyInterval;
/// use schedule_engine::time::MinuteOfDay;
///
/// let t = |h, m| MinuteOfDay::from_hm(h, m).unwrap();
/// let week = [WeeklyInterval::open(Weekday::Fri, t(20, 0), t(3, 0))];
///
/// let verdict = evaluate_current(&week, Weekday::Sat, Some(t(1, 30)));
/// assert!(verdict.is_open);
/// assert_eq!(verdict.basis, VerdictBasis::CarriedOver);
/// assert_eq!(verdict.closes_at, Some(t(3, 0)));
/// ```
pub fn evaluate_current(
    intervals: &[WeeklyInterval],
    day: Weekday,
    minute: Option<MinuteOfDay>,
) -> ScheduleVerdict {
    let Some(now) = minute.filter(|_| !intervals.is_empty()) else {
        return ScheduleVerdict::insufficient();
    };

    let today = row_for(intervals, day).copied();
    let yesterday = row_for(intervals, day.pred()).copied();

    let same_day = today
        .and_then(|row| row.opening_window())
        .and_then(|(opens, closes)| {
            let open = if opens <= closes {
                opens <= now && now < closes
            } else {
                now >= opens || now < closes
            };
            open.then_some(closes)
        });

    let carried = || {
        yesterday
            .and_then(|row| row.opening_window())
            .and_then(|(opens, closes)| (opens > closes && now < closes).then_some(closes))
    };

    let (closes_at, basis) = match same_day {
        Some(closes) => (Some(closes), VerdictBasis::SameDay),
        None => match carried() {
            Some(closes) => (Some(closes), VerdictBasis::CarriedOver),
            None => (None, VerdictBasis::Closed),
        },
    };

    ScheduleVerdict {
        is_open: closes_at.is_some(),
        closes_at,
        basis,
        today,
        yesterday,
    }
}

/// [`evaluate_current`] with "now" given as a raw `HH:MM` string.
///
/// A malformed time is treated as missing.
pub fn evaluate_at(intervals: &[WeeklyInterval], day: Weekday, raw_time: &str) -> ScheduleVerdict {
    evaluate_current(intervals, day, normalize_time(raw_time))
}

/// [`evaluate_current`] for an [`EvaluationInstant`].
pub fn evaluate_instant(intervals: &[WeeklyInterval], instant: &EvaluationInstant) -> ScheduleVerdict {
    evaluate_current(intervals, instant.day, Some(instant.minute))
}

// ── find_next_open_day ───────────────────────────────────────────────────────

/// The next day, after today, on which the business opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextOpenProjection {
    pub day: Weekday,
    /// 1 for tomorrow, up to 7 for the same weekday next week.
    pub days_ahead: u8,
    pub opens_at: MinuteOfDay,
    pub closes_at: MinuteOfDay,
    pub is_tomorrow: bool,
}

/// Find the soonest day after `day` with an opening, looking up to a week
/// ahead (offset 7 is the same weekday next week).
///
/// Today is never considered; use [`opens_later_today`] for that. Returns
/// `None` if no day of the week has an opening.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use schedule_engine::evaluator::find_next_open_day;
/// use schedule_engine::interval::WeeklyInterval;
/// use schedule_engine::time::MinuteOfDay;
///
/// let t = |h, m| MinuteOfDay::from_hm(h, m).unwrap();
/// let week = [WeeklyInterval::open(Weekday::Mon, t(11, 0), t(22, 0))];
///
/// let next = find_next_open_day(&week, Weekday::Tue).unwrap();
/// assert_eq!(next.day, Weekday::Mon);
/// assert_eq!(next.days_ahead, 6);
/// assert!(!next.is_tomorrow);
/// ```
pub fn find_next_open_day(intervals: &[WeeklyInterval], day: Weekday) -> Option<NextOpenProjection> {
    (1..=7u8).find_map(|offset| {
        let candidate = days_after(day, offset);
        let (opens_at, closes_at) = row_for(intervals, candidate)?.opening_window()?;
        Some(NextOpenProjection {
            day: candidate,
            days_ahead: offset,
            opens_at,
            closes_at,
            is_tomorrow: offset == 1,
        })
    })
}

// ── opens_later_today ────────────────────────────────────────────────────────

/// Today's opening time if the business has not opened yet today.
pub fn opens_later_today(intervals: &[WeeklyInterval], instant: &EvaluationInstant) -> Option<MinuteOfDay> {
    let (opens, _) = row_for(intervals, instant.day)?.opening_window()?;
    (instant.minute < opens).then_some(opens)
}

// ── Internal helpers ─────────────────────────────────────────────────────────

/// First row for `day`, if any.
fn row_for(intervals: &[WeeklyInterval], day: Weekday) -> Option<&WeeklyInterval> {
    intervals.iter().find(|interval| interval.day == day)
}

fn days_after(day: Weekday, offset: u8) -> Weekday {
    (0..offset).fold(day, |d, _| d.succ())
}

// ── Tests ───────────────────────────────────────────────────────────────────
