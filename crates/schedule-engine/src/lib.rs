//! # schedule-engine
//!
//! Deterministic open/closed evaluation of a business's weekly hours.
//!
//! Given the rows of a weekly schedule (one per day, 0 = Sunday) and a local
//! day and time supplied by the caller, the engine answers whether the
//! business is open, when it closes, and when it next opens. Intervals that
//! run past midnight are honoured on both the day they start and the morning
//! after. Nothing here reads a clock or does I/O; every function is a pure
//! mapping from `(intervals, instant)` to a result.
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` normalization, 12-hour formatting, wraparound differences
//! - [`interval`] — Typed weekly intervals and validation of storage rows
//! - [`evaluator`] — Open/closed verdicts and next-opening projection
//! - [`status`] — Display-ready status ("closes soon", "opens tomorrow at …")
//! - [`error`] — Error types

pub mod error;
pub mod evaluator;
pub mod interval;
pub mod status;
pub mod time;

pub use error::ScheduleError;
pub use evaluator::{
    evaluate_at, evaluate_current, evaluate_instant, find_next_open_day, opens_later_today,
    EvaluationInstant, NextOpenProjection, ScheduleVerdict, VerdictBasis,
};
pub use interval::{
    intervals_from_records, parse_schedule_json, weekday_from_index, weekday_index,
    IntervalRecord, WeeklyInterval,
};
pub use status::{
    describe, RenderedStatus, ScheduleStatus, StatusLabels, StatusOptions, CLOSING_SOON_MINUTES,
};
pub use time::{normalize_time, MinuteOfDay, MINUTES_PER_DAY};
