//! Human-facing schedule status.
//!
//! [`describe`] folds a verdict and the forward projections into one
//! [`ScheduleStatus`]: open (possibly closing soon), opening later today,
//! opening on a later day, or no opening at all. [`StatusLabels`] turns that
//! into a title/subtitle pair using caller-supplied templates.

use chrono::Weekday;
use serde::Serialize;

use crate::evaluator::{
    evaluate_instant, find_next_open_day, opens_later_today, EvaluationInstant, VerdictBasis,
};
use crate::interval::{weekday_index, WeeklyInterval};
use crate::time::MinuteOfDay;

// ── Options ──────────────────────────────────────────────────────────────────

/// Default "closing soon" window, in minutes.
pub const CLOSING_SOON_MINUTES: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOptions {
    /// An open business closing within this many minutes is "closing soon".
    pub closing_soon_minutes: u16,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self {
            closing_soon_minutes: CLOSING_SOON_MINUTES,
        }
    }
}

// ── describe ─────────────────────────────────────────────────────────────────

/// Where a business stands at an instant, qualified for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// No schedule rows, or no usable "now".
    Unavailable,
    Open {
        closes_at: MinuteOfDay,
        via: VerdictBasis,
        closing_soon: bool,
    },
    OpensLaterToday {
        opens_at: MinuteOfDay,
    },
    OpensOn {
        day: Weekday,
        opens_at: MinuteOfDay,
        is_tomorrow: bool,
    },
    /// Closed, and no day of the week has an opening.
    ClosedIndefinitely,
}

impl ScheduleStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, ScheduleStatus::Open { .. })
    }
}

/// Describe the schedule at `instant`.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use schedule_engine::evaluator::EvaluationInstant;
/// use schedule_engine::interval::WeeklyInterval;
/// use schedule_engine::status::{describe, ScheduleStatus, StatusOptions};
/// use schedule_engine::time::MinuteOfDay;
///
/// let t = |h, m| MinuteOfDay::from_hm(h, m).unwrap();
/// let week = [WeeklyInterval::open(Weekday::Mon, t(11, 0), t(22, 0))];
/// let now = EvaluationInstant::new(Weekday::Mon, t(9, 0));
///
/// let status = describe(&week, Some(&now), &StatusOptions::default());
/// assert_eq!(status, ScheduleStatus::OpensLaterToday { opens_at: t(11, 0) });
/// ```
pub fn describe(
    intervals: &[WeeklyInterval],
    instant: Option<&EvaluationInstant>,
    options: &StatusOptions,
) -> ScheduleStatus {
    let Some(instant) = instant else {
        return ScheduleStatus::Unavailable;
    };

    let verdict = evaluate_instant(intervals, instant);
    if verdict.basis == VerdictBasis::InsufficientData {
        return ScheduleStatus::Unavailable;
    }

    if let Some(closes_at) = verdict.closes_at {
        let remaining = instant.minute.minutes_until(closes_at);
        return ScheduleStatus::Open {
            closes_at,
            via: verdict.basis,
            closing_soon: remaining <= options.closing_soon_minutes,
        };
    }

    if let Some(opens_at) = opens_later_today(intervals, instant) {
        return ScheduleStatus::OpensLaterToday { opens_at };
    }

    match find_next_open_day(intervals, instant.day) {
        Some(next) => ScheduleStatus::OpensOn {
            day: next.day,
            opens_at: next.opens_at,
            is_tomorrow: next.is_tomorrow,
        },
        None => ScheduleStatus::ClosedIndefinitely,
    }
}

// ── Labels ───────────────────────────────────────────────────────────────────

/// A rendered status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedStatus {
    pub title: String,
    pub subtitle: String,
    pub is_open: bool,
}

/// Text templates for rendering a [`ScheduleStatus`].
///
/// Templates may contain `{time}` (12-hour clock) and `{day}` placeholders.
/// `day_names` starts at Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabels {
    pub open_now: String,
    pub closed_now: String,
    pub unavailable: String,
    pub opens_today: String,
    pub opens_on: String,
    pub tomorrow: String,
    pub closes_at: String,
    pub closed: String,
    pub day_names: [String; 7],
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self::spanish()
    }
}

impl StatusLabels {
    pub fn spanish() -> Self {
        Self {
            open_now: "Abierto Ahora".into(),
            closed_now: "Cerrado Ahora".into(),
            unavailable: "Horario no disponible".into(),
            opens_today: "Abre hoy a {time}".into(),
            opens_on: "Abre {day} a {time}".into(),
            tomorrow: "mañana".into(),
            closes_at: "Cierra a las {time}".into(),
            closed: "Cerrado".into(),
            day_names: [
                "Domingo", "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado",
            ]
            .map(String::from),
        }
    }

    pub fn english() -> Self {
        Self {
            open_now: "Open Now".into(),
            closed_now: "Closed Now".into(),
            unavailable: "Hours not available".into(),
            opens_today: "Opens today at {time}".into(),
            opens_on: "Opens {day} at {time}".into(),
            tomorrow: "tomorrow".into(),
            closes_at: "Closes at {time}".into(),
            closed: "Closed".into(),
            day_names: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .map(String::from),
        }
    }

    pub fn day_name(&self, day: Weekday) -> &str {
        &self.day_names[usize::from(weekday_index(day))]
    }

    /// Render a status into a title and subtitle.
    pub fn render(&self, status: &ScheduleStatus) -> RenderedStatus {
        let (title, subtitle) = match *status {
            ScheduleStatus::Unavailable => (&self.unavailable, String::new()),
            ScheduleStatus::Open {
                closes_at,
                closing_soon,
                ..
            } => {
                let subtitle = if closing_soon {
                    fill(&self.closes_at, "", closes_at)
                } else {
                    String::new()
                };
                (&self.open_now, subtitle)
            }
            ScheduleStatus::OpensLaterToday { opens_at } => {
                (&self.closed_now, fill(&self.opens_today, "", opens_at))
            }
            ScheduleStatus::OpensOn {
                day,
                opens_at,
                is_tomorrow,
            } => {
                let when = if is_tomorrow {
                    self.tomorrow.as_str()
                } else {
                    self.day_name(day)
                };
                (&self.closed_now, fill(&self.opens_on, when, opens_at))
            }
            ScheduleStatus::ClosedIndefinitely => (&self.closed_now, String::new()),
        };

        RenderedStatus {
            title: title.clone(),
            subtitle,
            is_open: status.is_open(),
        }
    }

    /// One row of a weekly hours table, e.g. `"11:00 AM - 10:00 PM"`.
    pub fn interval_text(&self, interval: &WeeklyInterval) -> String {
        if interval.closed {
            return self.closed.clone();
        }
        match interval.opening_window() {
            Some((opens, closes)) => format!("{} - {}", opens.to_12_hour(), closes.to_12_hour()),
            None => self.unavailable.clone(),
        }
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

/// Substitute `{day}` and `{time}` into a label template.
fn fill(template: &str, day: &str, time: MinuteOfDay) -> String {
    template
        .replace("{day}", day)
        .replace("{time}", &time.to_12_hour())
}

// ── Tests ───────────────────────────────────────────────────────────────────
