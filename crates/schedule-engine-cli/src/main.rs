use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use schedule_engine::{
    describe, find_next_open_day, parse_schedule_json, weekday_from_index, EvaluationInstant,
    MinuteOfDay, NextOpenProjection, RenderedStatus, ScheduleStatus, StatusLabels, StatusOptions,
    WeeklyInterval, CLOSING_SOON_MINUTES,
};

/// Check a business's weekly opening hours against the clock.
#[derive(Parser)]
#[command(name = "findixi-hours", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Whether the business is open now, and when it closes or next opens
    Status {
        #[command(flatten)]
        schedule: ScheduleArgs,
        #[command(flatten)]
        when: StatusWhen,
        #[command(flatten)]
        output: OutputArgs,
        /// Warn when closing within this many minutes
        #[arg(long, default_value_t = CLOSING_SOON_MINUTES)]
        closing_soon: u16,
    },
    /// The next day after today with an opening
    Next {
        #[command(flatten)]
        schedule: ScheduleArgs,
        #[command(flatten)]
        when: NextWhen,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// The weekly hours table, Sunday first
    Table {
        #[command(flatten)]
        schedule: ScheduleArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct ScheduleArgs {
    /// Schedule rows as a JSON array; `-` reads stdin
    #[arg(long, short)]
    schedule: PathBuf,
}

/// Where "now" comes from when no explicit day is given.
#[derive(Args)]
struct ClockArgs {
    /// RFC 3339 instant to evaluate instead of the system clock
    #[arg(long)]
    at: Option<String>,

    /// IANA timezone of the business
    #[arg(long, env = "FINDIXI_TIMEZONE", default_value = "America/Puerto_Rico")]
    timezone: String,
}

#[derive(Args)]
struct StatusWhen {
    /// Day index to evaluate (0 = Sunday)
    #[arg(
        long,
        requires = "time",
        conflicts_with = "at",
        value_parser = clap::value_parser!(u8).range(0..7)
    )]
    day: Option<u8>,

    /// Local time to evaluate, HH:MM
    #[arg(long, requires = "day", conflicts_with = "at")]
    time: Option<String>,

    #[command(flatten)]
    clock: ClockArgs,
}

#[derive(Args)]
struct NextWhen {
    /// Day index to search from (0 = Sunday)
    #[arg(long, conflicts_with = "at", value_parser = clap::value_parser!(u8).range(0..7))]
    day: Option<u8>,

    #[command(flatten)]
    clock: ClockArgs,
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Lang::Es)]
    lang: Lang,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    Es,
    En,
}

impl Lang {
    fn labels(self) -> StatusLabels {
        match self {
            Lang::Es => StatusLabels::spanish(),
            Lang::En => StatusLabels::english(),
        }
    }
}

fn weekday_arg(day: u8) -> Result<Weekday> {
    weekday_from_index(i64::from(day))
        .ok_or_else(|| anyhow!("day must be between 0 and 6, got {day}"))
}

impl StatusWhen {
    /// Resolve the local day and minute to evaluate at.
    fn resolve(&self) -> Result<EvaluationInstant> {
        if let (Some(day), Some(time)) = (self.day, self.time.as_deref()) {
            let minute: MinuteOfDay = time.parse().context("invalid --time")?;
            return Ok(EvaluationInstant::new(weekday_arg(day)?, minute));
        }
        self.clock.now()
    }
}

impl NextWhen {
    /// The day to search forward from.
    fn resolve_day(&self) -> Result<Weekday> {
        match self.day {
            Some(day) => weekday_arg(day),
            None => Ok(self.clock.now()?.day),
        }
    }
}

impl ClockArgs {
    /// Read the clock (or `--at`) in the business's timezone.
    fn now(&self) -> Result<EvaluationInstant> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| anyhow!("unknown timezone '{}'", self.timezone))?;
        let now = match self.at.as_deref() {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("invalid --at datetime '{raw}'"))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };
        let local = now.with_timezone(&tz);
        debug!(%local, "resolved evaluation instant");
        Ok(EvaluationInstant::from_datetime(&local))
    }
}

fn load_schedule(path: &Path) -> Result<Vec<WeeklyInterval>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read schedule from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read schedule file {}", path.display()))?
    };

    let intervals = parse_schedule_json(&text)
        .with_context(|| format!("failed to parse schedule from {}", path.display()))?;
    debug!(rows = intervals.len(), "loaded schedule");
    Ok(intervals)
}

#[derive(Serialize)]
struct StatusReport<'a> {
    instant: EvaluationInstant,
    status: ScheduleStatus,
    rendered: &'a RenderedStatus,
}

#[derive(Serialize)]
struct NextReport {
    from: Weekday,
    next: Option<NextOpenProjection>,
}

#[derive(Serialize)]
struct TableRow<'a> {
    day: &'a str,
    interval: Option<WeeklyInterval>,
    text: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Status {
            schedule,
            when,
            output,
            closing_soon,
        } => {
            let intervals = load_schedule(&schedule.schedule)?;
            let instant = when.resolve()?;
            let options = StatusOptions {
                closing_soon_minutes: closing_soon,
            };
            let status = describe(&intervals, Some(&instant), &options);
            let rendered = output.lang.labels().render(&status);

            if output.json {
                let report = StatusReport {
                    instant,
                    status,
                    rendered: &rendered,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", rendered.title);
                if !rendered.subtitle.is_empty() {
                    println!("{}", rendered.subtitle);
                }
            }
        }

        Command::Next {
            schedule,
            when,
            output,
        } => {
            let intervals = load_schedule(&schedule.schedule)?;
            let from = when.resolve_day()?;
            let next = find_next_open_day(&intervals, from);

            if output.json {
                println!("{}", serde_json::to_string_pretty(&NextReport { from, next })?);
            } else {
                let labels = output.lang.labels();
                match next {
                    Some(next) => {
                        let status = ScheduleStatus::OpensOn {
                            day: next.day,
                            opens_at: next.opens_at,
                            is_tomorrow: next.is_tomorrow,
                        };
                        println!("{}", labels.render(&status).subtitle);
                    }
                    None => println!("{}", labels.closed),
                }
            }
        }

        Command::Table { schedule, output } => {
            let intervals = load_schedule(&schedule.schedule)?;
            let labels = output.lang.labels();
            let rows: Vec<TableRow<'_>> = (0..7)
                .filter_map(weekday_from_index)
                .map(|day| {
                    let interval = intervals.iter().find(|row| row.day == day).copied();
                    let text = interval
                        .map(|row| labels.interval_text(&row))
                        .unwrap_or_else(|| labels.unavailable.clone());
                    TableRow {
                        day: labels.day_name(day),
                        interval,
                        text,
                    }
                })
                .collect();

            if output.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{}: {}", row.day, row.text);
                }
            }
        }
    }

    Ok(())
}
