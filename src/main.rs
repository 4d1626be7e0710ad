use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use hijri_calendar::{
    AppConfig, CalendarError, Clock, HijriConverter, MonthView, SystemClock, WeekStart,
    events_for_month, is_special_month, month_name,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "hijri-calendar")]
#[command(about = "Hijri (Islamic) calendar - date conversion, month views and observances")]
struct Args {
    /// Ignore the native calendar and use tabular arithmetic only
    #[arg(long, global = true)]
    arithmetic: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Additional configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Moon sighting correction in days (overrides the configuration)
    #[arg(long, global = true, allow_negative_numbers = true)]
    correction: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show today's Hijri date
    Today,
    /// Convert a Gregorian date (YYYY-MM-DD) to a Hijri date
    Convert { date: NaiveDate },
    /// Convert a Hijri date to a Gregorian date
    Gregorian { year: i32, month: u32, day: u32 },
    /// Show a Gregorian month annotated with Hijri dates (defaults to this month)
    Month {
        year: Option<i32>,
        month: Option<u32>,
        /// Write the month as CSV to stdout
        #[arg(long)]
        csv: bool,
    },
    /// List the observances of a Hijri month
    Events { month: u32 },
    /// Number of days in a Hijri month
    MonthLength { year: i32, month: u32 },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (stderr, so stdout stays clean for output)
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load_with(args.config.as_deref()).context("Failed to load configuration")?;

    let converter = if args.arithmetic {
        HijriConverter::arithmetic()
    } else {
        HijriConverter::from_config(&config.calendar)
    };
    let correction = args.correction.unwrap_or(config.calendar.correction);
    tracing::debug!(
        native = converter.native_name().unwrap_or("none"),
        correction,
        "Converter ready"
    );

    let clock = SystemClock;

    match args.command {
        Command::Today => {
            let today = clock.today();
            let hijri = converter.to_hijri(today, correction);
            if args.json {
                print_json(&hijri)?;
            } else {
                println!("{}", hijri);
                if converter.new_month_started(today, correction).is_some() {
                    println!("A new Hijri month has begun: {}", hijri.month_name());
                }
            }
        }
        Command::Convert { date } => {
            let hijri = converter.to_hijri(date, correction);
            if args.json {
                print_json(&hijri)?;
            } else {
                println!("{} = {}", date.format("%Y-%m-%d"), hijri);
            }
        }
        Command::Gregorian { year, month, day } => {
            let date = converter
                .to_gregorian(year, month, day)
                .ok_or(CalendarError::InvalidHijriDate { year, month, day })?;
            if args.json {
                print_json(&date)?;
            } else {
                println!("{} {} {} H = {}", day, month_name(month), year, date.format("%Y-%m-%d"));
            }
        }
        Command::Month { year, month, csv } => {
            let today = clock.today();
            let view = MonthView::build(
                &converter,
                year.unwrap_or(today.year()),
                month.unwrap_or(today.month()),
                today,
                correction,
                config.display.week_start,
            )?;

            if csv {
                view.write_csv(io::stdout().lock())
                    .context("Failed to write CSV")?;
            } else if args.json {
                print_json(&view)?;
            } else {
                print_month(&view, config.display.week_start);
            }
        }
        Command::Events { month } => {
            if !(1..=12).contains(&month) {
                bail!("Hijri month must be between 1 and 12, got {}", month);
            }
            let events = events_for_month(month);
            if args.json {
                print_json(&events)?;
            } else {
                let marker = if is_special_month(month) { " *" } else { "" };
                println!("{}{}", month_name(month), marker);
                for event in events {
                    println!(
                        "{:>3} {} {} - {}",
                        event.hijri_day, event.emoji, event.name, event.description
                    );
                }
            }
        }
        Command::MonthLength { year, month } => {
            let length = converter.month_length(year, month);
            if args.json {
                print_json(&length)?;
            } else {
                println!("{} {} H has {} days", month_name(month), year, length);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Print a month grid: Gregorian day over Hijri day, `*` marks today and
/// `+` marks days with observances.
fn print_month(view: &MonthView, week_start: WeekStart) {
    println!(
        "{} {}  |  {} {}",
        view.month_name, view.year, view.hijri_month_label, view.hijri_year_label
    );

    let header = match week_start {
        WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    };
    println!("{}", header.map(|d| format!("{:>7}", d)).join(""));

    for week in view.weeks() {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let mark = if day.is_today {
                        '*'
                    } else if !day.events.is_empty() {
                        '+'
                    } else {
                        ' '
                    };
                    format!("{:>3}/{:<2}{}", day.gregorian_day, day.hijri.day(), mark)
                }
                None => " ".repeat(7),
            })
            .collect();
        println!("{}", line.trim_end());
    }

    if !view.events.is_empty() {
        println!();
        for event in &view.events {
            println!(
                "{:>2} {:<18} {} {}",
                event.hijri_day,
                month_name(event.hijri_month),
                event.emoji,
                event.name
            );
        }
    }

    println!();
    println!("Today: {}", view.today_label);
}
