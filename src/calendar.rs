//! Gregorian month grid annotated with Hijri dates and observances.
//!
//! Each day of the Gregorian month becomes a [`CalendarDay`] carrying its
//! Hijri date and that day's observances. The grid starts with blank cells
//! so the first day lands under its weekday column.

use std::collections::BTreeSet;
use std::io::Write;

use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::config::WeekStart;
use crate::converter::HijriConverter;
use crate::date::HijriDate;
use crate::error::{CalendarError, Result};
use crate::events::{self, IslamicEvent};
use crate::months;

/// A single day cell in the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub gregorian_day: u32,
    pub hijri: HijriDate,
    pub is_today: bool,
    pub is_special_month: bool,
    pub events: Vec<&'static IslamicEvent>,
}

/// A Gregorian month with Hijri annotations.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// `None` = blank cell before the first day.
    pub cells: Vec<Option<CalendarDay>>,
    pub hijri_month_label: String,
    pub hijri_year_label: String,
    /// Observances of every Hijri month that appears in the grid.
    pub events: Vec<&'static IslamicEvent>,
    pub today_label: String,
}

/// One row of the CSV export.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: String,
    weekday: String,
    hijri_year: i32,
    hijri_month: u32,
    hijri_day: u32,
    hijri_month_name: &'a str,
    special_month: bool,
    events: String,
}

impl MonthView {
    /// Build the grid for a Gregorian month.
    ///
    /// # Arguments
    /// * `converter` - Converter used for every day
    /// * `year`, `month` - Gregorian month to display
    /// * `today` - Date flagged as today and used for the today label
    /// * `correction` - Moon sighting correction passed to every conversion
    /// * `week_start` - First column of the grid
    pub fn build(
        converter: &HijriConverter,
        year: i32,
        month: u32,
        today: NaiveDate,
        correction: i64,
        week_start: WeekStart,
    ) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::InvalidMonth { year, month })?;
        let days_in_month = days_in_month(first);

        let leading_blanks = (first.weekday().num_days_from_monday() + 7
            - week_start.weekday().num_days_from_monday())
            % 7;

        let mut cells: Vec<Option<CalendarDay>> = Vec::with_capacity(leading_blanks as usize + 31);
        cells.extend(std::iter::repeat_n(None, leading_blanks as usize));

        let mut hijri_months_in_view = BTreeSet::new();
        let mut first_hijri = None;
        let mut last_hijri = None;

        for date in first.iter_days().take(days_in_month as usize) {
            let hijri = converter.to_hijri(date, correction);

            first_hijri.get_or_insert(hijri);
            last_hijri = Some(hijri);
            hijri_months_in_view.insert(hijri.month());

            cells.push(Some(CalendarDay {
                date,
                gregorian_day: date.day(),
                hijri,
                is_today: date == today,
                is_special_month: months::is_special_month(hijri.month()),
                events: events::events_on(hijri.month(), hijri.day()),
            }));
        }

        let (hijri_month_label, hijri_year_label) = match (first_hijri, last_hijri) {
            (Some(first), Some(last)) => (month_label(&first, &last), year_label(&first, &last)),
            _ => (String::new(), String::new()),
        };

        // Stable sort keeps table order for events on the same day
        let mut view_events: Vec<&'static IslamicEvent> = hijri_months_in_view
            .iter()
            .flat_map(|m| events::events_for_month(*m))
            .collect();
        view_events.sort_by_key(|e| (e.hijri_month, e.hijri_day));

        let today_hijri = converter.to_hijri(today, correction);
        let today_label = format!(
            "{} {} {} / {}",
            today.day(),
            gregorian_month_name(today.month()),
            today.year(),
            today_hijri
        );

        debug!(
            year,
            month,
            cells = cells.len(),
            events = view_events.len(),
            "Built month view"
        );

        Ok(Self {
            year,
            month,
            month_name: gregorian_month_name(month),
            cells,
            hijri_month_label,
            hijri_year_label,
            events: view_events,
            today_label,
        })
    }

    /// Iterate over the day cells, skipping blanks.
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().flatten()
    }

    /// Cells grouped into weeks of seven; the last week may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<CalendarDay>]> {
        self.cells.chunks(7)
    }

    /// Write one CSV row per day.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        for day in self.days() {
            let names: Vec<&str> = day.events.iter().map(|e| e.name).collect();
            wtr.serialize(CsvRow {
                date: day.date.format("%Y-%m-%d").to_string(),
                weekday: day.date.format("%A").to_string(),
                hijri_year: day.hijri.year(),
                hijri_month: day.hijri.month(),
                hijri_day: day.hijri.day(),
                hijri_month_name: day.hijri.month_name(),
                special_month: day.is_special_month,
                events: names.join("; "),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Number of days in the Gregorian month starting at `first`.
fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };

    // Only the very last representable month has no successor
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

fn gregorian_month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or(months::UNKNOWN_MONTH)
}

fn month_label(first: &HijriDate, last: &HijriDate) -> String {
    if first.month() == last.month() {
        first.month_name().to_string()
    } else {
        format!("{} – {}", first.month_name(), last.month_name())
    }
}

fn year_label(first: &HijriDate, last: &HijriDate) -> String {
    if first.year() == last.year() {
        format!("{} H", first.year())
    } else {
        format!("{}–{} H", first.year(), last.year())
    }
}
