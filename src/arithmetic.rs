//! Tabular (civil) Hijri calendar arithmetic.
//!
//! Works through Julian Day Numbers: Gregorian -> JDN -> Hijri and back.
//! The tabular calendar uses a 30-year cycle of 10631 days with 11 leap
//! years; odd months have 30 days, even months 29, and Dhu al-Hijjah gains
//! a day in leap years. It tracks observational and Umm al-Qura calendars
//! to within a day or two, never exactly.

use chrono::{Datelike, NaiveDate};

/// JDN of 1 Muharram 1 AH in the civil epoch (16 July 622 Julian).
pub const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Days in one 30-year tabular cycle.
pub const CYCLE_DAYS: i64 = 10_631;

/// Offset between chrono's day count from 0001-01-01 (day 1) and the JDN.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Convert a proleptic Gregorian date to a Julian Day Number.
pub fn julian_day(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Convert a Julian Day Number back to a Gregorian date.
pub fn gregorian_from_julian_day(jdn: i64) -> Option<NaiveDate> {
    let days = i32::try_from(jdn - JDN_CE_OFFSET).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

/// Convert a Julian Day Number to a raw `(year, month, day)` Hijri triple.
///
/// The result is not clamped.
pub fn hijri_from_julian_day(jdn: i64) -> (i32, i64, i64) {
    let l = jdn - HIJRI_EPOCH_JDN + 10632;
    let n = (l - 1).div_euclid(CYCLE_DAYS);
    let l = l - CYCLE_DAYS * n + 354;

    // Position within the cycle's leap pattern
    let j = (10985 - l).div_euclid(5316) * (50 * l).div_euclid(17719)
        + l.div_euclid(5670) * (43 * l).div_euclid(15238);

    let l = l
        - (30 - j).div_euclid(15) * (17719 * j).div_euclid(50)
        - j.div_euclid(16) * (15238 * j).div_euclid(43)
        + 29;

    let month = (24 * l).div_euclid(709);
    let day = l - (709 * month).div_euclid(24);
    let year = 30 * n + j - 30;

    (year as i32, month, day)
}

/// Convert a Hijri date to its Julian Day Number.
pub fn julian_day_from_hijri(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    (11 * year + 3).div_euclid(30) + 354 * year + 30 * month - (month - 1).div_euclid(2) + day
        + HIJRI_EPOCH_JDN
        - 385
}

/// Convert a Gregorian date to a raw Hijri triple via the tabular calendar.
pub fn convert(date: NaiveDate) -> (i32, i64, i64) {
    hijri_from_julian_day(julian_day(date.year(), date.month(), date.day()))
}

/// Convert a Hijri date back to the Gregorian calendar.
///
/// Returns `None` if the month or day is out of range for the tabular
/// calendar, or the result is outside chrono's representable dates.
pub fn to_gregorian(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let length = month_length(year, month)?;
    if day == 0 || day > length {
        return None;
    }
    gregorian_from_julian_day(julian_day_from_hijri(year, month, day))
}

/// Check if a Hijri year is a leap year (355 days) in the tabular calendar.
pub fn is_leap_year(year: i32) -> bool {
    (14 + 11 * i64::from(year)).rem_euclid(30) < 11
}

/// Number of days in a Hijri month of the tabular calendar.
pub fn month_length(year: i32, month: u32) -> Option<u32> {
    match month {
        12 if is_leap_year(year) => Some(30),
        1..=12 if month % 2 == 1 => Some(30),
        1..=12 => Some(29),
        _ => None,
    }
}

/// Number of days in a Hijri year of the tabular calendar.
pub fn year_length(year: i32) -> u32 {
    if is_leap_year(year) { 355 } else { 354 }
}
