use std::fmt;

use serde::Serialize;

use crate::months::month_name;

/// A date in the Islamic (Hijri) calendar.
///
/// Month is always in 1..=12 and day in 1..=30. Values are only built
/// through [`HijriDate::new`], which enforces both bounds, or
/// [`HijriDate::clamped`], which forces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HijriDate {
    year: i32,
    month: u32,
    day: u32,
    month_name: &'static str,
}

impl HijriDate {
    /// Create a Hijri date, rejecting out-of-range month or day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            month_name: month_name(month),
        })
    }

    /// Create a Hijri date from a raw triple, clamping month and day into range.
    pub fn clamped(year: i32, month: i64, day: i64) -> Self {
        let month = month.clamp(1, 12) as u32;
        let day = day.clamp(1, 30) as u32;
        Self {
            year,
            month,
            day,
            month_name: month_name(month),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month_name(&self) -> &'static str {
        self.month_name
    }

    /// Whether `other` falls in the same Hijri month and year.
    pub fn same_month(&self, other: &HijriDate) -> bool {
        self.year == other.year && self.month == other.month
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} H", self.day, self.month_name, self.year)
    }
}
