//! Gregorian to Hijri conversion.
//!
//! The converter asks an optional native [`HijriCalendar`] first and falls
//! back to the tabular arithmetic calendar whenever the native calendar is
//! absent or cannot answer. Every operation is total: callers always get a
//! plausible value, never an error.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::arithmetic;
use crate::config::CalendarConfig;
use crate::date::HijriDate;
use crate::events::{self, IslamicEvent};
use crate::months;
use crate::traits::{Clock, HijriCalendar};

/// Month length used when no calendar can answer.
pub const DEFAULT_MONTH_LENGTH: u32 = 30;

/// How far (in days) the native calendar may sit from the tabular estimate
/// when searching for a Gregorian date.
const NATIVE_SEARCH_DAYS: i64 = 3;

/// Converts Gregorian dates to Hijri dates.
#[derive(Clone)]
pub struct HijriConverter {
    native: Option<Arc<dyn HijriCalendar>>,
}

impl HijriConverter {
    pub fn new(native: Option<Arc<dyn HijriCalendar>>) -> Self {
        Self { native }
    }

    /// A converter that only uses the tabular arithmetic calendar.
    pub fn arithmetic() -> Self {
        Self { native: None }
    }

    /// A converter backed by the given native calendar.
    pub fn with_calendar<C: HijriCalendar + 'static>(calendar: C) -> Self {
        Self {
            native: Some(Arc::new(calendar)),
        }
    }

    /// Build a converter from the `[calendar]` configuration section.
    pub fn from_config(config: &CalendarConfig) -> Self {
        if config.use_native {
            Self::default()
        } else {
            Self::arithmetic()
        }
    }

    /// Name of the native calendar, if one is installed.
    pub fn native_name(&self) -> Option<&'static str> {
        self.native.as_ref().map(|native| native.name())
    }

    /// Convert a Gregorian date to a Hijri date.
    ///
    /// `correction` shifts the input by that many days before conversion to
    /// account for local moon sighting (typically -1, 0 or +1).
    pub fn to_hijri(&self, date: NaiveDate, correction: i64) -> HijriDate {
        let adjusted = shift(date, correction);
        self.native_convert(adjusted)
            .unwrap_or_else(|| arithmetic_convert(adjusted))
    }

    /// Convert today's date as reported by `clock`.
    pub fn to_hijri_today<C: Clock + ?Sized>(&self, clock: &C, correction: i64) -> HijriDate {
        self.to_hijri(clock.today(), correction)
    }

    /// Number of days (29 or 30) in a Hijri month.
    pub fn month_length(&self, hijri_year: i32, hijri_month: u32) -> u32 {
        if let Some(native) = &self.native {
            match native.try_month_length(hijri_year, hijri_month) {
                Some(length) if (29..=30).contains(&length) => return length,
                Some(length) => warn!(
                    calendar = native.name(),
                    hijri_year, hijri_month, length, "Native calendar returned an impossible month length"
                ),
                None => trace!(
                    calendar = native.name(),
                    hijri_year, hijri_month, "Native month length unavailable"
                ),
            }
        }

        arithmetic::month_length(hijri_year, hijri_month).unwrap_or_else(|| {
            debug!(hijri_year, hijri_month, "No month length available, using default");
            DEFAULT_MONTH_LENGTH
        })
    }

    /// Convert a Hijri date back to the Gregorian calendar.
    ///
    /// Within the native calendar's range the result agrees with
    /// [`HijriConverter::to_hijri`] without correction. Days the native
    /// calendar does not have (day 30 of a 29-day month) give `None`.
    pub fn to_gregorian(&self, hijri_year: i32, hijri_month: u32, hijri_day: u32) -> Option<NaiveDate> {
        let target = HijriDate::new(hijri_year, hijri_month, hijri_day)?;

        let Some(native) = &self.native else {
            return arithmetic::to_gregorian(hijri_year, hijri_month, hijri_day);
        };

        if let Some(length) = native.try_month_length(hijri_year, hijri_month)
            && hijri_day > length
        {
            debug!(hijri_year, hijri_month, hijri_day, length, "Day beyond native month length");
            return None;
        }

        let estimate = arithmetic::julian_day_from_hijri(hijri_year, hijri_month, hijri_day);
        let found = (-NATIVE_SEARCH_DAYS..=NATIVE_SEARCH_DAYS)
            .filter_map(|offset| arithmetic::gregorian_from_julian_day(estimate + offset))
            .find(|date| native.try_convert(*date) == Some(target));
        if found.is_some() {
            return found;
        }

        // The arithmetic answer only stands where the native calendar is silent
        arithmetic::to_gregorian(hijri_year, hijri_month, hijri_day)
            .filter(|date| native.try_convert(*date).is_none())
    }

    /// Return today's Hijri date if it is the first day of a new Hijri month.
    pub fn new_month_started(&self, date: NaiveDate, correction: i64) -> Option<HijriDate> {
        let current = self.to_hijri(date, correction);
        match date.pred_opt() {
            Some(previous) => {
                let previous = self.to_hijri(previous, correction);
                month_changed(&previous, &current).then_some(current)
            }
            None => (current.day() == 1).then_some(current),
        }
    }

    /// Observances in a Hijri month, in table order.
    pub fn events_for_month(&self, hijri_month: u32) -> Vec<&'static IslamicEvent> {
        events::events_for_month(hijri_month)
    }

    /// Check if a Hijri month gets visual emphasis.
    pub fn is_special_month(&self, hijri_month: u32) -> bool {
        months::is_special_month(hijri_month)
    }

    /// Name of a Hijri month, or "Unknown".
    pub fn month_name(&self, month: u32) -> &'static str {
        months::month_name(month)
    }

    fn native_convert(&self, date: NaiveDate) -> Option<HijriDate> {
        let native = self.native.as_ref()?;
        let result = native.try_convert(date);
        if result.is_none() {
            trace!(calendar = native.name(), %date, "Native calendar unavailable, using arithmetic");
        }
        result
    }
}

impl Default for HijriConverter {
    #[cfg(feature = "umm-al-qura")]
    fn default() -> Self {
        Self::with_calendar(crate::traits::UmmAlQuraCalendar::new())
    }

    #[cfg(not(feature = "umm-al-qura"))]
    fn default() -> Self {
        Self::arithmetic()
    }
}

impl fmt::Debug for HijriConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HijriConverter")
            .field("native", &self.native_name())
            .finish()
    }
}

/// Whether two consecutive Hijri dates fall in different months.
pub fn month_changed(previous: &HijriDate, current: &HijriDate) -> bool {
    !previous.same_month(current)
}

/// Shift a date by `days`, keeping the original date if the result is not
/// representable.
fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    if days == 0 {
        return date;
    }
    chrono::Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or_else(|| {
            debug!(%date, days, "Correction out of range, ignoring it");
            date
        })
}

fn arithmetic_convert(date: NaiveDate) -> HijriDate {
    let (year, month, day) = arithmetic::convert(date);
    if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        warn!(%date, year, month, day, "Arithmetic conversion out of range, clamping");
    }
    HijriDate::clamped(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockCalendar;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== Arithmetic Path Tests ====================

    #[test]
    fn test_arithmetic_new_year_1445() {
        let converter = HijriConverter::arithmetic();
        let hijri = converter.to_hijri(date(2023, 7, 19), 0);
        assert_eq!((hijri.year(), hijri.month(), hijri.day()), (1445, 1, 1));
        assert_eq!(hijri.month_name(), "Muharram");
    }

    #[test]
    fn test_correction_shifts_input() {
        let converter = HijriConverter::arithmetic();
        assert_eq!(
            converter.to_hijri(date(2023, 7, 18), 1),
            converter.to_hijri(date(2023, 7, 19), 0)
        );
        assert_eq!(
            converter.to_hijri(date(2023, 7, 20), -1),
            converter.to_hijri(date(2023, 7, 19), 0)
        );
    }

    #[test]
    fn test_huge_correction_is_ignored() {
        let converter = HijriConverter::arithmetic();
        let d = date(2024, 3, 11);
        assert_eq!(converter.to_hijri(d, i64::MAX), converter.to_hijri(d, 0));
        assert_eq!(converter.to_hijri(d, i64::MIN), converter.to_hijri(d, 0));
    }

    #[test]
    fn test_extreme_dates_do_not_panic() {
        let converter = HijriConverter::arithmetic();
        for d in [NaiveDate::MIN, NaiveDate::MAX] {
            let hijri = converter.to_hijri(d, 1);
            assert!((1..=12).contains(&hijri.month()));
            assert!((1..=30).contains(&hijri.day()));
        }
    }

    // ==================== Native Path Tests ====================

    #[test]
    fn test_native_answer_preferred() {
        let converter = HijriConverter::with_calendar(MockCalendar::returning(1446, 1, 1));
        let hijri = converter.to_hijri(date(2024, 7, 7), 0);
        assert_eq!((hijri.year(), hijri.month(), hijri.day()), (1446, 1, 1));
    }

    #[test]
    fn test_native_receives_corrected_date() {
        let calendar = MockCalendar::returning(1446, 1, 1);
        let converter = HijriConverter::with_calendar(calendar.clone());
        converter.to_hijri(date(2024, 7, 7), -1);
        assert_eq!(calendar.requests(), vec![date(2024, 7, 6)]);
    }

    #[test]
    fn test_unavailable_native_falls_back() {
        let calendar = MockCalendar::unavailable();
        let converter = HijriConverter::with_calendar(calendar.clone());
        let hijri = converter.to_hijri(date(2023, 7, 19), 0);
        assert_eq!(hijri, HijriConverter::arithmetic().to_hijri(date(2023, 7, 19), 0));
        assert_eq!(calendar.request_count(), 1);
    }

    #[test]
    fn test_out_of_range_native_answer_falls_back() {
        let converter = HijriConverter::with_calendar(MockCalendar::returning(1446, 14, 40));
        let hijri = converter.to_hijri(date(2024, 3, 11), 0);
        assert_eq!((hijri.year(), hijri.month(), hijri.day()), (1445, 9, 1));
    }

    // ==================== Month Length Tests ====================

    #[test]
    fn test_month_length_from_native() {
        let converter =
            HijriConverter::with_calendar(MockCalendar::unavailable().with_month_length(29));
        assert_eq!(converter.month_length(1445, 1), 29);
    }

    #[test]
    fn test_month_length_rejects_impossible_native_answer() {
        let converter =
            HijriConverter::with_calendar(MockCalendar::unavailable().with_month_length(31));
        assert_eq!(converter.month_length(1446, 2), 29);
    }

    #[test]
    fn test_month_length_arithmetic() {
        let converter = HijriConverter::arithmetic();
        assert_eq!(converter.month_length(1445, 9), 30);
        assert_eq!(converter.month_length(1445, 10), 29);
        assert_eq!(converter.month_length(1445, 12), 30);
        assert_eq!(converter.month_length(1446, 12), 29);
    }

    #[test]
    fn test_month_length_default_for_invalid_month() {
        let converter = HijriConverter::with_calendar(MockCalendar::unavailable());
        assert_eq!(converter.month_length(1445, 0), DEFAULT_MONTH_LENGTH);
        assert_eq!(converter.month_length(1445, 13), DEFAULT_MONTH_LENGTH);
    }

    // ==================== Inverse Tests ====================

    #[test]
    fn test_to_gregorian_arithmetic() {
        let converter = HijriConverter::arithmetic();
        assert_eq!(converter.to_gregorian(1445, 9, 1), Some(date(2024, 3, 11)));
        assert_eq!(converter.to_gregorian(1445, 13, 1), None);
    }

    #[test]
    fn test_to_gregorian_uses_native_when_it_matches() {
        // The mock maps every date to 1 Muharram 1446, so the earliest
        // date in the search window wins.
        let converter = HijriConverter::with_calendar(MockCalendar::returning(1446, 1, 1));
        let estimate = arithmetic::to_gregorian(1446, 1, 1).unwrap();
        let found = converter.to_gregorian(1446, 1, 1).unwrap();
        assert_eq!(found, estimate - chrono::Duration::days(NATIVE_SEARCH_DAYS));
    }

    #[test]
    fn test_to_gregorian_rejects_day_beyond_native_month() {
        let converter =
            HijriConverter::with_calendar(MockCalendar::unavailable().with_month_length(29));
        assert_eq!(converter.to_gregorian(1445, 9, 30), None);
        assert_eq!(
            converter.to_gregorian(1445, 9, 29),
            arithmetic::to_gregorian(1445, 9, 29)
        );
    }

    #[test]
    fn test_to_gregorian_never_contradicts_native() {
        // Every date converts natively, but never to 15 Safar 1446
        let converter = HijriConverter::with_calendar(MockCalendar::returning(1446, 1, 1));
        assert_eq!(converter.to_gregorian(1446, 2, 15), None);
    }

    // ==================== Month Boundary Tests ====================

    #[test]
    fn test_new_month_started_on_first_day() {
        let converter = HijriConverter::arithmetic();
        let started = converter.new_month_started(date(2024, 3, 11), 0).unwrap();
        assert_eq!((started.month(), started.day()), (9, 1));
    }

    #[test]
    fn test_new_month_not_started_mid_month() {
        let converter = HijriConverter::arithmetic();
        assert_eq!(converter.new_month_started(date(2024, 3, 12), 0), None);
    }

    #[test]
    fn test_new_month_respects_correction() {
        let converter = HijriConverter::arithmetic();
        assert!(converter.new_month_started(date(2024, 3, 10), 1).is_some());
        assert!(converter.new_month_started(date(2024, 3, 11), 1).is_none());
    }

    #[test]
    fn test_month_changed() {
        let a = HijriDate::new(1445, 8, 29).unwrap();
        let b = HijriDate::new(1445, 9, 1).unwrap();
        assert!(month_changed(&a, &b));
        assert!(!month_changed(&b, &b));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_lookups_delegate_to_tables() {
        let converter = HijriConverter::arithmetic();
        assert_eq!(converter.month_name(9), "Ramadan");
        assert_eq!(converter.month_name(0), "Unknown");
        assert!(converter.is_special_month(7));
        assert!(!converter.is_special_month(8));
        assert!(converter.events_for_month(12).iter().any(|e| e.hijri_day == 10));
    }

    #[test]
    fn test_from_config() {
        let config = CalendarConfig {
            correction: 0,
            use_native: false,
        };
        assert_eq!(HijriConverter::from_config(&config).native_name(), None);
    }

    #[test]
    fn test_debug_shows_native_name() {
        let converter = HijriConverter::with_calendar(MockCalendar::unavailable());
        assert!(format!("{:?}", converter).contains("mock"));
    }

    // ==================== Property-Based Tests ====================

    #[cfg(test)]
    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn any_date() -> impl Strategy<Value = NaiveDate> {
            (1i32..3_650_000).prop_map(|days| NaiveDate::from_num_days_from_ce_opt(days).unwrap())
        }

        proptest! {
            #[test]
            fn result_always_in_range(d in any_date(), correction in -2i64..=2) {
                let hijri = HijriConverter::arithmetic().to_hijri(d, correction);
                prop_assert!((1..=12).contains(&hijri.month()));
                prop_assert!((1..=30).contains(&hijri.day()));
                prop_assert!(!hijri.month_name().is_empty());
            }

            #[test]
            fn conversion_is_idempotent(d in any_date(), correction in -1i64..=1) {
                let converter = HijriConverter::arithmetic();
                prop_assert_eq!(converter.to_hijri(d, correction), converter.to_hijri(d, correction));
            }

            #[test]
            fn plus_one_is_next_hijri_day(d in any_date()) {
                let converter = HijriConverter::arithmetic();
                let base = converter.to_hijri(d, 0);
                let plus = converter.to_hijri(d, 1);
                if plus.same_month(&base) {
                    prop_assert_eq!(plus.day(), base.day() + 1);
                } else {
                    prop_assert_eq!(plus.day(), 1);
                    prop_assert_eq!(base.day(), converter.month_length(base.year(), base.month()));
                }
            }

            #[test]
            fn minus_one_is_previous_hijri_day(d in any_date()) {
                let converter = HijriConverter::arithmetic();
                let base = converter.to_hijri(d, 0);
                let minus = converter.to_hijri(d, -1);
                if minus.same_month(&base) {
                    prop_assert_eq!(minus.day() + 1, base.day());
                } else {
                    prop_assert_eq!(base.day(), 1);
                    prop_assert_eq!(minus.day(), converter.month_length(minus.year(), minus.month()));
                }
                prop_assert_ne!(converter.to_hijri(d, 1), minus);
            }

            #[test]
            fn month_length_always_29_or_30(year in -1000i32..3000, month in 0u32..20) {
                let length = HijriConverter::arithmetic().month_length(year, month);
                prop_assert!(length == 29 || length == 30);
            }
        }
    }
}
