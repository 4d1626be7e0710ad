//! Hijri Calendar Library
//!
//! This module exposes the Gregorian to Hijri converter, the observance
//! table and the annotated month grid used by the `hijri-calendar` binary.

pub mod arithmetic;
pub mod calendar;
pub mod config;
pub mod converter;
pub mod date;
pub mod error;
pub mod events;
pub mod months;
pub mod traits;

// Re-export commonly used types
pub use calendar::{CalendarDay, MonthView};
pub use config::{AppConfig, CalendarConfig, DisplayConfig, WeekStart};
pub use converter::{DEFAULT_MONTH_LENGTH, HijriConverter, month_changed};
pub use date::HijriDate;
pub use error::CalendarError;
pub use events::{ISLAMIC_EVENTS, IslamicEvent, events_for_month, events_on};
pub use months::{HIJRI_MONTH_NAMES, UNKNOWN_MONTH, is_special_month, month_name};
#[cfg(feature = "umm-al-qura")]
pub use traits::UmmAlQuraCalendar;
pub use traits::{Clock, HijriCalendar, MockCalendar, MockClock, SystemClock};
