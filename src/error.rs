use thiserror::Error;

/// Errors from the fallible surfaces around the converter.
///
/// Conversion itself never fails; these cover user input, export and
/// configuration.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Invalid Gregorian date: {year}-{month:02}-{day:02}")]
    InvalidGregorianDate { year: i32, month: u32, day: u32 },
    #[error("Invalid Gregorian month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Invalid Hijri date: {year}-{month:02}-{day:02}")]
    InvalidHijriDate { year: i32, month: u32, day: u32 },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
