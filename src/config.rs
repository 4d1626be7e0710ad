use std::path::{Path, PathBuf};

use chrono::Weekday;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub calendar: CalendarConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    /// Day offset for local moon sighting (-1, 0 or +1 in practice)
    pub correction: i64,
    /// Consult the native (Umm al-Qura) calendar before the arithmetic one
    pub use_native: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            correction: 0,
            use_native: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    pub week_start: WeekStart,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Load configuration, layering an explicit file over the default locations.
    pub fn load_with(extra_file: Option<&Path>) -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hijri-calendar");

        let mut builder = Self::defaults()?
            // 2. Load from local config file (optional, lowest priority)
            .add_source(File::from(PathBuf::from("config.toml")).required(false))
            // 3. Load from user config directory (optional, overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false));

        // 4. Explicit file from the command line (required when given)
        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // 5. Load from Environment variables (HIJRI__CALENDAR__CORRECTION=...)
        let builder = builder.add_source(Environment::with_prefix("HIJRI").separator("__"));

        let s = builder.build()?;
        Ok(s.try_deserialize()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        // 1. Default values
        Ok(Config::builder()
            // Calendar
            .set_default("calendar.correction", 0)?
            .set_default("calendar.use_native", true)?
            // Display
            .set_default("display.week_start", "monday")?)
    }
}
