//! Tracker configuration.
//!
//! The external contract is a handful of environment variables naming the
//! remote snapshot source, the local fallback file, and the refresh
//! interval. CLI flags override the environment.

use std::path::PathBuf;
use std::time::Duration;

use almanac::{CalendarDate, Era, Month};
use tracing::warn;

/// Environment variable naming the remote snapshot URL.
pub const SOURCE_URL_ENV: &str = "TRACKER_SOURCE_URL";

/// Environment variable naming the local fallback snapshot file.
pub const FALLBACK_PATH_ENV: &str = "TRACKER_FALLBACK_PATH";

/// Environment variable setting the refresh interval in seconds.
pub const REFRESH_SECS_ENV: &str = "TRACKER_REFRESH_SECS";

/// Default local fallback file, next to the working directory.
pub const DEFAULT_FALLBACK_PATH: &str = "default-data.json";

/// Default refresh interval.
pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Where snapshots come from and how often to re-fetch them.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Remote source to try first; `None` goes straight to the fallback.
    pub source_url: Option<String>,
    /// Local snapshot used when the remote source fails.
    pub fallback_path: PathBuf,
    /// Interval between refreshes in watch mode.
    pub refresh_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            source_url: None,
            fallback_path: PathBuf::from(DEFAULT_FALLBACK_PATH),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
        }
    }
}

impl TrackerConfig {
    /// Builds a configuration from environment variables, with defaults for
    /// anything unset. An unparseable refresh interval falls back to the
    /// default with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            if !url.is_empty() {
                config.source_url = Some(url);
            }
        }
        if let Ok(path) = std::env::var(FALLBACK_PATH_ENV) {
            if !path.is_empty() {
                config.fallback_path = PathBuf::from(path);
            }
        }
        if let Ok(secs) = std::env::var(REFRESH_SECS_ENV) {
            match secs.parse::<u64>() {
                Ok(secs) => config.refresh_interval = Duration::from_secs(secs),
                Err(_) => warn!(
                    value = %secs,
                    "ignoring unparseable {}, using {}s",
                    REFRESH_SECS_ENV,
                    DEFAULT_REFRESH_SECS
                ),
            }
        }

        config
    }
}

/// Parses a selected-date CLI argument of the form `327-Sep-13`.
///
/// The month accepts either Veil spelling; the era is taken from the
/// snapshot's current date since the argument does not carry one. Returns
/// `None` for anything unparseable or out of range.
pub fn parse_date_arg(arg: &str, era: Era) -> Option<CalendarDate> {
    let mut parts = arg.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month = Month::lookup(parts.next()?)?;
    let day: u8 = parts.next()?.parse().ok()?;
    CalendarDate::new(year, era, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac::Weekday;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert!(config.source_url.is_none());
        assert_eq!(config.fallback_path, PathBuf::from(DEFAULT_FALLBACK_PATH));
        assert_eq!(
            config.refresh_interval,
            Duration::from_secs(DEFAULT_REFRESH_SECS)
        );
    }

    #[test]
    fn test_parse_date_arg() {
        let date = parse_date_arg("327-Sep-13", Era::AD).unwrap();
        assert_eq!(date.year, 327);
        assert_eq!(date.month, Month::Sep);
        assert_eq!(date.day, 13);
        assert_eq!(date.era, Era::AD);
    }

    #[test]
    fn test_parse_date_arg_veil() {
        let date = parse_date_arg("327-Veil-1", Era::AD).unwrap();
        assert_eq!(date.month, Month::Vell);
        assert_eq!(date.weekday, Weekday::RestDay);
    }

    #[test]
    fn test_parse_date_arg_rejects_garbage() {
        assert!(parse_date_arg("", Era::AD).is_none());
        assert!(parse_date_arg("327-Sep", Era::AD).is_none());
        assert!(parse_date_arg("327-Smarch-13", Era::AD).is_none());
        assert!(parse_date_arg("327-Sep-29", Era::AD).is_none());
        assert!(parse_date_arg("year-Sep-13", Era::AD).is_none());
    }
}
