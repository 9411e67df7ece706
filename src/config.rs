//! Engine configuration.
//!
//! Loaded from a camelCase JSON object; every field has a default, so an
//! empty object `{}` is a valid config.
//!
//! ```json
//! {
//!   "timezone": "America/New_York",
//!   "cutoffMinute": 885,
//!   "cacheTtlSecs": 300,
//!   "pollIntervalSecs": 60,
//!   "keepLastOnFailure": false
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::{TimeResolver, DEFAULT_CUTOFF_MINUTE, DEFAULT_TIMEZONE};
use crate::error::ConfigError;
use crate::models::{Minute, MINUTES_PER_DAY};

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// IANA name of the school timezone.
    pub timezone: String,
    /// Minute of day at which the lookup date rolls over to tomorrow.
    pub cutoff_minute: Minute,
    /// How long a fetched calendar snapshot is reused (seconds).
    pub cache_ttl_secs: u64,
    /// How often the driver re-resolves (seconds).
    pub poll_interval_secs: u64,
    /// Keep serving the last good calendar when a fetch fails, instead of
    /// reporting the schedule as unavailable.
    pub keep_last_on_failure: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.name().to_string(),
            cutoff_minute: DEFAULT_CUTOFF_MINUTE,
            cache_ttl_secs: 300,
            poll_interval_secs: 60,
            keep_last_on_failure: false,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the timezone name and cutoff.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tz()?;
        if self.cutoff_minute >= MINUTES_PER_DAY {
            return Err(ConfigError::InvalidCutoff(self.cutoff_minute));
        }
        Ok(())
    }

    /// The parsed school timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    /// A time resolver for this config.
    pub fn time_resolver(&self) -> Result<TimeResolver, ConfigError> {
        self.validate()?;
        Ok(TimeResolver::new(self.tz()?, self.cutoff_minute))
    }

    /// Snapshot reuse window.
    pub fn cache_ttl(&self) -> chrono::Duration {
        let secs = i64::try_from(self.cache_ttl_secs).unwrap_or(i64::MAX);
        chrono::Duration::seconds(secs.min(i64::MAX / 1000))
    }

    /// Driver polling period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.timezone, "America/New_York");
        assert_eq!(config.cutoff_minute, 885);
        assert_eq!(config.cache_ttl(), chrono::Duration::minutes(5));
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert!(!config.keep_last_on_failure);
    }

    #[test]
    fn test_partial_override() {
        let config =
            EngineConfig::from_json_str(r#"{"timezone":"America/Chicago","cutoffMinute":900}"#)
                .unwrap();
        let resolver = config.time_resolver().unwrap();
        assert_eq!(resolver.timezone(), chrono_tz::America::Chicago);
        assert_eq!(resolver.cutoff_minute(), 900);
        assert_eq!(config.poll_interval_secs, 60);
    }

    #[test]
    fn test_unknown_timezone() {
        let err = EngineConfig::from_json_str(r#"{"timezone":"Mars/Olympus"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTimezone(ref tz) if tz == "Mars/Olympus"));
    }

    #[test]
    fn test_invalid_cutoff() {
        let err = EngineConfig::from_json_str(r#"{"cutoffMinute":1440}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCutoff(1440)));
    }

    #[test]
    fn test_bad_json() {
        let err = EngineConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cacheTtlSecs": 30, "keepLastOnFailure": true}}"#).unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.cache_ttl_secs, 30);
        assert!(config.keep_last_on_failure);

        let missing = EngineConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
