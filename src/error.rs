//! Error types for bell-schedule.
//!
//! Nothing here reaches the caller of a resolution: feed failures are
//! logged and degrade to an unavailable status. Config errors surface at
//! startup only.

use thiserror::Error;

/// Errors from a calendar feed collaborator.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error reading the feed
    #[error("I/O error reading calendar feed: {0}")]
    Io(#[from] std::io::Error),

    /// Feed body is not a JSON array of calendar rows
    #[error("Invalid calendar JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other collaborator failure
    #[error("Calendar feed unavailable: {0}")]
    Unavailable(String),
}

/// Errors loading or validating engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error reading the config file
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// Config is not valid JSON for `EngineConfig`
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Timezone is not an IANA name
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Cutoff minute is outside the day
    #[error("Cutoff minute {0} is outside 0..1440")]
    InvalidCutoff(u16),
}
