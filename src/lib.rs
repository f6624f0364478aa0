//! Tweetline: a roster-driven tweet archive crawler
//!
//! This crate crawls the timelines of a tagged roster of Twitter accounts
//! through the API v2 full-archive search, reconciles retweeted and quoted
//! references delivered out-of-band, and writes the enriched records as
//! chunked CSV files.

pub mod client;
pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Tweetline operations
#[derive(Debug, Error)]
pub enum TweetlineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("API request to {url} returned {status}: {body}")]
    Api {
        url: String,
        status: u16,
        body: String,
    },

    #[error("User lookup returned {returned} accounts for {requested} requested handles")]
    UserCountMismatch { requested: usize, returned: usize },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Roster-input errors
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse roster CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster is missing the '{0}' column")]
    MissingHandleColumn(String),

    #[error("Roster contains no usable accounts")]
    Empty,
}

/// Result type alias for Tweetline operations
pub type Result<T> = std::result::Result<T, TweetlineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for roster operations
pub type RosterResult<T> = std::result::Result<T, RosterError>;

// Re-export commonly used types
pub use config::{Config, RosterEntry};
pub use crawler::{CrawlOptions, Coordinator};
