//! Configuration module for Tweetline
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and loading the CSV roster of accounts to crawl.
//!
//! # Example
//!
//! ```no_run
//! use tweetline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Output folder: {}", config.output.folder);
//! ```

mod parser;
mod roster;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, OutputConfig, RosterConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export roster loading
pub use roster::{load_roster, RosterEntry};
