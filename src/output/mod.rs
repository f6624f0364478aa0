//! Output module for projecting tweets into CSV rows and writing them
//!
//! This module handles:
//! - Flattening one enriched tweet into a fixed-width output row
//! - Writing rows into bounded-size CSV chunk files

mod csv_output;
mod row;

pub use csv_output::CsvChunkWriter;
pub use row::{project_row, OUTPUT_COLUMNS};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
