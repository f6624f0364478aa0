//! Roster loading
//!
//! The roster is a CSV table naming the accounts to crawl. One column holds
//! the handles (optionally `@`-prefixed); every column whose header contains
//! the configured tag prefix contributes to the account's pipe-joined tag
//! string, in declared column order.

use crate::config::types::RosterConfig;
use crate::RosterError;
use std::path::Path;

/// One account from the roster: its handle and its tag string
///
/// Carrying the handle and the tags in one entry keeps the positional
/// pairing between them intact no matter which rows are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Account handle with any leading `@` removed
    pub handle: String,

    /// Pipe-joined tag cells for this account (empty cells stay empty)
    pub tags: String,
}

/// Loads the roster CSV from the given path
///
/// Rows with an empty handle cell are skipped whole, tags included.
///
/// # Arguments
///
/// * `path` - Path to the roster CSV file
/// * `config` - Roster column configuration
///
/// # Returns
///
/// * `Ok(Vec<RosterEntry>)` - Accounts in roster row order
/// * `Err(RosterError)` - Unreadable file, missing handle column, or an
///   empty roster
pub fn load_roster(path: &Path, config: &RosterConfig) -> Result<Vec<RosterEntry>, RosterError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let handle_index = headers
        .iter()
        .position(|header| header.trim() == config.handle_column)
        .ok_or_else(|| RosterError::MissingHandleColumn(config.handle_column.clone()))?;

    // Tag columns in declared order
    let tag_indexes: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.contains(&config.tag_column_prefix))
        .map(|(index, _)| index)
        .collect();

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;

        let handle = record
            .get(handle_index)
            .unwrap_or("")
            .trim()
            .trim_start_matches('@')
            .trim();
        if handle.is_empty() {
            continue;
        }

        let tags = tag_indexes
            .iter()
            .map(|&index| record.get(index).unwrap_or("").trim())
            .collect::<Vec<_>>()
            .join("|");

        entries.push(RosterEntry {
            handle: handle.to_string(),
            tags,
        });
    }

    if entries.is_empty() {
        return Err(RosterError::Empty);
    }

    Ok(entries)
}
