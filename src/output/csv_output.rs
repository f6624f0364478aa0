//! Chunked CSV writing
//!
//! One writer serves one output group (`sub_num`). With splitting disabled
//! it produces a single `{sub_num}_output.csv`; with splitting enabled it
//! rolls to `{sub_num}_output_{chunk}.csv` every `rows_per_file` data rows,
//! chunk indexes starting at 0. Every file begins with a UTF-8 BOM and the
//! header row.
//!
//! The file handle is opened per row write and released immediately, so a
//! crash mid-run never loses more than the in-flight write.

use crate::output::OutputResult;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Writes rows into bounded-size CSV chunk files
pub struct CsvChunkWriter {
    folder: PathBuf,
    sub_num: usize,
    split: bool,
    rows_per_file: usize,
    header: Vec<String>,
    chunk_index: usize,
    rows_in_chunk: usize,
}

impl CsvChunkWriter {
    /// Creates the writer and its first file (header only, no rows yet)
    ///
    /// # Arguments
    ///
    /// * `folder` - Output folder (must exist)
    /// * `sub_num` - Output group number, used in file names
    /// * `split` - Whether to roll to a new chunk every `rows_per_file` rows
    /// * `rows_per_file` - Data rows per chunk when splitting
    /// * `header` - Header row written once per file
    ///
    /// # Returns
    ///
    /// * `Ok(CsvChunkWriter)` - Writer with its first file created
    /// * `Err(OutputError)` - Failed to create the first file
    pub fn new(
        folder: impl AsRef<Path>,
        sub_num: usize,
        split: bool,
        rows_per_file: usize,
        header: &[&str],
    ) -> OutputResult<Self> {
        let writer = Self {
            folder: folder.as_ref().to_path_buf(),
            sub_num,
            split,
            rows_per_file,
            header: header.iter().map(|column| column.to_string()).collect(),
            chunk_index: 0,
            rows_in_chunk: 0,
        };
        writer.start_chunk()?;
        Ok(writer)
    }

    /// Path of the chunk currently being written
    fn chunk_path(&self) -> PathBuf {
        if self.split {
            self.folder
                .join(format!("{}_output_{}.csv", self.sub_num, self.chunk_index))
        } else {
            self.folder.join(format!("{}_output.csv", self.sub_num))
        }
    }

    /// Creates the current chunk file and writes the BOM and header row
    fn start_chunk(&self) -> OutputResult<()> {
        let mut file = File::create(self.chunk_path())?;
        file.write_all(UTF8_BOM)?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(&self.header)?;
        writer.flush()?;
        Ok(())
    }

    /// Appends one row, rolling to the next chunk at the threshold
    ///
    /// # Arguments
    ///
    /// * `row` - The row values, one per header column
    pub fn write_row(&mut self, row: &[String]) -> OutputResult<()> {
        if self.split && self.rows_in_chunk == self.rows_per_file {
            self.chunk_index += 1;
            self.rows_in_chunk = 0;
            self.start_chunk()?;
        }

        let file = OpenOptions::new().append(true).open(self.chunk_path())?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;

        self.rows_in_chunk += 1;
        Ok(())
    }
}
