//! Sheet import/export.
//!
//! Formats:
//! - CSV: raw values in, display (or raw) values out
//! - JSON: full snapshot of raw and display values
//! - Markdown: display values out only

mod csv;
mod json;
mod md;

pub use csv::{CsvValues, parse_csv, parse_csv_content, write_csv, write_csv_content};
pub use json::{parse_json_content, write_json_content};
pub use md::{write_markdown, write_markdown_content};

use crate::error::{CoreError, Result};
use std::path::Path;

/// Largest sheet file that will be read.
pub const MAX_SHEET_FILE_BYTES: u64 = 16 * 1_048_576; // 16 MiB

pub(crate) fn read_sheet_file(path: &Path) -> Result<String> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_SHEET_FILE_BYTES {
        return Err(CoreError::FileTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max: MAX_SHEET_FILE_BYTES,
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// File formats a sheet can be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Markdown,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Format::Csv),
            "json" => Some(Format::Json),
            "md" | "markdown" => Some(Format::Markdown),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Markdown => "markdown",
        }
    }
}
