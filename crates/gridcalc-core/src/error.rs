//! Error types for Gridcalc core.

use gridcalc_engine::engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, editing, loading or saving a sheet.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("CSV file is empty")]
    EmptyCsv,

    #[error("Invalid edit '{0}': expected REF=VALUE")]
    InvalidEdit(String),

    #[error("Cannot read {0} sheets")]
    UnsupportedImport(&'static str),

    #[error("Refusing to read {}: file too large ({size} bytes, max {max})", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
