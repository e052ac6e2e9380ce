//! Error types for the engine.
//!
//! [`ErrorCode`] is a per-cell result: it ends up as a cell's display value and
//! never aborts a recalculation. [`EngineError`] is for callers that build or
//! address grids incorrectly.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::cell_ref::CellRef;

/// Spreadsheet error codes surfaced as display values.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A reference-shaped token the codec does not accept (e.g. `A0`).
    #[error("#NAME?")]
    InvalidReference,

    /// A reference reappeared on its own resolution path.
    #[error("#REF!")]
    CircularReference,

    /// Characters outside the arithmetic set remained after substitution.
    #[error("#ERROR!")]
    InvalidCharacters,

    /// Malformed arithmetic.
    #[error("#ERROR!")]
    SyntaxError,

    #[error("#DIV/0!")]
    DivideByZero,

    /// A non-finite result that did not come from a division by zero.
    #[error("#NUM!")]
    NumberOverflow,

    /// Reference chain or parenthesis nesting deeper than the evaluator allows.
    #[error("#ERROR!")]
    DepthExceeded,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidReference => "#NAME?",
            ErrorCode::CircularReference => "#REF!",
            ErrorCode::InvalidCharacters | ErrorCode::SyntaxError | ErrorCode::DepthExceeded => {
                "#ERROR!"
            }
            ErrorCode::DivideByZero => "#DIV/0!",
            ErrorCode::NumberOverflow => "#NUM!",
        }
    }

    /// Map a displayed code back to an error. `#ERROR!` is shared by several
    /// variants and comes back as [`ErrorCode::SyntaxError`].
    pub fn from_code(code: &str) -> Option<ErrorCode> {
        match code {
            "#NAME?" => Some(ErrorCode::InvalidReference),
            "#REF!" => Some(ErrorCode::CircularReference),
            "#ERROR!" => Some(ErrorCode::SyntaxError),
            "#DIV/0!" => Some(ErrorCode::DivideByZero),
            "#NUM!" => Some(ErrorCode::NumberOverflow),
            _ => None,
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        ErrorCode::from_code(&code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown error code: {}", code)))
    }
}

/// Errors raised to callers of the engine API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} cells for the grid, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        cell: CellRef,
        rows: usize,
        cols: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in [
            ErrorCode::InvalidReference,
            ErrorCode::CircularReference,
            ErrorCode::SyntaxError,
            ErrorCode::DivideByZero,
            ErrorCode::NumberOverflow,
        ] {
            assert_eq!(ErrorCode::from_code(code.code()), Some(code));
            assert_eq!(code.to_string(), code.code());
        }
        for shared in [ErrorCode::InvalidCharacters, ErrorCode::DepthExceeded] {
            assert_eq!(ErrorCode::from_code(shared.code()), Some(ErrorCode::SyntaxError));
            assert_eq!(shared.to_string(), "#ERROR!");
        }
        assert_eq!(ErrorCode::from_code("#N/A"), None);
    }

    #[test]
    fn test_serializes_as_code_string() {
        let json = serde_json::to_string(&ErrorCode::CircularReference).unwrap();
        assert_eq!(json, "\"#REF!\"");
        let back: ErrorCode = serde_json::from_str("\"#DIV/0!\"").unwrap();
        assert_eq!(back, ErrorCode::DivideByZero);
        assert!(serde_json::from_str::<ErrorCode>("\"hello\"").is_err());
    }
}
