//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`DisplayValue`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`evaluate`] - Formula evaluation with recursive reference resolution
//! - [`resolve_cell`] - A cell's numeric contribution to a formula
//! - [`recalculate`] - Whole-grid recalculation
//! - [`ErrorCode`] - Per-cell error codes, [`EngineError`] - caller errors
//! - [`format_number`] - Format values for display

mod arith;
mod cell;
mod cell_ref;
mod context;
mod error;
mod eval;
mod format;
mod recalc;
mod resolve;

pub use arith::{MAX_NESTING_DEPTH, eval_arithmetic};
pub use cell::{Cell, DisplayValue, Grid};
pub use cell_ref::CellRef;
pub use context::{EvalContext, MAX_RESOLUTION_DEPTH};
pub use error::{EngineError, ErrorCode};
pub use eval::evaluate;
pub use format::format_number;
pub use recalc::{evaluate_formula, recalculate, recalculate_in_place};
pub use resolve::{parse_literal, resolve_cell};
