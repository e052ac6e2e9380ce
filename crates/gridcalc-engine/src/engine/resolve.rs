//! A cell's numeric contribution to a formula.

use super::cell::Grid;
use super::cell_ref::CellRef;
use super::context::EvalContext;
use super::error::ErrorCode;
use super::eval::evaluate;

/// Resolve the value of `cell_ref` for use inside arithmetic.
///
/// - out of bounds, empty, whitespace-only, or non-numeric text -> `0`
/// - numeric literal -> the number
/// - formula -> evaluated with the same context
pub fn resolve_cell(cell_ref: &CellRef, grid: &Grid, ctx: &mut EvalContext) -> Result<f64, ErrorCode> {
    let Some(cell) = grid.get(cell_ref) else {
        return Ok(0.0);
    };

    if let Some(body) = cell.formula() {
        return evaluate(body, grid, ctx);
    }

    Ok(parse_literal(&cell.raw_value).unwrap_or(0.0))
}

/// Parse a literal cell as a finite number. `inf`, `NaN` and literals that
/// overflow `f64` are treated as text.
pub fn parse_literal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
