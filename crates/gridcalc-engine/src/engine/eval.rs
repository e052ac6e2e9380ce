//! Formula evaluation.
//!
//! Every reference-shaped token in a formula body is resolved against the
//! grid and replaced by its value before the arithmetic is evaluated. The
//! [`EvalContext`] carries the active resolution path so that a reference
//! reached again from inside its own resolution is reported as a cycle.

use regex::Regex;
use std::sync::OnceLock;

use super::arith::eval_arithmetic;
use super::cell::Grid;
use super::cell_ref::CellRef;
use super::context::EvalContext;
use super::error::ErrorCode;
use super::resolve::resolve_cell;

/// Evaluate a formula body (the text after `=`) against `grid`.
pub fn evaluate(expression: &str, grid: &Grid, ctx: &mut EvalContext) -> Result<f64, ErrorCode> {
    let substituted = substitute_references(expression, grid, ctx)?;

    if !substituted.chars().all(is_arithmetic_char) {
        return Err(ErrorCode::InvalidCharacters);
    }

    eval_arithmetic(&substituted)
}

/// Replace each reference with its resolved value, left to right. The first
/// error stops the scan and is returned unchanged.
fn substitute_references(
    expression: &str,
    grid: &Grid,
    ctx: &mut EvalContext,
) -> Result<String, ErrorCode> {
    let mut out = String::with_capacity(expression.len());
    let mut last = 0;

    for m in cell_ref_re().find_iter(expression) {
        out.push_str(&expression[last..m.start()]);
        let value = resolve_reference(m.as_str(), grid, ctx)?;
        // Parenthesized so negatives and neighbouring literals stay separate tokens.
        out.push('(');
        out.push_str(&value.to_string());
        out.push(')');
        last = m.end();
    }
    out.push_str(&expression[last..]);

    Ok(out)
}

fn resolve_reference(token: &str, grid: &Grid, ctx: &mut EvalContext) -> Result<f64, ErrorCode> {
    let cell_ref = CellRef::from_str(token).ok_or(ErrorCode::InvalidReference)?;

    ctx.enter(cell_ref)?;
    let result = resolve_cell(&cell_ref, grid, ctx);
    ctx.leave(&cell_ref);

    result
}

fn is_arithmetic_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')') || c.is_whitespace()
}

/// Reference-shaped tokens. Must accept a superset of what [`CellRef::from_str`]
/// parses; tokens the codec rejects become [`ErrorCode::InvalidReference`].
fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"[A-Za-z]+[0-9]+").expect("formula cell reference regex must compile")
    })
}
