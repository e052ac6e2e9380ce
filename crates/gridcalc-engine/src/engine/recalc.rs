//! Whole-grid recalculation.
//!
//! Each formula is evaluated from raw values with its own [`EvalContext`];
//! previously computed display values are never read. The iteration order
//! over the grid therefore has no influence on the result.

use log::{debug, trace};

use super::cell::{Cell, DisplayValue, Grid};
use super::context::EvalContext;
use super::eval::evaluate;

/// Return a copy of `grid` with every display value recomputed.
pub fn recalculate(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    recalculate_in_place(&mut next);
    next
}

/// Recompute every display value of `grid` from its raw values.
pub fn recalculate_in_place(grid: &mut Grid) {
    let mut formulas = 0usize;
    let mut errors = 0usize;

    let values: Vec<DisplayValue> = {
        let snapshot: &Grid = grid;
        snapshot
            .iter()
            .map(|(cell_ref, cell)| {
                let value = compute_display(cell, snapshot);
                if cell.is_formula() {
                    formulas += 1;
                    if let DisplayValue::Error(code) = &value {
                        errors += 1;
                        trace!("{} {:?} -> {}", cell_ref, cell.raw_value, code);
                    }
                }
                value
            })
            .collect()
    };

    for ((_, cell), value) in grid.iter_mut().zip(values) {
        cell.display_value = value;
    }

    debug!(
        "recalculated {}x{} grid: {} formulas, {} errors",
        grid.rows(),
        grid.cols(),
        formulas,
        errors
    );
}

/// Evaluate a raw cell value against `grid` without storing it anywhere.
/// Non-formula input is returned verbatim as text.
pub fn evaluate_formula(raw: &str, grid: &Grid) -> DisplayValue {
    compute_display(&Cell::new(raw), grid)
}

fn compute_display(cell: &Cell, grid: &Grid) -> DisplayValue {
    match cell.formula() {
        Some(body) => {
            let mut ctx = EvalContext::new();
            evaluate(body, grid, &mut ctx).into()
        }
        None => DisplayValue::Text(cell.raw_value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CellRef, ErrorCode};
    use pretty_assertions::assert_eq;

    fn display(grid: &Grid, a1: &str) -> DisplayValue {
        let cell_ref = CellRef::from_str(a1).unwrap();
        grid.get(&cell_ref).unwrap().display_value.clone()
    }

    #[test]
    fn test_passthrough_without_formulas() {
        let grid = Grid::from_raw(vec![vec!["1", "text", ""], vec![" 2 ", "x y", "3.50"]]).unwrap();
        let out = recalculate(&grid);
        for (cell_ref, cell) in out.iter() {
            let raw = &grid.get(&cell_ref).unwrap().raw_value;
            assert_eq!(cell.display_value, DisplayValue::Text(raw.clone()));
        }
    }

    #[test]
    fn test_self_reference() {
        let out = recalculate(&Grid::from_raw(vec![vec!["=A1"]]).unwrap());
        assert_eq!(display(&out, "A1"), DisplayValue::Error(ErrorCode::CircularReference));
    }

    #[test]
    fn test_mutual_cycle() {
        let out = recalculate(&Grid::from_raw(vec![vec!["=B1", "=A1"]]).unwrap());
        assert_eq!(display(&out, "A1"), DisplayValue::Error(ErrorCode::CircularReference));
        assert_eq!(display(&out, "B1"), DisplayValue::Error(ErrorCode::CircularReference));
    }

    #[test]
    fn test_reuse_is_not_a_cycle() {
        let out = recalculate(&Grid::from_raw(vec![vec!["5", "=A1+A1"]]).unwrap());
        assert_eq!(display(&out, "B1"), DisplayValue::Number(10.0));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let out =
            recalculate(&Grid::from_raw(vec![vec!["2", "=A1*3", "=A1+1", "=B1+C1"]]).unwrap());
        assert_eq!(display(&out, "D1"), DisplayValue::Number(9.0));
    }

    #[test]
    fn test_chained_dependency() {
        let out = recalculate(&Grid::from_raw(vec![vec!["5", "=A1+1", "=B1*2"]]).unwrap());
        assert_eq!(display(&out, "C1"), DisplayValue::Number(12.0));
    }

    #[test]
    fn test_dependency_declared_before_its_input() {
        let out = recalculate(&Grid::from_raw(vec![vec!["=C1*2", "=C1+1", "5"]]).unwrap());
        assert_eq!(display(&out, "A1"), DisplayValue::Number(10.0));
        assert_eq!(display(&out, "B1"), DisplayValue::Number(6.0));
    }

    #[test]
    fn test_out_of_bounds_reference_is_zero() {
        let out = recalculate(&Grid::from_raw(vec![vec!["=A5"]]).unwrap());
        assert_eq!(display(&out, "A1"), DisplayValue::Number(0.0));
    }

    #[test]
    fn test_errors_propagate() {
        let out = recalculate(&Grid::from_raw(vec![vec!["=1/0", "=A1+1", "=Q0", "=C1*2"]]).unwrap());
        assert_eq!(display(&out, "A1"), DisplayValue::Error(ErrorCode::DivideByZero));
        assert_eq!(display(&out, "B1"), DisplayValue::Error(ErrorCode::DivideByZero));
        assert_eq!(display(&out, "C1"), DisplayValue::Error(ErrorCode::InvalidReference));
        assert_eq!(display(&out, "D1"), DisplayValue::Error(ErrorCode::InvalidReference));
    }

    #[test]
    fn test_cycle_poisons_dependents_only() {
        let out = recalculate(
            &Grid::from_raw(vec![vec!["=B1", "=A1", "=A1+1"], vec!["4", "=A2*2", ""]]).unwrap(),
        );
        assert_eq!(display(&out, "C1"), DisplayValue::Error(ErrorCode::CircularReference));
        assert_eq!(display(&out, "B2"), DisplayValue::Number(8.0));
        assert_eq!(display(&out, "C2"), DisplayValue::Text(String::new()));
    }

    #[test]
    fn test_idempotent() {
        let grid = Grid::from_raw(vec![vec!["5", "=A1+1", "=B1*2", "=D1"]]).unwrap();
        let once = recalculate(&grid);
        let twice = recalculate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_raw_values_unchanged() {
        let grid = Grid::from_raw(vec![vec!["5", "=A1+1"]]).unwrap();
        let out = recalculate(&grid);
        assert_eq!(
            out.iter().map(|(_, c)| c.raw_value.clone()).collect::<Vec<_>>(),
            vec!["5".to_string(), "=A1+1".to_string()]
        );
    }

    #[test]
    fn test_evaluate_formula() {
        let grid = Grid::from_raw(vec![vec!["4"]]).unwrap();
        assert_eq!(evaluate_formula("=A1*A1", &grid), DisplayValue::Number(16.0));
        assert_eq!(evaluate_formula("plain", &grid), DisplayValue::Text("plain".into()));
        assert_eq!(
            evaluate_formula("=5++10", &grid),
            DisplayValue::Error(ErrorCode::SyntaxError)
        );
    }
}
