//! gridcalc_engine - Spreadsheet formula evaluation and recalculation.
//!
//! Formulas are flat arithmetic (`+ - * /`, parentheses, numeric literals)
//! over single-cell references. References are resolved recursively from raw
//! values; cycles are detected per resolution path.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    #[test]
    fn test_from_str_single_letter_columns() {
        let a1 = CellRef::from_str("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = CellRef::from_str("B1").unwrap();
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = CellRef::from_str("Z1").unwrap();
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_str_multi_letter_columns() {
        assert_eq!(CellRef::from_str("AA1").unwrap().col, 26);
        assert_eq!(CellRef::from_str("AB1").unwrap().col, 27);
        assert_eq!(CellRef::from_str("AZ1").unwrap().col, 51);
        assert_eq!(CellRef::from_str("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_str_row_numbers() {
        assert_eq!(CellRef::from_str("A1").unwrap().row, 0);
        assert_eq!(CellRef::from_str("A10").unwrap().row, 9);
        assert_eq!(CellRef::from_str("A100").unwrap().row, 99);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let lower = CellRef::from_str("a1").unwrap();
        assert_eq!(lower.row, 0);
        assert_eq!(lower.col, 0);

        let mixed = CellRef::from_str("aA1").unwrap();
        assert_eq!(mixed.col, 26);
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("123").is_none());
        assert!(CellRef::from_str("ABC").is_none());
        assert!(CellRef::from_str("A0").is_none());
        assert!(CellRef::from_str("1A").is_none());
        assert!(CellRef::from_str("A 1").is_none());
        assert!(CellRef::from_str("A1+").is_none());
    }

    fn recalc_display(rows: Vec<Vec<&str>>) -> Vec<Vec<String>> {
        let out = recalculate(&Grid::from_raw(rows).unwrap());
        out.row_slices()
            .iter()
            .map(|row| row.iter().map(|c| c.display_value.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_sample_sheet() {
        assert_eq!(
            recalc_display(vec![vec!["5", "10", "=A1+B1"]]),
            vec![vec!["5", "10", "15"]]
        );
    }

    #[test]
    fn test_indirect_cycle() {
        assert_eq!(
            recalc_display(vec![vec!["=B1", "=C1", "=A1", "=C1+1"]]),
            vec![vec!["#REF!", "#REF!", "#REF!", "#REF!"]]
        );
    }

    #[test]
    fn test_cycle_detection_ignores_reference_spelling() {
        assert_eq!(
            recalc_display(vec![vec!["=b1", "=A01"]]),
            vec![vec!["#REF!", "#REF!"]]
        );
    }

    #[test]
    fn test_error_taxonomy() {
        assert_eq!(
            recalc_display(vec![vec!["7", "=A1+X", "=A0", "=5++10", "=(1+2", "=4/0", "=2*(3+4)"]]),
            vec![vec!["7", "#ERROR!", "#NAME?", "#ERROR!", "#ERROR!", "#DIV/0!", "14"]]
        );
    }

    #[test]
    fn test_first_failing_reference_wins() {
        // The self-reference is reached before the stray `X` is ever checked.
        assert_eq!(recalc_display(vec![vec!["=A1+X"]]), vec![vec!["#REF!"]]);
        assert_eq!(recalc_display(vec![vec!["=A0+B1", "=B1"]])[0][0], "#NAME?");
    }

    #[test]
    fn test_fractional_display() {
        assert_eq!(
            recalc_display(vec![vec!["1", "=A1/4", "=B1*4"]]),
            vec![vec!["1", "0.25", "1"]]
        );
    }

    #[test]
    fn test_long_chain() {
        let mut row = vec!["1".to_string()];
        for col in 1..200 {
            row.push(format!("={}1+1", CellRef::col_to_letters(col - 1)));
        }
        let grid = Grid::from_raw(vec![row]).unwrap();
        let out = recalculate(&grid);
        let last = out.get(&CellRef::new(0, 199)).unwrap();
        assert_eq!(last.display_value, DisplayValue::Number(200.0));
    }

    fn column_chain(len: usize) -> Grid {
        let mut rows = vec![vec!["1".to_string()]];
        for row in 2..=len {
            rows.push(vec![format!("=A{}+1", row - 1)]);
        }
        Grid::from_raw(rows).unwrap()
    }

    #[test]
    fn test_chain_at_depth_limit() {
        let len = MAX_RESOLUTION_DEPTH + 8;
        let out = recalculate(&column_chain(len));
        let value = |row: usize| out.get(&CellRef::new(row - 1, 0)).unwrap().display_value.clone();

        // A(n) opens n - 1 references on its path.
        let deepest = MAX_RESOLUTION_DEPTH + 1;
        assert_eq!(value(deepest), DisplayValue::Number(deepest as f64));
        assert_eq!(value(deepest + 1), DisplayValue::Error(ErrorCode::DepthExceeded));
        assert_eq!(value(len).to_string(), "#ERROR!");
    }

    #[test]
    fn test_very_long_chain_is_an_error_not_a_crash() {
        let grid = column_chain(50_000);
        assert_eq!(
            evaluate_formula("=A50000", &grid),
            DisplayValue::Error(ErrorCode::DepthExceeded)
        );
        assert_eq!(evaluate_formula("=A3*2", &grid), DisplayValue::Number(6.0));
    }

    #[test]
    fn test_deeply_nested_formula_is_an_error() {
        let formula = format!("={}1{}", "(".repeat(200_000), ")".repeat(200_000));
        let grid = Grid::from_raw(vec![vec![formula.as_str(), "=A1+1", "3"]]).unwrap();
        assert_eq!(
            recalc_display_grid(&grid),
            vec![vec!["#ERROR!", "#ERROR!", "3"]]
        );
    }

    fn recalc_display_grid(grid: &Grid) -> Vec<Vec<String>> {
        recalculate(grid)
            .row_slices()
            .iter()
            .map(|row| row.iter().map(|c| c.display_value.to_string()).collect())
            .collect()
    }
}
