use gridcalc_engine::engine::{CellRef, Grid, recalculate_in_place};
use std::path::PathBuf;

/// Rows in a newly created sheet.
pub const DEFAULT_ROWS: usize = 50;
/// Columns in a newly created sheet.
pub const DEFAULT_COLS: usize = 30;
pub const DEFAULT_TITLE: &str = "Untitled Spreadsheet";

/// A titled grid whose display values are kept in sync with its raw values.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub title: String,
    /// Always recalculated after construction and after every edit.
    pub(crate) grid: Grid,
    /// File this sheet was loaded from, if any
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been edited since it was created or loaded
    pub modified: bool,
}

impl Sheet {
    /// Create a blank `rows x cols` sheet.
    pub fn new(title: impl Into<String>, rows: usize, cols: usize) -> Self {
        Sheet {
            title: title.into(),
            grid: Grid::new(rows, cols),
            file_path: None,
            modified: false,
        }
    }

    /// Create a sheet seeded with `A1 = 5`, `B1 = 10`, `C1 = =A1+B1`.
    /// Seed cells that fall outside the requested size are skipped.
    pub fn with_sample(title: impl Into<String>, rows: usize, cols: usize) -> Self {
        let mut grid = Grid::new(rows, cols);
        for (col, raw) in ["5", "10", "=A1+B1"].into_iter().enumerate() {
            if let Some(cell) = grid.get_mut(&CellRef::new(0, col)) {
                cell.raw_value = raw.to_string();
            }
        }
        Self::from_grid(title, grid)
    }

    /// Wrap an existing grid, recalculating it.
    pub fn from_grid(title: impl Into<String>, mut grid: Grid) -> Self {
        recalculate_in_place(&mut grid);
        Sheet {
            title: title.into(),
            grid,
            file_path: None,
            modified: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_ROWS, DEFAULT_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_engine::engine::DisplayValue;

    #[test]
    fn test_default_dimensions() {
        let sheet = Sheet::default();
        assert_eq!(sheet.rows(), 50);
        assert_eq!(sheet.cols(), 30);
        assert_eq!(sheet.title, "Untitled Spreadsheet");
        assert!(!sheet.modified);
    }

    #[test]
    fn test_sample_is_recalculated() {
        let sheet = Sheet::with_sample("demo", 50, 30);
        let c1 = sheet.grid().get(&CellRef::new(0, 2)).unwrap();
        assert_eq!(c1.raw_value, "=A1+B1");
        assert_eq!(c1.display_value, DisplayValue::Number(15.0));
    }

    #[test]
    fn test_sample_clipped_to_size() {
        let sheet = Sheet::with_sample("narrow", 1, 2);
        assert_eq!(sheet.display(&CellRef::new(0, 0)), "5");
        assert_eq!(sheet.display(&CellRef::new(0, 1)), "10");
        assert_eq!(sheet.cols(), 2);
    }
}
