//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - A raw value as typed plus the most recently computed display value
//! - [`DisplayValue`] - A number, a passthrough literal, or an error code
//! - [`Grid`] - Dense rectangular storage with dimensions fixed at creation

use serde::{Deserialize, Serialize};

use super::cell_ref::CellRef;
use super::error::{EngineError, ErrorCode};
use super::format::format_number;

/// The computed value shown for a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(f64),
    Error(ErrorCode),
    Text(String),
}

impl DisplayValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DisplayValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<ErrorCode> {
        match self {
            DisplayValue::Error(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayValue::Error(_))
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        DisplayValue::Text(String::new())
    }
}

impl From<Result<f64, ErrorCode>> for DisplayValue {
    fn from(result: Result<f64, ErrorCode>) -> Self {
        match result {
            Ok(n) => DisplayValue::Number(n),
            Err(code) => DisplayValue::Error(code),
        }
    }
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayValue::Number(n) => f.write_str(&format_number(*n)),
            DisplayValue::Error(code) => f.write_str(code.code()),
            DisplayValue::Text(s) => f.write_str(s),
        }
    }
}

/// A cell in the spreadsheet grid.
///
/// Serialized as `{ "value": .., "displayValue": .. }`; `rawValue` is accepted
/// as an alias for `value` on input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(rename = "value", alias = "rawValue")]
    pub raw_value: String,
    #[serde(default)]
    pub display_value: DisplayValue,
}

impl Cell {
    /// Create a cell holding `raw`. The display value stays empty until the
    /// grid is recalculated.
    pub fn new(raw: impl Into<String>) -> Cell {
        Cell {
            raw_value: raw.into(),
            display_value: DisplayValue::default(),
        }
    }

    pub fn new_empty() -> Cell {
        Cell::default()
    }

    pub fn is_formula(&self) -> bool {
        self.raw_value.starts_with('=')
    }

    /// The formula body after the leading `=`, if this cell holds a formula.
    pub fn formula(&self) -> Option<&str> {
        self.raw_value.strip_prefix('=')
    }
}

/// Dense rectangular grid of cells.
///
/// Serialized as a 2-D array of rows; deserialization rejects ragged input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a `rows x cols` grid of empty cells.
    pub fn new(rows: usize, cols: usize) -> Grid {
        Grid {
            rows,
            cols,
            cells: vec![vec![Cell::new_empty(); cols]; rows],
        }
    }

    /// Build a grid from rows of cells. Every row must have the same length.
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Result<Grid, EngineError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        for (row, cells_in_row) in cells.iter().enumerate() {
            if cells_in_row.len() != cols {
                return Err(EngineError::NotRectangular {
                    row,
                    expected: cols,
                    found: cells_in_row.len(),
                });
            }
        }
        Ok(Grid { rows, cols, cells })
    }

    /// Build a grid from rows of raw values.
    pub fn from_raw<S: Into<String>>(raw: Vec<Vec<S>>) -> Result<Grid, EngineError> {
        Grid::from_rows(
            raw.into_iter()
                .map(|row| row.into_iter().map(Cell::new).collect())
                .collect(),
        )
    }

    /// Build a grid from a row-major flat list of `rows * cols` cells.
    pub fn from_flat(rows: usize, cols: usize, flat: Vec<Cell>) -> Result<Grid, EngineError> {
        let expected = rows.saturating_mul(cols);
        if flat.len() != expected {
            return Err(EngineError::DimensionMismatch {
                expected,
                found: flat.len(),
            });
        }
        let mut cells = Vec::with_capacity(rows);
        let mut iter = flat.into_iter();
        for _ in 0..rows {
            cells.push(iter.by_ref().take(cols).collect());
        }
        Ok(Grid { rows, cols, cells })
    }

    /// Flatten into row-major order.
    pub fn to_flat(&self) -> Vec<Cell> {
        self.cells.iter().flatten().cloned().collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        cell_ref.row < self.rows && cell_ref.col < self.cols
    }

    pub fn get(&self, cell_ref: &CellRef) -> Option<&Cell> {
        self.cells.get(cell_ref.row)?.get(cell_ref.col)
    }

    pub fn get_mut(&mut self, cell_ref: &CellRef) -> Option<&mut Cell> {
        self.cells.get_mut(cell_ref.row)?.get_mut(cell_ref.col)
    }

    /// Replace the raw value at `cell_ref`. The display value is left as is
    /// until the next recalculation.
    pub fn set_raw(&mut self, cell_ref: &CellRef, raw: impl Into<String>) -> Result<(), EngineError> {
        let (rows, cols) = (self.rows, self.cols);
        let cell = self.get_mut(cell_ref).ok_or(EngineError::OutOfBounds {
            cell: *cell_ref,
            rows,
            cols,
        })?;
        cell.raw_value = raw.into();
        Ok(())
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (CellRef::new(row, col), cell))
        })
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (CellRef, &mut Cell)> {
        self.cells.iter_mut().enumerate().flat_map(|(row, cells)| {
            cells
                .iter_mut()
                .enumerate()
                .map(move |(col, cell)| (CellRef::new(row, col), cell))
        })
    }

    pub fn row_slices(&self) -> &[Vec<Cell>] {
        &self.cells
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = EngineError;

    fn try_from(cells: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Grid::from_rows(cells)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}
