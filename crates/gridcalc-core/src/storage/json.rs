//! JSON snapshot import/export.
//!
//! Three shapes are accepted on input:
//!
//! - a sheet snapshot `{ "title", "rows", "cols", "grid": [[cell, ..], ..] }`
//! - a flat snapshot `{ "rows", "cols", "grid": [cell, ..] }` in row-major order
//! - a bare 2-D array of cells
//!
//! where each cell is `{ "value": .., "displayValue": .. }`. Output is always
//! the sheet snapshot.

use crate::error::Result;
use crate::sheet::{DEFAULT_TITLE, Sheet};
use gridcalc_engine::engine::{Cell, EngineError, Grid};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SheetSnapshotRef<'a> {
    title: &'a str,
    rows: usize,
    cols: usize,
    grid: &'a Grid,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Sheet {
        #[serde(default)]
        title: Option<String>,
        rows: usize,
        cols: usize,
        grid: Grid,
    },
    Flat {
        #[serde(default)]
        title: Option<String>,
        rows: usize,
        cols: usize,
        grid: Vec<Cell>,
    },
    Bare(Grid),
}

/// Serialize a sheet snapshot as pretty-printed JSON.
pub fn write_json_content(sheet: &Sheet) -> Result<String> {
    let snapshot = SheetSnapshotRef {
        title: &sheet.title,
        rows: sheet.rows(),
        cols: sheet.cols(),
        grid: sheet.grid(),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse any accepted JSON shape into a recalculated sheet. `fallback_title`
/// is used when the input carries no title.
pub fn parse_json_content(content: &str, fallback_title: Option<&str>) -> Result<Sheet> {
    let file: SnapshotFile = serde_json::from_str(content)?;

    let (title, grid) = match file {
        SnapshotFile::Sheet {
            title,
            rows,
            cols,
            grid,
        } => {
            if grid.rows() != rows || (rows > 0 && grid.cols() != cols) {
                return Err(EngineError::DimensionMismatch {
                    expected: rows.saturating_mul(cols),
                    found: grid.rows() * grid.cols(),
                }
                .into());
            }
            // A grid with no rows cannot carry its width in the 2-D form.
            let grid = if rows == 0 { Grid::new(0, cols) } else { grid };
            (title, grid)
        }
        SnapshotFile::Flat {
            title,
            rows,
            cols,
            grid,
        } => (title, Grid::from_flat(rows, cols, grid)?),
        SnapshotFile::Bare(grid) => (None, grid),
    };

    let title = title
        .or_else(|| fallback_title.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    Ok(Sheet::from_grid(title, grid))
}
