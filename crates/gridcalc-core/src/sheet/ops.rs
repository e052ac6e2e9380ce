use super::Sheet;
use crate::error::{CoreError, Result};
use gridcalc_engine::engine::{CellRef, EngineError, recalculate_in_place};
use log::debug;

/// Parse an edit of the form `REF=VALUE` (e.g. `B2==A1*2`). Everything after
/// the first `=` is the new raw value, so formulas keep their own `=`.
pub fn parse_edit(edit: &str) -> Result<(CellRef, String)> {
    let (target, value) = edit
        .split_once('=')
        .ok_or_else(|| CoreError::InvalidEdit(edit.to_string()))?;
    let cell_ref = target.trim().parse::<CellRef>()?;
    Ok((cell_ref, value.to_string()))
}

impl Sheet {
    /// Set a cell's raw value and recalculate the whole sheet.
    pub fn set_cell(&mut self, cell_ref: &CellRef, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        debug!("set {} = {:?}", cell_ref, value);
        self.grid.set_raw(cell_ref, value)?;
        self.modified = true;
        self.recalculate();
        Ok(())
    }

    /// Like [`Sheet::set_cell`] with the target in A1 notation.
    pub fn set_cell_a1(&mut self, a1: &str, value: impl Into<String>) -> Result<()> {
        let cell_ref = a1.trim().parse::<CellRef>()?;
        self.set_cell(&cell_ref, value)
    }

    /// Apply several edits, then recalculate once. Nothing is written if any
    /// target is outside the sheet.
    pub fn apply_edits<I, S>(&mut self, edits: I) -> Result<()>
    where
        I: IntoIterator<Item = (CellRef, S)>,
        S: Into<String>,
    {
        let edits: Vec<(CellRef, String)> =
            edits.into_iter().map(|(r, v)| (r, v.into())).collect();

        if let Some((cell_ref, _)) = edits.iter().find(|(r, _)| !self.grid.contains(r)) {
            return Err(EngineError::OutOfBounds {
                cell: *cell_ref,
                rows: self.rows(),
                cols: self.cols(),
            }
            .into());
        }
        if edits.is_empty() {
            return Ok(());
        }

        for (cell_ref, value) in edits {
            debug!("set {} = {:?}", cell_ref, value);
            self.grid.set_raw(&cell_ref, value)?;
        }
        self.modified = true;
        self.recalculate();
        Ok(())
    }

    /// Recompute every display value from the raw values.
    pub fn recalculate(&mut self) {
        recalculate_in_place(&mut self.grid);
    }

    /// Raw value as typed. Empty for cells outside the sheet.
    pub fn raw(&self, cell_ref: &CellRef) -> &str {
        self.grid
            .get(cell_ref)
            .map(|cell| cell.raw_value.as_str())
            .unwrap_or("")
    }

    /// Rendered display value. Empty for cells outside the sheet.
    pub fn display(&self, cell_ref: &CellRef) -> String {
        self.grid
            .get(cell_ref)
            .map(|cell| cell.display_value.to_string())
            .unwrap_or_default()
    }

    /// Rendered display values, row by row.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.grid
            .row_slices()
            .iter()
            .map(|row| row.iter().map(|c| c.display_value.to_string()).collect())
            .collect()
    }
}
