//! Markdown export functionality

use crate::sheet::Sheet;
use gridcalc_engine::engine::CellRef;
use std::fmt::Write as _;
use std::path::Path;

/// Write the sheet to a markdown file
pub fn write_markdown(path: &Path, sheet: &Sheet) -> std::io::Result<()> {
    std::fs::write(path, write_markdown_content(sheet))
}

/// Render the populated part of the sheet as a markdown table of display values.
pub fn write_markdown_content(sheet: &Sheet) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "# {}", escape_markdown(&sheet.title));
    let _ = writeln!(out);

    let Some((min_row, min_col, max_row, max_col)) = find_grid_bounds(sheet) else {
        let _ = writeln!(out, "*Empty spreadsheet*");
        return out;
    };

    // Header with column letters
    out.push_str("|   |");
    for col in min_col..=max_col {
        let _ = write!(out, " {} |", CellRef::col_to_letters(col));
    }
    out.push('\n');

    out.push_str("|---|");
    for _ in min_col..=max_col {
        out.push_str("---|");
    }
    out.push('\n');

    for row in min_row..=max_row {
        let _ = write!(out, "| {} |", row + 1); // 1-based row numbers
        for col in min_col..=max_col {
            let display = sheet.display(&CellRef::new(row, col));
            let _ = write!(out, " {} |", escape_markdown(&display));
        }
        out.push('\n');
    }

    out
}

/// Bounding box of cells with a non-empty raw value.
fn find_grid_bounds(sheet: &Sheet) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (cell_ref, cell) in sheet.grid().iter() {
        if cell.raw_value.is_empty() {
            continue;
        }
        bounds = Some(match bounds {
            None => (cell_ref.row, cell_ref.col, cell_ref.row, cell_ref.col),
            Some((r0, c0, r1, c1)) => (
                r0.min(cell_ref.row),
                c0.min(cell_ref.col),
                r1.max(cell_ref.row),
                c1.max(cell_ref.col),
            ),
        });
    }
    bounds
}

fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
