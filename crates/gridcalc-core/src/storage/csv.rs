//! CSV import/export functionality

use super::read_sheet_file;
use crate::error::{CoreError, Result};
use gridcalc_engine::engine::{Cell, Grid};
use log::warn;
use std::path::Path;

/// Which value of each cell to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsvValues {
    /// Computed display values, escaped against formula injection.
    Display,
    /// Raw values as typed, formulas included.
    Raw,
}

/// Parse a CSV file of raw values into a grid.
pub fn parse_csv(path: &Path) -> Result<Grid> {
    let content = read_sheet_file(path)?;
    parse_csv_content(&content)
}

/// Parse CSV text of raw values into a grid. Short rows are padded with empty
/// cells up to the widest row.
pub fn parse_csv_content(content: &str) -> Result<Grid> {
    let mut rows: Vec<Vec<Cell>> = parse_csv_records(content)?
        .into_iter()
        .map(|fields| fields.into_iter().map(Cell::new).collect())
        .collect();

    if rows.is_empty() {
        return Err(CoreError::EmptyCsv);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for (row_idx, row) in rows.iter_mut().enumerate() {
        if row.len() < width {
            warn!(
                "CSV row {} has {} fields, padding to {}",
                row_idx + 1,
                row.len(),
                width
            );
            row.resize_with(width, Cell::new_empty);
        }
    }

    Ok(Grid::from_rows(rows)?)
}

/// Split CSV text into records. Quoted fields may contain commas, doubled
/// quotes and line breaks; unquoted fields are trimmed. Records end at `\n`
/// or `\r\n` outside quotes.
pub(crate) fn parse_csv_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                if c == '\n' {
                    line += 1;
                }
                current.push(c);
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                field_was_quoted = true;
                quote_line = line;
            }
            ',' => fields.push(finish_field(&mut current, &mut field_was_quoted)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(finish_field(&mut current, &mut field_was_quoted));
                records.push(std::mem::take(&mut fields));
                line += 1;
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(CoreError::Parse {
            line: quote_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !fields.is_empty() || !current.is_empty() || field_was_quoted {
        fields.push(finish_field(&mut current, &mut field_was_quoted));
        records.push(fields);
    }
    Ok(records)
}

fn finish_field(current: &mut String, field_was_quoted: &mut bool) -> String {
    let field = if *field_was_quoted {
        std::mem::take(current)
    } else {
        let trimmed = current.trim().to_string();
        current.clear();
        trimmed
    };
    *field_was_quoted = false;
    field
}

/// Render a grid as CSV.
pub fn write_csv_content(grid: &Grid, values: CsvValues) -> String {
    let mut out = String::new();
    for row in grid.row_slices() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match values {
                CsvValues::Display => escape_csv_field(&cell.display_value.to_string()),
                CsvValues::Raw => quote_csv_field(&cell.raw_value),
            })
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Write a grid to a CSV file.
pub fn write_csv(path: &Path, grid: &Grid, values: CsvValues) -> Result<()> {
    std::fs::write(path, write_csv_content(grid, values))?;
    Ok(())
}

fn escape_csv_field(field: &str) -> String {
    // Display text starting with a formula trigger is neutralized for
    // spreadsheet applications that open the export.
    let first_non_ws = field.chars().find(|c| !c.is_whitespace());
    let guarded = if matches!(first_non_ws, Some('=' | '+' | '@'))
        || (first_non_ws == Some('-') && field.trim_start().parse::<f64>().is_err())
    {
        format!("'{}", field)
    } else {
        field.to_string()
    };
    quote_csv_field(&guarded)
}

fn quote_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) || field != field.trim() {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
