use super::Sheet;
use crate::error::{CoreError, Result};
use crate::storage::{
    CsvValues, Format, parse_csv_content, parse_json_content, read_sheet_file, write_csv_content,
    write_json_content, write_markdown_content,
};
use log::debug;
use std::path::Path;

impl Sheet {
    /// Load a sheet from a JSON snapshot or a CSV file of raw values. Files
    /// without a recognised extension are read as CSV.
    pub fn load(path: &Path) -> Result<Sheet> {
        let content = read_sheet_file(path)?;
        let stem = path.file_stem().and_then(|s| s.to_str());
        let format = Format::from_path(path).unwrap_or(Format::Csv);
        debug!("loading {} as {}", path.display(), format.name());

        let mut sheet = match format {
            Format::Json => parse_json_content(&content, stem)?,
            Format::Csv => Sheet::from_grid(
                stem.unwrap_or(super::DEFAULT_TITLE),
                parse_csv_content(&content)?,
            ),
            Format::Markdown => return Err(CoreError::UnsupportedImport("markdown")),
        };
        sheet.file_path = Some(path.to_path_buf());
        Ok(sheet)
    }

    /// Render the sheet. `values` only applies to CSV; JSON always carries
    /// both and markdown always shows display values.
    pub fn render(&self, format: Format, values: CsvValues) -> Result<String> {
        match format {
            Format::Csv => Ok(write_csv_content(self.grid(), values)),
            Format::Json => write_json_content(self),
            Format::Markdown => Ok(write_markdown_content(self)),
        }
    }

    /// Write the sheet to `path` and clear the modified flag.
    pub fn save(&mut self, path: &Path, format: Format, values: CsvValues) -> Result<()> {
        std::fs::write(path, self.render(format, values)?)?;
        debug!("saved {} as {}", path.display(), format.name());
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}
