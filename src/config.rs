//! User configuration (`config.toml` in the platform config dir).
//!
//! ```toml
//! [sheet]
//! rows = 50
//! cols = 30
//! title = "Untitled Spreadsheet"
//!
//! [output]
//! format = "csv"      # csv | json | markdown
//! values = "display"  # display | raw (CSV only)
//! log_level = "warn"
//! ```

use directories::ProjectDirs;
use gridcalc_core::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TITLE};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::{OutputFormat, ValueKind};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    sheet: SheetSection,
    output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SheetSection {
    rows: Option<usize>,
    cols: Option<usize>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OutputSection {
    format: Option<OutputFormat>,
    values: Option<ValueKind>,
    log_level: Option<String>,
}

/// Effective settings after merging the config file over built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub title: String,
    pub format: Option<OutputFormat>,
    pub values: ValueKind,
    pub log_level: Option<LevelFilter>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            title: DEFAULT_TITLE.to_string(),
            format: None,
            values: ValueKind::Display,
            log_level: None,
        }
    }
}

/// Load configuration. An explicit path that does not exist is reported; a
/// missing default file is not. Problems never abort: they come back as
/// warnings alongside the defaults.
pub fn load_config(explicit: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = explicit.cloned().or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    match read_config_file(&path) {
        Ok(content) => {
            let (config, parse_warnings) = parse_config(&content, &path);
            warnings.extend(parse_warnings);
            (config, warnings)
        }
        Err(err) => {
            warnings.push(err);
            (Config::default(), warnings)
        }
    }
}

fn read_config_file(path: &Path) -> Result<String, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    std::fs::read_to_string(path).map_err(|err| format!("Failed to read {}: {}", path.display(), err))
}

pub(crate) fn parse_config(content: &str, path: &Path) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let file = match toml::from_str::<ConfigFile>(content) {
        Ok(file) => file,
        Err(err) => {
            warnings.push(format!("Failed to parse {}: {}", path.display(), err));
            return (Config::default(), warnings);
        }
    };

    let defaults = Config::default();
    let log_level = file.output.log_level.as_deref().and_then(|level| {
        match level.trim().parse::<LevelFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => {
                warnings.push(format!(
                    "Unknown log_level '{}' in {}; ignoring",
                    level,
                    path.display()
                ));
                None
            }
        }
    });

    let config = Config {
        rows: file.sheet.rows.unwrap_or(defaults.rows),
        cols: file.sheet.cols.unwrap_or(defaults.cols),
        title: file.sheet.title.unwrap_or(defaults.title),
        format: file.output.format,
        values: file.output.values.unwrap_or(defaults.values),
        log_level,
    };
    (config, warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
