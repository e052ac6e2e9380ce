//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use gridcalc_core::Format;
use gridcalc_core::storage::CsvValues;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gridcalc", version, about = "Recalculate spreadsheets of arithmetic formulas")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read settings from this file instead of the user config
    #[arg(long, value_name = "PATH", global = true, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a sheet, apply edits, recalculate and write it out
    Recalc {
        /// Sheet to load (.csv of raw values or .json snapshot)
        input: PathBuf,

        /// Set a cell before recalculating, e.g. --set B2==A1*2
        #[arg(short, long = "set", value_name = "REF=VALUE")]
        set: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Create a new empty (or sample) sheet
    New {
        #[arg(long)]
        rows: Option<usize>,

        #[arg(long)]
        cols: Option<usize>,

        #[arg(long)]
        title: Option<String>,

        /// Seed A1=5, B1=10, C1==A1+B1
        #[arg(long)]
        sample: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Evaluate a single formula, optionally against a sheet
    Eval {
        /// Formula, with or without the leading '='
        formula: String,

        /// Sheet whose cells the formula may reference
        #[arg(short, long, value_name = "FILE")]
        grid: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the output file's extension, then config, then csv)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write raw values instead of display values (CSV only)
    #[arg(long)]
    pub raw: bool,
}

#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    #[value(alias = "md")]
    #[serde(alias = "md")]
    Markdown,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Format::Csv,
            OutputFormat::Json => Format::Json,
            OutputFormat::Markdown => Format::Markdown,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Display,
    Raw,
}

impl From<ValueKind> for CsvValues {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Display => CsvValues::Display,
            ValueKind::Raw => CsvValues::Raw,
        }
    }
}

impl OutputArgs {
    /// Explicit flag wins, then the output file's extension, then config.
    pub fn resolve_format(&self, configured: Option<OutputFormat>) -> Format {
        self.format
            .map(Format::from)
            .or_else(|| self.output.as_deref().and_then(Format::from_path))
            .or_else(|| configured.map(Format::from))
            .unwrap_or(Format::Csv)
    }

    pub fn resolve_values(&self, configured: ValueKind) -> CsvValues {
        if self.raw {
            CsvValues::Raw
        } else {
            configured.into()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
