//! gridcalc - recalculate spreadsheets of arithmetic formulas from the command line

mod cli;
mod config;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, OutputArgs};
use config::Config;
use gridcalc_core::{Grid, Sheet, parse_edit};
use gridcalc_engine::engine::evaluate_formula;
use log::{info, warn};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, warnings) = if cli.no_config {
        (Config::default(), Vec::new())
    } else {
        config::load_config(cli.config.as_ref())
    };
    logger::init(logger::level_for(cli.verbose, config.log_level));
    for warning in warnings {
        warn!("{}", warning);
    }

    match cli.command {
        Command::Recalc { input, set, output } => recalc(&config, &input, &set, &output),
        Command::New {
            rows,
            cols,
            title,
            sample,
            output,
        } => {
            let title = title.unwrap_or_else(|| config.title.clone());
            let rows = rows.unwrap_or(config.rows);
            let cols = cols.unwrap_or(config.cols);
            let mut sheet = if sample {
                Sheet::with_sample(title, rows, cols)
            } else {
                Sheet::new(title, rows, cols)
            };
            emit(&config, &mut sheet, &output)
        }
        Command::Eval { formula, grid } => {
            let grid = match grid {
                Some(path) => load(&path)?.into_grid(),
                None => Grid::new(0, 0),
            };
            let formula = if formula.starts_with('=') {
                formula
            } else {
                format!("={}", formula)
            };
            println!("{}", evaluate_formula(&formula, &grid));
            Ok(())
        }
    }
}

fn recalc(config: &Config, input: &Path, set: &[String], output: &OutputArgs) -> Result<()> {
    let mut sheet = load(input)?;
    let edits = set
        .iter()
        .map(|edit| parse_edit(edit).with_context(|| format!("invalid --set '{}'", edit)))
        .collect::<Result<Vec<_>>>()?;
    sheet
        .apply_edits(edits)
        .context("failed to apply edits")?;
    emit(config, &mut sheet, output)
}

fn load(path: &Path) -> Result<Sheet> {
    let sheet =
        Sheet::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    info!(
        "loaded '{}' ({}x{}) from {}",
        sheet.title,
        sheet.rows(),
        sheet.cols(),
        path.display()
    );
    Ok(sheet)
}

fn emit(config: &Config, sheet: &mut Sheet, output: &OutputArgs) -> Result<()> {
    let format = output.resolve_format(config.format);
    let values = output.resolve_values(config.values);
    match output.path() {
        Some(path) => {
            sheet
                .save(path, format, values)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("exported to {} as {}", path.display(), format.name());
        }
        None => {
            let rendered = sheet.render(format, values)?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
