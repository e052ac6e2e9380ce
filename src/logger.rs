//! Minimal `log` backend writing to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let label = match record.level() {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        let mut stderr = std::io::stderr().lock();
        let _ = if record.level() <= Level::Info {
            writeln!(stderr, "{}: {}", label, record.args())
        } else {
            writeln!(stderr, "{} [{}]: {}", label, record.target(), record.args())
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger. Calling this twice keeps the first logger and only
/// updates the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Combine the `-v` count with the configured level. Each `-v` raises the
/// floor by one step; the configured level (default `warn`) is never lowered.
pub fn level_for(verbosity: u8, configured: Option<LevelFilter>) -> LevelFilter {
    let base = configured.unwrap_or(LevelFilter::Warn);
    let floor = match verbosity {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    base.max(floor)
}
