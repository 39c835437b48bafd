//! Minimal stderr logger for the `log` facade.
use console::style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => style("ERROR").red().bold(),
            Level::Warn => style("WARN ").yellow(),
            Level::Info => style("INFO ").green(),
            Level::Debug => style("DEBUG").blue(),
            Level::Trace => style("TRACE").dim(),
        };
        eprintln!("{level} {} {}", style(record.target()).dim(), record.args());
    }

    fn flush(&self) {}
}

const fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Each `-v` lowers the threshold by one level, starting from warn.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_filter(verbosity));
    Ok(())
}
