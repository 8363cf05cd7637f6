//! Process-wide `log` backend.
//!
//! Every line reads `[<rfc3339> - <LEVEL>] <message> [<file>:<line>]`. Output
//! goes to an append-only file when one is configured, otherwise to stdout,
//! colored or plain.

use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::Display;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// Where log lines are written
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Sink {
    File(PathBuf),
    Colored,
    Plain,
}

impl Sink {
    pub(crate) fn select(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => Sink::File(path),
            None if colored => Sink::Colored,
            None => Sink::Plain,
        }
    }

    fn dispatch(&self) -> ServerErrorResult<Dispatch> {
        let dispatch = match self {
            Sink::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ServerError::Logger {
                        message: format!("Failed to open log file {}: {}", path.display(), e),
                    })?;
                Dispatch::new()
                    .format(|out, message, record| write_line(out, message, record, record.level()))
                    .chain(file)
            }
            Sink::Colored => {
                let colors = ColoredLevelConfig::new()
                    .trace(Color::Magenta)
                    .debug(Color::Blue)
                    .info(Color::Green)
                    .warn(Color::Yellow)
                    .error(Color::Red);
                Dispatch::new()
                    .format(move |out, message, record| {
                        write_line(out, message, record, colors.color(record.level()))
                    })
                    .chain(std::io::stdout())
            }
            Sink::Plain => Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, record.level()))
                .chain(std::io::stdout()),
        };

        Ok(dispatch)
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Sink::File(path) => format!("file={}", path.display()),
            Sink::Colored => "stdout (colored)".to_string(),
            Sink::Plain => "stdout".to_string(),
        }
    }
}

fn write_line(
    out: FormatCallback,
    message: &std::fmt::Arguments,
    record: &Record,
    level: impl Display,
) {
    out.finish(format_args!(
        "[{} - {}] {} [{}:{}]",
        humantime::format_rfc3339(SystemTime::now()),
        level,
        message,
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
    ))
}

/// Install the global logger. Call once, before anything else logs.
///
/// `log_file` wins over `colored`; the tracing bridge is installed last so
/// crates that emit `tracing` events end up in the same output.
pub fn initialize(
    log_level: ee_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;
    let sink = Sink::select(log_file, colored);

    Dispatch::new()
        .level(level_filter)
        // sqlx logs every statement at info
        .level_for("sqlx", LevelFilter::Warn)
        .chain(sink.dispatch()?)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    info!("Logger initialized: level={:?}, {}", level_filter, sink.describe());

    tracing_log::LogTracer::init().ok();

    Ok(())
}
