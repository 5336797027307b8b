//! Logging configuration using tracing
//!
//! stdout never carries log lines: the terminal UI draws on it and headless
//! mode writes its NDJSON stream there. Everything goes to a daily rolling
//! file; headless runs additionally mirror warnings to stderr so scripts see
//! them next to the event stream.

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the filter directive
pub const LOG_FILTER_ENV: &str = "DECKVIEW_LOG";

/// Environment variable overriding the log directory
pub const LOG_DIR_ENV: &str = "DECKVIEW_LOG_DIR";

const DEFAULT_FILTER: &str = "deckview=info,deck_app=info,deck_tui=info,warn";

/// Which front end owns the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Interactive terminal UI; the alternate screen owns stdout and stderr
    Tui,
    /// Scripted NDJSON run; stdout is the event stream, stderr is free
    Headless,
}

impl LogMode {
    /// Log file prefix, so scripted runs never interleave with interactive ones
    pub fn file_prefix(&self) -> &'static str {
        match self {
            LogMode::Tui => "deckview.log",
            LogMode::Headless => "deckview-headless.log",
        }
    }

    fn mirrors_to_stderr(&self) -> bool {
        matches!(self, LogMode::Headless)
    }
}

/// Initialize the logging subsystem
///
/// Returns the directory the log file is written to. The level is controlled
/// by `DECKVIEW_LOG`.
///
/// # Examples
/// ```bash
/// DECKVIEW_LOG=debug cargo run -- deck.txt
/// DECKVIEW_LOG_DIR=/tmp/deck-logs cargo run -- deck.txt --headless
/// ```
pub fn init(mode: LogMode) -> Result<PathBuf> {
    let log_dir = log_directory(
        std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
        dirs::data_local_dir(),
    );
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, mode.file_prefix());

    let env_filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = mode.mirrors_to_stderr().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .with(stderr_layer)
        .init();

    tracing::info!("deckview starting ({:?} mode)", mode);
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(log_dir)
}

/// Resolve the log directory: an explicit override wins, then the platform
/// data directory, then `./.deckview/logs`.
pub fn log_directory(override_dir: Option<PathBuf>, data_dir: Option<PathBuf>) -> PathBuf {
    match (override_dir, data_dir) {
        (Some(dir), _) if !dir.as_os_str().is_empty() => dir,
        (_, Some(base)) => base.join("deckview").join("logs"),
        _ => Path::new(".deckview").join("logs"),
    }
}
