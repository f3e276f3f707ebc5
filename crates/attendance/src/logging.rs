//! Logging configuration for attendance.
//!
//! This module builds the tracing-based log sink used throughout attendance.
//! Instead of installing a process-wide subscriber, [`LogContext::init`]
//! returns an owned context: the subscriber stays active for as long as the
//! context lives, and dropping it flushes the log file.

use std::path::Path;

use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogConfig, LogRotation};
use crate::error::Result;

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above), echoed to stderr.
    Verbose,
    /// Very verbose output (trace level), echoed to stderr.
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Whether log lines are also written to stderr.
    #[must_use]
    pub fn echoes_to_stderr(&self) -> bool {
        matches!(self, Self::Verbose | Self::Trace)
    }
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Self::NEVER,
            LogRotation::Daily => Self::DAILY,
            LogRotation::Hourly => Self::HOURLY,
        }
    }
}

/// The active log sinks.
///
/// Holds the subscriber guard and the file writer guard. Fields drop in
/// declaration order, so the subscriber is detached before the writer is
/// flushed.
#[must_use = "logging stops when the context is dropped"]
pub struct LogContext {
    _subscriber: tracing::subscriber::DefaultGuard,
    file_guard: Option<WorkerGuard>,
}

impl std::fmt::Debug for LogContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogContext")
            .field("file_sink", &self.file_guard.is_some())
            .finish_non_exhaustive()
    }
}

impl LogContext {
    /// Open the log sinks described by `config`.
    ///
    /// The logging level can be controlled via:
    /// 1. The `verbosity` parameter
    /// 2. The `RUST_LOG` environment variable (takes precedence)
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use attendance::config::LogConfig;
    /// use attendance::logging::{LogContext, Verbosity};
    ///
    /// let logging = LogContext::init(&LogConfig::default(), Verbosity::Normal)?;
    /// // ... run the application ...
    /// logging.shutdown();
    /// # Ok::<(), attendance::Error>(())
    /// ```
    pub fn init(config: &LogConfig, verbosity: Verbosity) -> Result<Self> {
        // Build the default filter based on verbosity
        let default_filter = format!("attendance={}", verbosity.to_level_filter());

        // Allow RUST_LOG to override
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&default_filter));

        let (file_layer, writer_guard) = if config.enabled {
            let appender = open_appender(&config.directory, &config.file_name, config.rotation)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);
            (Some(layer), Some(guard))
        } else {
            (None, None)
        };

        let stderr_layer = verbosity.echoes_to_stderr().then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
        });

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stderr_layer);

        let guard = subscriber.set_default();
        debug!("Logging initialized");

        Ok(Self {
            _subscriber: guard,
            file_guard: writer_guard,
        })
    }

    /// Flush and close the log sinks.
    pub fn shutdown(self) {
        debug!("Closing log sinks");
        drop(self);
    }
}

fn open_appender(
    directory: &Path,
    file_name: &str,
    rotation: LogRotation,
) -> Result<RollingFileAppender> {
    let appender = RollingFileAppender::builder()
        .rotation(rotation.into())
        .filename_prefix(file_name)
        .build(directory)?;
    Ok(appender)
}

/// Initialize logging for tests.
///
/// This sets up a minimal logging configuration suitable for tests.
/// It only logs warnings and errors by default to keep test output clean.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
