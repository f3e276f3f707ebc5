//! Error types for attendance.
//!
//! This module defines all error types used throughout the attendance crate,
//! separating user-input conditions from storage and start-up failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for attendance operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// Failed to create the attendance file.
    #[error("failed to create attendance file at {path}: {source}")]
    StoreCreate {
        /// Path to the attendance file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to open the attendance file.
    #[error("failed to open attendance file at {path}: {source}")]
    StoreOpen {
        /// Path to the attendance file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read rows from the attendance file.
    #[error("failed to read attendance file at {path}: {source}")]
    StoreRead {
        /// Path to the attendance file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write a row to the attendance file.
    #[error("failed to write attendance file at {path}: {source}")]
    StoreWrite {
        /// Path to the attendance file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Input Errors ===
    /// The menu choice was not a number.
    #[error("invalid menu input '{input}': expected a number")]
    InvalidInput {
        /// The raw input line.
        input: String,
    },

    /// The menu choice was a number outside the menu.
    #[error("invalid menu choice {0}: expected 1, 2, or 3")]
    InvalidMenuChoice(i64),

    /// A console line was not valid UTF-8.
    #[error("input is not valid UTF-8: '{input}'")]
    InvalidEncoding {
        /// The line with undecodable bytes replaced.
        input: String,
    },

    /// The attendance status was neither `Present` nor `Absent`.
    #[error("invalid status '{input}': expected 'Present' or 'Absent'")]
    InvalidStatus {
        /// The status as entered.
        input: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Logging Errors ===
    /// The log file writer could not be created.
    #[error("failed to initialize log file: {0}")]
    LogInit(#[from] tracing_appender::rolling::InitError),

    // === I/O Errors ===
    /// Console or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for attendance operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid menu input error.
    #[must_use]
    pub fn invalid_input(input: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
        }
    }

    /// Create an invalid status error.
    #[must_use]
    pub fn invalid_status(input: impl Into<String>) -> Self {
        Self::InvalidStatus {
            input: input.into(),
        }
    }

    /// Check if this error was caused by what the user typed rather than
    /// by a failing operation.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InvalidMenuChoice(_)
                | Self::InvalidEncoding { .. }
                | Self::InvalidStatus { .. }
        )
    }
}
