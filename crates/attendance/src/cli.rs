//! Command-line interface for attendance.
//!
//! The program itself is menu driven; flags only adjust where data and logs
//! go and how chatty the log sink is.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// attendance - Log and review employee attendance
///
/// Presents a menu for logging attendance and listing every recorded entry.
/// Records are appended to a CSV file.
#[derive(Debug, Parser)]
#[command(name = "attendance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Attendance file to use instead of the configured one
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
