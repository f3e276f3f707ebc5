//! `attendance` - CLI for the attendance log
//!
//! This binary wires configuration, logging and the record store together and
//! hands control to the interactive menu.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;

use attendance::cli::Cli;
use attendance::{AttendanceService, Config, Console, LogContext, RecordStore, SystemClock};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(file) = cli.file.clone() {
        config.store.path = file;
    }

    // Open the log sinks; they are closed when the menu exits
    let logging = LogContext::init(&config.log, cli.verbosity()).context("opening log file")?;

    let clock = config
        .utc_offset()
        .map_or_else(SystemClock::local, SystemClock::with_offset);
    let service = AttendanceService::new(RecordStore::new(config.store_path()), clock);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(service, stdin.lock(), stdout.lock()).with_logging(logging);
    console.run().context("console I/O failed")?;

    Ok(())
}
