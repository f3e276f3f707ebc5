//! `attendance` - A menu-driven employee attendance log
//!
//! This library provides the record store, the attendance service and the
//! console controller behind the `attendance` binary. Records are appended to
//! a CSV file whose first line is always the header row.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod record;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use console::Console;
pub use error::{Error, Result};
pub use logging::LogContext;
pub use record::{AttendanceRecord, Status};
pub use service::{AttendanceService, AttendanceView};
pub use store::{InitOutcome, RecordStore};
