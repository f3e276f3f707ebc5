//! Wall-clock source for attendance timestamps.

use chrono::{FixedOffset, Local, NaiveDateTime, Utc};

/// Source of the current wall-clock time.
///
/// The returned value is already expressed in the frame the timestamp column
/// is written in, so callers only format it.
pub trait Clock {
    /// The current time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock, either in the local time zone or at a fixed
/// offset from UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// A clock reporting local time.
    #[must_use]
    pub fn local() -> Self {
        Self { offset: None }
    }

    /// A clock reporting UTC shifted by `offset`.
    #[must_use]
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    /// The configured offset, `None` for local time.
    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(
    /// The instant every call returns.
    pub NaiveDateTime,
);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
