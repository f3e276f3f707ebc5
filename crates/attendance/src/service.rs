//! Attendance operations on top of the record store.

use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::record::{AttendanceRecord, Status};
use crate::store::RecordStore;

/// Result of viewing the attendance log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceView {
    /// There is no attendance file yet.
    Missing,
    /// The log holds no records, only the header or nothing at all.
    Empty,
    /// Every row, header first, formatted for display in file order.
    Records(Vec<String>),
}

/// Logs and lists attendance, stamping records with the injected clock.
#[derive(Debug)]
pub struct AttendanceService<C> {
    store: RecordStore,
    clock: C,
}

impl<C: Clock> AttendanceService<C> {
    /// Create a service over `store` using `clock` for timestamps.
    #[must_use]
    pub fn new(store: RecordStore, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Record an attendance entry stamped with the current time.
    ///
    /// Returns the record as written.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be appended to the store.
    pub fn log_attendance(
        &self,
        employee_id: &str,
        name: &str,
        status: Status,
    ) -> Result<AttendanceRecord> {
        let record = AttendanceRecord::new(self.clock.now(), employee_id, name, status);
        self.store.append(&record)?;
        info!("Attendance logged for Employee {employee_id} ({name}): {status}");
        Ok(record)
    }

    /// List every stored row, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    pub fn view_attendance(&self) -> Result<AttendanceView> {
        let rows = self.store.read_all()?;
        if rows.is_empty() && !self.store.exists() {
            return Ok(AttendanceView::Missing);
        }
        if rows.len() <= 1 {
            info!("No attendance records found");
            return Ok(AttendanceView::Empty);
        }

        info!("Displaying all attendance records");
        let lines = rows
            .iter()
            .map(|row| {
                let line = row.join(", ");
                info!("{line}");
                line
            })
            .collect();
        Ok(AttendanceView::Records(lines))
    }
}
