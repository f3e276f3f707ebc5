//! CSV-backed record store.
//!
//! The attendance file is opened for the duration of a single operation and
//! closed again before returning. Nothing guards against a second process
//! appending to the same file at the same time.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{AttendanceRecord, HEADER};

/// What [`RecordStore::initialize`] found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The file was created, or found empty, and the header written.
    Created,
    /// The file was already present with content and left untouched.
    AlreadyExists,
}

/// Append-only store of attendance rows in a delimited text file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Path to the attendance file.
    path: PathBuf,
}

impl RecordStore {
    /// Create a store for the file at `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the attendance file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether anything exists at the attendance file's path.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Ensure the attendance file exists, writing the header if it does not.
    ///
    /// An existing zero-length file gets the header too. A file with content
    /// is never truncated or rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created,
    /// or if the header cannot be written.
    pub fn initialize(&self) -> Result<InitOutcome> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                if !self.is_empty_file() {
                    info!("{} already exists", self.path.display());
                    return Ok(InitOutcome::AlreadyExists);
                }
                warn!("{} is empty, writing the header", self.path.display());
                self.open_append()?
            }
            Err(source) => {
                return Err(Error::StoreCreate {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut writer = Self::writer_for(file);
        writer
            .write_record(HEADER)
            .map_err(|source| self.write_error(source))?;
        writer
            .flush()
            .map_err(|source| self.write_error(source.into()))?;

        info!("{} created successfully", self.path.display());
        Ok(InitOutcome::Created)
    }

    /// Append one record as a new line.
    ///
    /// If the file has gone missing or is empty it is initialized first, so
    /// the header always stays on the first line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, record: &AttendanceRecord) -> Result<()> {
        if !self.exists() || self.is_empty_file() {
            warn!(
                "{} is missing or empty, writing the header before appending",
                self.path.display()
            );
            self.initialize()?;
        }

        let mut writer = Self::writer_for(self.open_append()?);
        writer
            .write_record(record.to_fields())
            .map_err(|source| self.write_error(source))?;
        writer
            .flush()
            .map_err(|source| self.write_error(source.into()))?;

        debug!(
            "Appended record for employee {} to {}",
            record.employee_id,
            self.path.display()
        );
        Ok(())
    }

    /// Read every row, header included, in file order.
    ///
    /// A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or parsed.
    pub fn read_all(&self) -> Result<Vec<Vec<String>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "No attendance records file found at {}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::StoreOpen {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let rows = reader
            .records()
            .map(|row| {
                row.map(|fields| fields.iter().map(str::to_string).collect::<Vec<_>>())
            })
            .collect::<std::result::Result<Vec<Vec<String>>, _>>()
            .map_err(|source| Error::StoreRead {
                path: self.path.clone(),
                source,
            })?;

        debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    fn is_empty_file(&self) -> bool {
        std::fs::metadata(&self.path).is_ok_and(|meta| meta.is_file() && meta.len() == 0)
    }

    fn open_append(&self) -> Result<File> {
        OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::StoreOpen {
                path: self.path.clone(),
                source,
            })
    }

    fn writer_for(file: File) -> csv::Writer<File> {
        WriterBuilder::new()
            .has_headers(false)
            .terminator(line_terminator())
            .from_writer(file)
    }

    fn write_error(&self, source: csv::Error) -> Error {
        Error::StoreWrite {
            path: self.path.clone(),
            source,
        }
    }
}

/// The platform's line ending.
fn line_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Status;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = RecordStore::new(dir.path().join("attendance_records.csv"));
        (dir, store)
    }

    fn create_test_record(employee_id: &str, name: &str, status: Status) -> AttendanceRecord {
        let timestamp = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        AttendanceRecord::new(timestamp, employee_id, name, status)
    }

    fn header_row() -> Vec<String> {
        HEADER.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_initialize_creates_header_only() {
        let (_dir, store) = create_test_store();

        let outcome = store.initialize().unwrap();
        assert_eq!(outcome, InitOutcome::Created);

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents.lines().collect::<Vec<_>>(),
            vec!["Timestamp,Employee ID,Name,Status"]
        );
        assert_eq!(store.read_all().unwrap(), vec![header_row()]);
    }

    #[test]
    fn test_initialize_twice_is_idempotent() {
        let (_dir, store) = create_test_store();

        store.initialize().unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let outcome = store.initialize().unwrap();
        assert_eq!(outcome, InitOutcome::AlreadyExists);
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_initialize_keeps_existing_rows() {
        let (_dir, store) = create_test_store();
        store.initialize().unwrap();
        store
            .append(&create_test_record("101", "John Doe", Status::Present))
            .unwrap();

        assert_eq!(store.initialize().unwrap(), InitOutcome::AlreadyExists);
        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_initialize_writes_header_to_empty_file() {
        let (_dir, store) = create_test_store();
        std::fs::write(store.path(), "").unwrap();

        assert_eq!(store.initialize().unwrap(), InitOutcome::Created);
        assert_eq!(store.read_all().unwrap(), vec![header_row()]);

        assert_eq!(store.initialize().unwrap(), InitOutcome::AlreadyExists);
        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_initialize_leaves_directory_alone() {
        let (_dir, store) = create_test_store();
        std::fs::create_dir(store.path()).unwrap();

        assert_eq!(store.initialize().unwrap(), InitOutcome::AlreadyExists);
        assert!(store.path().is_dir());
    }

    #[test]
    fn test_initialize_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("nested").join("deeper").join("log.csv"));

        assert_eq!(store.initialize().unwrap(), InitOutcome::Created);
        assert!(store.path().exists());
    }

    #[test]
    fn test_append_writes_one_line() {
        let (_dir, store) = create_test_store();
        store.initialize().unwrap();

        store
            .append(&create_test_record("101", "John Doe", Status::Present))
            .unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], header_row());
        assert_eq!(
            rows[1],
            vec!["2024-06-01 10:00:00", "101", "John Doe", "Present"]
        );
    }

    #[test]
    fn test_append_preserves_order() {
        let (_dir, store) = create_test_store();
        store.initialize().unwrap();

        for i in 0..5 {
            store
                .append(&create_test_record(&format!("{i}"), "Worker", Status::Absent))
                .unwrap();
        }

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 6);
        let ids: Vec<&str> = rows[1..].iter().map(|r| r[1].as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_append_quotes_fields_with_commas() {
        let (_dir, store) = create_test_store();
        store.initialize().unwrap();

        store
            .append(&create_test_record("7", "Doe, Jane", Status::Present))
            .unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows[1].len(), 4);
        assert_eq!(rows[1][2], "Doe, Jane");
    }

    #[test]
    fn test_append_recreates_missing_file_with_header() {
        let (_dir, store) = create_test_store();

        store
            .append(&create_test_record("101", "John Doe", Status::Present))
            .unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], header_row());
    }

    #[test]
    fn test_append_to_empty_file_keeps_header_first() {
        let (_dir, store) = create_test_store();
        std::fs::write(store.path(), "").unwrap();

        store
            .append(&create_test_record("101", "John Doe", Status::Present))
            .unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], header_row());
        assert_eq!(rows[1][1], "101");
    }

    #[test]
    fn test_read_all_missing_file_is_empty() {
        let (_dir, store) = create_test_store();
        assert!(!store.exists());
        assert!(store.read_all().unwrap().is_empty());

        store.initialize().unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_read_all_accepts_crlf() {
        let (_dir, store) = create_test_store();
        std::fs::write(
            store.path(),
            "Timestamp,Employee ID,Name,Status\r\n2024-01-01 09:00:00,1,A,Present\r\n",
        )
        .unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][3], "Present");
    }

    #[test]
    fn test_read_all_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());

        assert!(store.read_all().is_err());
    }

    #[test]
    fn test_path() {
        let store = RecordStore::new("/tmp/attendance.csv");
        assert_eq!(store.path(), Path::new("/tmp/attendance.csv"));
    }
}
