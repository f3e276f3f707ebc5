//! Core attendance types.
//!
//! This module defines the record written for every attendance action and
//! the fixed status classification it carries.

use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::Error;

/// Format of the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row written as the first line of every attendance file.
pub const HEADER: [&str; 4] = ["Timestamp", "Employee ID", "Name", "Status"];

/// Attendance status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The employee was present.
    Present,
    /// The employee was absent.
    Absent,
}

impl Status {
    /// The exact text stored in the status column.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    /// Parses user input after [`normalize_status`], so `present` and
    /// `ABSENT` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            _ => Err(Error::invalid_status(s.trim())),
        }
    }
}

/// Trims the input, upper-cases its first character and lower-cases the rest.
#[must_use]
pub fn normalize_status(input: &str) -> String {
    let mut chars = input.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A single attendance entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// When the attendance was logged, in the clock's frame.
    pub timestamp: NaiveDateTime,
    /// Free-form employee identifier.
    pub employee_id: String,
    /// Free-form employee name.
    pub name: String,
    /// Attendance status.
    pub status: Status,
}

impl AttendanceRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        timestamp: NaiveDateTime,
        employee_id: impl Into<String>,
        name: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            timestamp,
            employee_id: employee_id.into(),
            name: name.into(),
            status,
        }
    }

    /// The timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// The four columns of this record, in header order.
    #[must_use]
    pub fn to_fields(&self) -> [String; 4] {
        [
            self.timestamp_string(),
            self.employee_id.clone(),
            self.name.clone(),
            self.status.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(9, 7, 3))
            .unwrap()
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Present.to_string(), "Present");
        assert_eq!(Status::Absent.to_string(), "Absent");
    }

    #[test]
    fn test_status_parse_exact() {
        assert_eq!("Present".parse::<Status>().unwrap(), Status::Present);
        assert_eq!("Absent".parse::<Status>().unwrap(), Status::Absent);
    }

    #[test]
    fn test_status_parse_normalizes_case() {
        assert_eq!("present".parse::<Status>().unwrap(), Status::Present);
        assert_eq!("ABSENT".parse::<Status>().unwrap(), Status::Absent);
        assert_eq!("  pReSeNt ".parse::<Status>().unwrap(), Status::Present);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "maybe".parse::<Status>().unwrap_err();
        assert!(matches!(err, Error::InvalidStatus { ref input } if input == "maybe"));
        assert!("".parse::<Status>().is_err());
        assert!("Presentt".parse::<Status>().is_err());
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("present"), "Present");
        assert_eq!(normalize_status("aBSENT"), "Absent");
        assert_eq!(normalize_status(" maybe "), "Maybe");
        assert_eq!(normalize_status(""), "");
    }

    #[test]
    fn test_record_timestamp_string() {
        let record = AttendanceRecord::new(sample_timestamp(), "101", "John Doe", Status::Present);
        assert_eq!(record.timestamp_string(), "2024-03-05 09:07:03");
    }

    #[test]
    fn test_record_fields_in_header_order() {
        let record = AttendanceRecord::new(sample_timestamp(), "101", "John Doe", Status::Absent);
        assert_eq!(
            record.to_fields(),
            [
                "2024-03-05 09:07:03".to_string(),
                "101".to_string(),
                "John Doe".to_string(),
                "Absent".to_string(),
            ]
        );
    }

    #[test]
    fn test_header() {
        assert_eq!(HEADER.join(","), "Timestamp,Employee ID,Name,Status");
    }
}
