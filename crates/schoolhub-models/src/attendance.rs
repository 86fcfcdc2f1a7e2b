//! Attendance rosters.

use chrono::NaiveDate;
use schoolhub_core::serde::opaque_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    /// Not marked yet for the day.
    #[default]
    #[serde(other)]
    Unmarked,
}

/// One student's line on a class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    #[serde(deserialize_with = "opaque_string")]
    pub student_id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub student_name: String,
    #[serde(default)]
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceMark {
    pub student_id: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct MarkAttendanceDto {
    #[validate(length(min = 1, message = "Class is required"))]
    pub class_id: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "At least one student must be marked"))]
    pub records: Vec<AttendanceMark>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_unmarked() {
        let entry: AttendanceEntry =
            serde_json::from_str(r#"{"student_id": 4, "status": "excused"}"#).unwrap();
        assert_eq!(entry.status, AttendanceStatus::Unmarked);

        let entry: AttendanceEntry = serde_json::from_str(r#"{"student_id": 4}"#).unwrap();
        assert_eq!(entry.status, AttendanceStatus::Unmarked);
    }
}
