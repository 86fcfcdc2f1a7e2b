//! Leave applications.

use chrono::NaiveDate;
use schoolhub_core::serde::opaque_string;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub applicant: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: LeaveStatus,
}

impl LeaveApplication {
    /// Inclusive length of the leave in days.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_leave_range"))]
pub struct CreateLeaveDto {
    #[validate(length(min = 3, max = 1000, message = "Reason must be between 3 and 1000 characters"))]
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_leave_range(dto: &CreateLeaveDto) -> Result<(), ValidationError> {
    if dto.end_date < dto.start_date {
        let mut error = ValidationError::new("date_range");
        error.message = Some("End date must not be before start date".into());
        return Err(error);
    }
    Ok(())
}

/// Principal's decision on a pending application.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewLeaveDto {
    pub status: LeaveStatus,
}
