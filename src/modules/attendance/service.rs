use chrono::NaiveDate;
use schoolhub_core::AppError;
use schoolhub_models::{MarkAttendanceDto, MessageResponse};
use serde_json::Value;
use tracing::instrument;

use crate::api::ApiClient;

pub struct AttendanceService;

impl AttendanceService {
    pub const MARK_PATH: &'static str = "/api/attendance/mark/";

    pub fn roster_path(class_id: &str, date: NaiveDate) -> String {
        format!(
            "/api/attendance/class/{}/?date={}",
            class_id,
            date.format("%Y-%m-%d")
        )
    }

    #[instrument(skip(client, token, dto), fields(class_id = %dto.class_id, date = %dto.date))]
    pub async fn mark(
        client: &ApiClient,
        token: Option<&str>,
        dto: &MarkAttendanceDto,
    ) -> Result<MessageResponse, AppError> {
        let value = client.post(Self::MARK_PATH, token, dto).await?;
        if value == Value::Null {
            return Ok(MessageResponse {
                message: "Attendance saved".to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }
}
