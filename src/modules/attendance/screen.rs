use chrono::NaiveDate;
use schoolhub_core::AppError;
use schoolhub_models::{AttendanceEntry, AttendanceMark, AttendanceStatus, MarkAttendanceDto};

use super::service::AttendanceService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::{require_role, require_selection};
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub unmarked: usize,
}

impl AttendanceSummary {
    pub fn from_roster(entries: &[AttendanceEntry]) -> Self {
        entries.iter().fold(
            Self {
                total: entries.len(),
                ..Self::default()
            },
            |mut summary, entry| {
                match entry.status {
                    AttendanceStatus::Present => summary.present += 1,
                    AttendanceStatus::Absent => summary.absent += 1,
                    AttendanceStatus::Late => summary.late += 1,
                    AttendanceStatus::Unmarked => summary.unmarked += 1,
                }
                summary
            },
        )
    }

    /// Share of marked students who attended (present or late), 0-100.
    pub fn percentage(&self) -> f64 {
        let marked = self.total - self.unmarked;
        if marked == 0 {
            return 0.0;
        }
        (self.present + self.late) as f64 * 100.0 / marked as f64
    }
}

/// Daily roster of the selected class.
pub struct AttendanceScreen {
    app: AppState,
    class_id: String,
    date: NaiveDate,
    roster: UseFetch<Vec<AttendanceEntry>>,
    mutation: Mutation,
}

impl AttendanceScreen {
    pub fn open(app: AppState, date: NaiveDate) -> Result<Self, AppError> {
        require_role(&app, Route::Attendance)?;
        let class_id = require_selection(&app.store.snapshot().selected_class_id, "class")?;
        let roster = app.fetch(AttendanceService::roster_path(&class_id, date));
        Ok(Self {
            app,
            class_id,
            date,
            roster,
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.roster.mount()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Switches the roster to another day.
    pub fn set_date(&mut self, date: NaiveDate) -> Option<FetchCycle> {
        self.date = date;
        self.roster
            .set_url(AttendanceService::roster_path(&self.class_id, date))
    }

    pub fn state(&self) -> FetchState<Vec<AttendanceEntry>> {
        self.roster.state()
    }

    pub fn summary(&self) -> AttendanceSummary {
        self.roster
            .with_state(|state| AttendanceSummary::from_roster(&state.data))
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    pub async fn mark(&self, records: Vec<AttendanceMark>) -> Result<(), AppError> {
        let dto = MarkAttendanceDto {
            class_id: self.class_id.clone(),
            date: self.date,
            records,
        };
        let token = self.app.token();
        self.mutation
            .submit(
                &self.app,
                &dto,
                "Attendance saved",
                AttendanceService::mark(&self.app.client, token.as_deref(), &dto),
            )
            .await?;
        self.roster.refetch().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, status: AttendanceStatus) -> AttendanceEntry {
        AttendanceEntry {
            student_id: id.into(),
            student_name: format!("Student {}", id),
            status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = AttendanceSummary::from_roster(&[
            entry("1", AttendanceStatus::Present),
            entry("2", AttendanceStatus::Absent),
            entry("3", AttendanceStatus::Late),
            entry("4", AttendanceStatus::Unmarked),
        ]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.unmarked, 1);
        assert!((summary.percentage() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_roster_percentage() {
        assert_eq!(AttendanceSummary::from_roster(&[]).percentage(), 0.0);
    }

    #[test]
    fn test_roster_path_formats_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            AttendanceService::roster_path("12", date),
            "/api/attendance/class/12/?date=2024-03-07"
        );
    }
}
