pub mod screen;
pub mod service;

pub use screen::{AttendanceScreen, AttendanceSummary};
pub use service::AttendanceService;
