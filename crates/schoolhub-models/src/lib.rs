//! # Schoolhub Models
//!
//! Wire models and form DTOs for the school-management REST backend.
//!
//! The backend is the source of truth for every record; the client only
//! decodes what it is sent and validates forms before submitting them.
//! Decoding is deliberately lenient (see `schoolhub_core::serde`): ids may be
//! numbers or strings and absent collections decode as empty.
//!
//! # Modules
//!
//! - [`role`]: The closed set of user roles
//! - [`auth`]: Login request and the authenticated-user payload
//! - [`classes`]: Classes and subjects
//! - [`assignments`]: Homework assignments
//! - [`attendance`]: Attendance rosters and marks
//! - [`syllabus`]: Syllabus topics and subtopics
//! - [`fees`]: Fee categories
//! - [`leave`]: Leave applications
//! - [`notices`]: Notices / messages
//! - [`notes`]: Subject notes
//! - [`forum`]: Discussion posts and nested comments
//! - [`quiz`]: Quizzes, questions and scores

pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod fees;
pub mod forum;
pub mod leave;
pub mod notes;
pub mod notices;
pub mod quiz;
pub mod role;
pub mod syllabus;

use serde::{Deserialize, Serialize};

// Re-export commonly used types at crate root for convenience
pub use assignments::{Assignment, CreateAssignmentDto};
pub use attendance::{AttendanceEntry, AttendanceMark, AttendanceStatus, MarkAttendanceDto};
pub use auth::{ClassRef, LoginPayload, LoginRequest};
pub use classes::{Class, Subject};
pub use fees::{CreateFeeCategoryDto, FeeCategory};
pub use forum::{Author, Comment, CreateCommentDto, ForumPost, UpdateCommentDto};
pub use leave::{CreateLeaveDto, LeaveApplication, LeaveStatus, ReviewLeaveDto};
pub use notes::{CreateNoteDto, Note};
pub use notices::{CreateNoticeDto, Notice};
pub use quiz::{Question, Quiz, SubmitScoreDto};
pub use role::Role;
pub use syllabus::{Subtopic, Syllabus, Topic};

/// Generic acknowledgement returned by mutation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
