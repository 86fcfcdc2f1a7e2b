pub mod screen;
pub mod service;

pub use screen::{AssignmentBuckets, HomeworkScreen, partition_by_due_date};
pub use service::AssignmentService;
