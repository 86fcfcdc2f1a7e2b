pub mod screen;
pub mod service;

pub use screen::{LeaveBuckets, LeaveScreen, bucket_by_status};
pub use service::LeaveService;
