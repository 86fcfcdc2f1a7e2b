pub mod screen;
pub mod service;

pub use screen::{NoticesScreen, newest_first};
pub use service::NoticeService;
