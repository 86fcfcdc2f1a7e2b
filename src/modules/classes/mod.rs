pub mod screen;
pub mod service;

pub use screen::{ClassesScreen, find_class};
pub use service::ClassService;
