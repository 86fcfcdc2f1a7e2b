pub mod screen;
pub mod service;

pub use screen::{SyllabusProgress, SyllabusScreen, progress};
pub use service::SyllabusService;
