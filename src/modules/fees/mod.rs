pub mod screen;
pub mod service;

pub use screen::{FeesScreen, total_amount};
pub use service::FeeService;
