pub mod screen;
pub mod service;

pub use screen::{LoginScreen, logout};
pub use service::AuthService;
