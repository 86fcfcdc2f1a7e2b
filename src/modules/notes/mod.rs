pub mod screen;
pub mod service;

pub use screen::NotesScreen;
pub use service::NoteService;
