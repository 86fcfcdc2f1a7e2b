//! # Schoolhub
//!
//! Client for a school-management backend: dashboards and screens for
//! principals, teachers, students and accountants, driven from the terminal.
//!
//! ## Overview
//!
//! The backend owns all business data. This crate holds the client side:
//!
//! - **Session store**: tokens, role, profile and the selected class/subject,
//!   changed only through typed actions and persisted across restarts
//! - **Data fetching**: authenticated loads with loading/error state that
//!   never shows a stale response
//! - **Screens**: one per feature (homework, attendance, syllabus, fees,
//!   leave, notices, notes, forum, quiz, classes)
//! - **Navigation**: a closed route set with an exhaustive role → menu table
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── api/           # HTTP client (bearer auth, error extraction)
//! ├── cli/           # Terminal shell (clap subcommands)
//! ├── modules/       # Feature screens
//! │   ├── auth/      # Login / logout
//! │   ├── forum/     # Posts and comment trees
//! │   └── ...
//! ├── navigation/    # Routes, menus, stack navigator
//! ├── store/         # Session state, reducer, persistence
//! ├── events.rs      # Toasts and redirects
//! ├── fetch.rs       # Data-fetch hook
//! ├── mutation.rs    # Submit guard
//! └── state.rs       # Shared application state
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `service.rs`: Backend calls
//! - `screen.rs`: Screen state and actions
//!
//! ## Error Handling
//!
//! | Failure | Reaction |
//! |---------|----------|
//! | No access token | No request; "User is not authenticated. Please log in." |
//! | HTTP 401 | Session cleared, redirect to login |
//! | Invalid form | No request; validation message toasted |
//! | Submit while submitting | Rejected as busy |
//! | Anything else | Error toast, state unchanged |
//!
//! ## Quick Start
//!
//! ```bash
//! SCHOOLHUB_API_URL=https://school.example.com
//! schoolhub login
//! schoolhub select --class "Class 1" --subject Math
//! schoolhub homework
//! ```
//!
//! ## Modules
//!
//! - [`api`]: Backend HTTP client
//! - [`cli`]: Terminal shell
//! - [`events`]: UI events
//! - [`fetch`]: Data-fetch hook
//! - [`logging`]: Tracing setup
//! - [`modules`]: Feature screens
//! - [`mutation`]: Submit guard
//! - [`navigation`]: Routes and menus
//! - [`state`]: Shared application state
//! - [`store`]: Session state store

pub mod api;
pub mod cli;
pub mod events;
pub mod fetch;
pub mod logging;
pub mod modules;
pub mod mutation;
pub mod navigation;
pub mod state;
pub mod store;

// Re-export workspace crates for convenience
pub use schoolhub_auth;
pub use schoolhub_config;
pub use schoolhub_core;
pub use schoolhub_models;
