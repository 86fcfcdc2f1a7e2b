//! Navigation shell.
//!
//! Screens are a closed [`Route`] enum. Which routes a role may open, which
//! sidebar entries it sees and where it lands after login are all exhaustive
//! matches on [`Role`](schoolhub_models::Role), so adding a role fails to
//! compile until every table handles it.
//!
//! | Role | Landing screen |
//! |------|----------------|
//! | Teacher | `TeacherDashboard` |
//! | Student | `StudentDashboard` |
//! | Principal | `PrincipalDashboard` |
//! | Accountant | `AccountantDashboard` |

pub mod menu;
pub mod navigator;
pub mod routes;

pub use menu::{MenuItem, dashboard_for, menu_for};
pub use navigator::Navigator;
pub use routes::{Layout, ROUTES, Route, RouteEntry, Tab, can_access, resolve_path};
