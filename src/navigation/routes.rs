use std::fmt;

use schoolhub_models::Role;

/// Every screen the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    TeacherDashboard,
    StudentDashboard,
    PrincipalDashboard,
    AccountantDashboard,
    Classes,
    Homework,
    Attendance,
    Syllabus,
    Fees,
    Leave,
    Notices,
    Notes,
    Forum,
    Quiz,
    Profile,
}

/// Whether a screen renders inside the sidebar + top bar chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    WithSidebar,
    Standalone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub route: Route,
    pub layout: Layout,
}

impl Route {
    pub const ALL: [Route; 16] = [
        Route::Login,
        Route::TeacherDashboard,
        Route::StudentDashboard,
        Route::PrincipalDashboard,
        Route::AccountantDashboard,
        Route::Classes,
        Route::Homework,
        Route::Attendance,
        Route::Syllabus,
        Route::Fees,
        Route::Leave,
        Route::Notices,
        Route::Notes,
        Route::Forum,
        Route::Quiz,
        Route::Profile,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::TeacherDashboard => "/teacher",
            Route::StudentDashboard => "/student",
            Route::PrincipalDashboard => "/principal",
            Route::AccountantDashboard => "/accountant",
            Route::Classes => "/classes",
            Route::Homework => "/homework",
            Route::Attendance => "/attendance",
            Route::Syllabus => "/syllabus",
            Route::Fees => "/fees",
            Route::Leave => "/leave",
            Route::Notices => "/notices",
            Route::Notes => "/notes",
            Route::Forum => "/forum",
            Route::Quiz => "/quiz",
            Route::Profile => "/profile",
        }
    }

    pub const fn layout(self) -> Layout {
        match self {
            Route::Login | Route::Quiz => Layout::Standalone,
            Route::TeacherDashboard
            | Route::StudentDashboard
            | Route::PrincipalDashboard
            | Route::AccountantDashboard
            | Route::Classes
            | Route::Homework
            | Route::Attendance
            | Route::Syllabus
            | Route::Fees
            | Route::Leave
            | Route::Notices
            | Route::Notes
            | Route::Forum
            | Route::Profile => Layout::WithSidebar,
        }
    }

    pub const fn entry(self) -> RouteEntry {
        RouteEntry {
            path: self.path(),
            route: self,
            layout: self.layout(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::TeacherDashboard
            | Route::StudentDashboard
            | Route::PrincipalDashboard
            | Route::AccountantDashboard => "Dashboard",
            Route::Classes => "Classes",
            Route::Homework => "Homework",
            Route::Attendance => "Attendance",
            Route::Syllabus => "Syllabus",
            Route::Fees => "Fees",
            Route::Leave => "Leave",
            Route::Notices => "Notices",
            Route::Notes => "Notes",
            Route::Forum => "Forum",
            Route::Quiz => "Quiz",
            Route::Profile => "Profile",
        }
    }

    /// Roles that may open this screen. `Login` is open to everyone and
    /// returns every role.
    pub fn allowed_roles(self) -> &'static [Role] {
        use Role::*;
        match self {
            Route::Login | Route::Profile | Route::Notices | Route::Leave => {
                &[Teacher, Student, Principal, Accountant]
            }
            Route::TeacherDashboard => &[Teacher],
            Route::StudentDashboard => &[Student],
            Route::PrincipalDashboard => &[Principal],
            Route::AccountantDashboard => &[Accountant],
            Route::Classes | Route::Attendance => &[Teacher, Principal],
            Route::Homework | Route::Syllabus | Route::Notes | Route::Forum => {
                &[Teacher, Student]
            }
            Route::Fees => &[Principal, Accountant],
            Route::Quiz => &[Student],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Path table of the web shell, one entry per route in [`Route::ALL`] order.
pub static ROUTES: [RouteEntry; Route::ALL.len()] = route_table();

const fn route_table() -> [RouteEntry; Route::ALL.len()] {
    let mut table = [Route::Login.entry(); Route::ALL.len()];
    let mut i = 0;
    while i < Route::ALL.len() {
        table[i] = Route::ALL[i].entry();
        i += 1;
    }
    table
}

pub fn can_access(role: Role, route: Route) -> bool {
    route.allowed_roles().contains(&role)
}

pub fn resolve_path(path: &str) -> Option<&'static RouteEntry> {
    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.iter().find(|entry| entry.path == path)
}

/// Bottom tabs of the mobile shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Notifications,
    Calendar,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Notifications, Tab::Calendar, Tab::Profile];

    pub fn route(self, role: Role) -> Route {
        match self {
            Tab::Home => super::dashboard_for(role),
            Tab::Notifications => Route::Notices,
            Tab::Calendar => Route::Leave,
            Tab::Profile => Route::Profile,
        }
    }
}
