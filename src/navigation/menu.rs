use schoolhub_models::Role;

use super::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

const fn item(label: &'static str, route: Route) -> MenuItem {
    MenuItem { label, route }
}

static TEACHER_MENU: &[MenuItem] = &[
    item("Dashboard", Route::TeacherDashboard),
    item("Classes", Route::Classes),
    item("Attendance", Route::Attendance),
    item("Homework", Route::Homework),
    item("Syllabus", Route::Syllabus),
    item("Notes", Route::Notes),
    item("Forum", Route::Forum),
    item("Leave", Route::Leave),
    item("Notices", Route::Notices),
];

static STUDENT_MENU: &[MenuItem] = &[
    item("Dashboard", Route::StudentDashboard),
    item("Homework", Route::Homework),
    item("Syllabus", Route::Syllabus),
    item("Notes", Route::Notes),
    item("Forum", Route::Forum),
    item("Quiz", Route::Quiz),
    item("Leave", Route::Leave),
    item("Notices", Route::Notices),
];

static PRINCIPAL_MENU: &[MenuItem] = &[
    item("Dashboard", Route::PrincipalDashboard),
    item("Classes", Route::Classes),
    item("Attendance", Route::Attendance),
    item("Fees", Route::Fees),
    item("Leave Requests", Route::Leave),
    item("Notices", Route::Notices),
];

static ACCOUNTANT_MENU: &[MenuItem] = &[
    item("Dashboard", Route::AccountantDashboard),
    item("Fees", Route::Fees),
    item("Leave", Route::Leave),
    item("Notices", Route::Notices),
];

/// Sidebar entries for a role.
pub fn menu_for(role: Role) -> &'static [MenuItem] {
    match role {
        Role::Teacher => TEACHER_MENU,
        Role::Student => STUDENT_MENU,
        Role::Principal => PRINCIPAL_MENU,
        Role::Accountant => ACCOUNTANT_MENU,
    }
}

/// Landing screen after login.
pub fn dashboard_for(role: Role) -> Route {
    match role {
        Role::Teacher => Route::TeacherDashboard,
        Role::Student => Route::StudentDashboard,
        Role::Principal => Route::PrincipalDashboard,
        Role::Accountant => Route::AccountantDashboard,
    }
}
