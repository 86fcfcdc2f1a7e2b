mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use common::{PASSWORD, USERNAME, app_for, logged_in_app, login_payload, spawn_backend};
use schoolhub::events::{Toast, ToastLevel, UiEvent, drain};
use schoolhub::modules::assignments::HomeworkScreen;
use schoolhub::modules::auth::{LoginScreen, logout};
use schoolhub::modules::classes::{ClassesScreen, find_class};
use schoolhub::modules::fees::FeesScreen;
use schoolhub::modules::forum::{ForumEvent, ThreadScreen};
use schoolhub::modules::leave::LeaveScreen;
use schoolhub::modules::quiz::QuizScreen;
use schoolhub::mutation::Mutation;
use schoolhub::navigation::Route;
use schoolhub::store::SessionState;
use schoolhub_core::ErrorKind;
use schoolhub_models::{CreateAssignmentDto, LeaveStatus, LoginPayload, Role};
use serde_json::json;

fn has_redirect(events: &[UiEvent], route: Route) -> bool {
    events.contains(&UiEvent::Redirect(route))
}

fn error_toasts(events: &[UiEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            UiEvent::Toast(Toast {
                level: ToastLevel::Error,
                message,
            }) => Some(message.clone()),
            _ => None,
        })
        .collect()
}

fn assignment(title: &str) -> CreateAssignmentDto {
    CreateAssignmentDto {
        title: title.into(),
        description: "Pages 10 to 12".into(),
        due_date: NaiveDate::from_ymd_opt(2099, 6, 1).unwrap(),
        subject: "Math".into(),
        class_name: "Class 1".into(),
    }
}

#[tokio::test]
async fn test_login_stores_session_and_redirects_to_dashboard() {
    let server = spawn_backend().await;
    let (app, mut rx) = app_for(&server);

    let route = LoginScreen::new(app.clone())
        .submit(format!("  {}  ", USERNAME), PASSWORD)
        .await
        .unwrap();

    assert_eq!(route, Route::TeacherDashboard);
    let state = app.store.snapshot();
    assert!(state.is_logged_in);
    assert_eq!(state.role, Some(Role::Teacher));
    assert_eq!(state.username, USERNAME);
    assert_eq!(state.subjects, vec!["Math", "Science"]);
    assert_eq!(state.classes[1].id, "2");

    let events = drain(&mut rx);
    assert!(has_redirect(&events, Route::TeacherDashboard));
    assert!(error_toasts(&events).is_empty());
}

#[tokio::test]
async fn test_login_picks_dashboard_by_role() {
    let server = spawn_backend().await;
    for (username, dashboard) in [
        ("pat", Route::PrincipalDashboard),
        ("sam", Route::StudentDashboard),
        ("ann", Route::AccountantDashboard),
    ] {
        let (app, _rx) = app_for(&server);
        let route = LoginScreen::new(app).submit(username, PASSWORD).await.unwrap();
        assert_eq!(route, dashboard);
    }
}

#[tokio::test]
async fn test_wrong_password_toasts_without_ending_session() {
    let server = spawn_backend().await;
    let (app, mut rx) = app_for(&server);
    app.store.set_selected_class("Class 1").unwrap();

    let err = LoginScreen::new(app.clone())
        .submit(USERNAME, "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    assert_eq!(app.store.snapshot().selected_class, "Class 1");
    let events = drain(&mut rx);
    assert!(!has_redirect(&events, Route::Login));
    assert_eq!(
        error_toasts(&events),
        vec!["No active account found with the given credentials".to_string()]
    );
}

#[tokio::test]
async fn test_empty_login_form_sends_nothing() {
    let server = spawn_backend().await;
    let (app, mut rx) = app_for(&server);

    let err = LoginScreen::new(app).submit("   ", "").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(server.recorded.total_hits(), 0);
    assert_eq!(error_toasts(&drain(&mut rx)).len(), 1);
}

#[tokio::test]
async fn test_unauthorized_mutation_logs_out() {
    let server = spawn_backend().await;
    let (app, mut rx) = logged_in_app(&server, "teacher");
    let token = app.token();

    let err = Mutation::new()
        .run(
            &app,
            "Saved",
            app.client
                .post("/api/expired/", token.as_deref(), &json!({"title": "x"})),
        )
        .await
        .unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(app.store.snapshot(), SessionState::default());
    let events = drain(&mut rx);
    assert!(has_redirect(&events, Route::Login));
    assert_eq!(server.recorded.hits("/api/expired/"), 1);
}

#[tokio::test]
async fn test_unauthorized_load_logs_out() {
    let server = spawn_backend().await;
    let (app, mut rx) = app_for(&server);
    let mut payload: LoginPayload = serde_json::from_value(login_payload("teacher")).unwrap();
    payload.access = "revoked-token".into();
    app.store.set_login_details(payload).unwrap();

    let mut screen = ClassesScreen::open(app.clone()).unwrap();
    screen.load().await;

    assert!(screen.state().expired);
    assert_eq!(app.store.snapshot(), SessionState::default());
    assert!(has_redirect(&drain(&mut rx), Route::Login));
    assert_eq!(server.recorded.hits("/api/classes/"), 1);
}

#[tokio::test]
async fn test_class_picked_by_name() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "teacher");

    let mut screen = ClassesScreen::open(app.clone()).unwrap();
    screen.load().await;
    let classes = screen.state().into_result().unwrap();
    let class = find_class(&classes, "class 2").unwrap();
    screen.select(class).unwrap();

    let session = app.store.snapshot();
    assert_eq!(session.selected_class, "Class 2");
    assert_eq!(session.selected_class_id, "2");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = spawn_backend().await;
    let (app, mut rx) = logged_in_app(&server, "principal");

    logout(&app).unwrap();

    assert_eq!(app.store.snapshot(), SessionState::default());
    assert!(app.token().is_none());
    assert!(has_redirect(&drain(&mut rx), Route::Login));
}

#[tokio::test]
async fn test_homework_create_and_delete_refetch() {
    let server = spawn_backend().await;
    let (app, mut rx) = logged_in_app(&server, "teacher");

    let mut screen = HomeworkScreen::open(app).unwrap();
    screen.load().await;
    assert_eq!(screen.state().data.len(), 2);

    let created = screen.create(assignment("Percentages")).await.unwrap();
    assert_eq!(created.title, "Percentages");
    assert_eq!(screen.state().data.len(), 3);
    assert_eq!(server.recorded.hits("/api/teacher/assignments/"), 3);
    assert_eq!(
        server.recorded.bodies("/api/teacher/assignments/")[0]["due_date"],
        "2099-06-01"
    );

    screen.delete("2").await.unwrap();
    let titles: Vec<_> = screen.state().data.into_iter().map(|a| a.title).collect();
    assert_eq!(titles, vec!["Fractions", "Percentages"]);

    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let buckets = screen.buckets(today);
    assert_eq!(buckets.running.len(), 2);
    assert!(buckets.previous.is_empty());
    assert!(!screen.is_submitting());
    assert!(error_toasts(&drain(&mut rx)).is_empty());
}

#[tokio::test]
async fn test_invalid_assignment_is_not_sent() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "teacher");

    let mut screen = HomeworkScreen::open(app).unwrap();
    screen.load().await;
    let err = screen.create(assignment("")).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(server.recorded.bodies("/api/teacher/assignments/").is_empty());
    assert_eq!(server.recorded.hits("/api/teacher/assignments/"), 1);
}

#[tokio::test]
async fn test_student_homework_needs_subject() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "student");

    let err = HomeworkScreen::open(app.clone()).err().unwrap();
    assert_eq!(err.kind, ErrorKind::SelectionRequired);
    assert_eq!(server.recorded.total_hits(), 0);

    app.store.set_selected_subject("Math").unwrap();
    let mut screen = HomeworkScreen::open(app).unwrap();
    screen.load().await;

    assert_eq!(
        server.recorded.hits("/api/student/assignments/subject/Math/"),
        1
    );
    let buckets = screen.buckets(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
    assert_eq!(buckets.running[0].title, "Math worksheet");
    assert_eq!(buckets.previous[0].title, "Old worksheet");

    let err = screen.create(assignment("Nope")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_screen_access_follows_role() {
    let server = spawn_backend().await;
    let (teacher, _rx) = logged_in_app(&server, "teacher");
    assert_eq!(
        QuizScreen::open(teacher.clone()).err().unwrap().kind,
        ErrorKind::Forbidden
    );
    assert_eq!(
        FeesScreen::open(teacher).err().unwrap().kind,
        ErrorKind::Forbidden
    );

    let (anonymous, _rx) = app_for(&server);
    assert_eq!(
        LeaveScreen::open(anonymous).err().unwrap().kind,
        ErrorKind::Unauthenticated
    );
}

#[tokio::test]
async fn test_forum_thread_tree_and_reply() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "student");

    let mut thread = ThreadScreen::open(app, "5").unwrap();
    thread.load().await;

    let tree = thread.tree();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.iter().map(|n| n.node_count()).sum::<usize>(), 4);
    assert_eq!(tree[0].children[0].children[0].id, "4");
    assert!(tree[1].children.is_empty());

    let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
    let lines = thread.render(now);
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "#1 jdoe · 2 hours ago: First! [reply] [edit] [delete]"
    );
    assert_eq!(lines[1], "  #2 amy · 1 hour ago: Welcome [reply]");
    assert!(lines[2].starts_with("    #4 jdoe"));

    thread.handle(ForumEvent::OpenReply("2".into()));
    thread.reply(Some("2"), "  Thanks amy  ").await.unwrap();

    assert_eq!(thread.view().open_reply(), None);
    assert_eq!(
        server.recorded.bodies("/api/forum/posts/5/comments/"),
        vec![json!({"content": "Thanks amy", "parent": "2"})]
    );
    assert_eq!(server.recorded.hits("/api/forum/posts/5/comments/"), 3);
}

#[tokio::test]
async fn test_forum_edit_is_author_only() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "teacher");

    let mut thread = ThreadScreen::open(app, "5").unwrap();
    thread.load().await;

    let err = thread.edit("2", "Changed").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    let err = thread.delete("404").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(server.recorded.total_hits(), 1);
}

#[tokio::test]
async fn test_leave_review_is_principal_only() {
    let server = spawn_backend().await;

    let (teacher, _rx) = logged_in_app(&server, "teacher");
    let mut screen = LeaveScreen::open(teacher).unwrap();
    screen.load().await;
    assert_eq!(screen.buckets().pending.len(), 1);
    let err = screen.review("1", LeaveStatus::Approved).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert!(server.recorded.bodies("/api/leave-applications/1/").is_empty());

    let (principal, mut rx) = logged_in_app(&server, "principal");
    let screen = LeaveScreen::open(principal).unwrap();
    let err = screen.review("1", LeaveStatus::Pending).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    screen.review("1", LeaveStatus::Approved).await.unwrap();
    assert_eq!(
        server.recorded.bodies("/api/leave-applications/1/"),
        vec![json!({"status": "approved"})]
    );
    assert!(drain(&mut rx).contains(&UiEvent::Toast(Toast {
        level: ToastLevel::Success,
        message: "Leave approved".into()
    })));
}

#[tokio::test]
async fn test_fees_total_in_cents() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "accountant");

    let mut screen = FeesScreen::open(app).unwrap();
    screen.load().await;

    assert_eq!(screen.state().data.len(), 2);
    assert_eq!(screen.total(), 127_550);
}
