//! Terminal shell.
//!
//! Each subcommand opens one screen, runs it to completion and prints the
//! result. Toasts and redirects queued by the screen are printed after the
//! command finishes.

use anyhow::anyhow;
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use schoolhub_config::ClientConfig;
use schoolhub_core::{AppError, ErrorKind};
use schoolhub_models::fees::{format_amount, parse_amount};
use schoolhub_models::{
    AttendanceMark, AttendanceStatus, CreateAssignmentDto, CreateFeeCategoryDto, CreateLeaveDto,
    CreateNoticeDto, LeaveStatus,
};
use tokio::sync::mpsc;

use crate::events::{UiEvent, drain};
use crate::modules::assignments::HomeworkScreen;
use crate::modules::attendance::AttendanceScreen;
use crate::modules::auth::{LoginScreen, logout};
use crate::modules::classes::{ClassesScreen, find_class};
use crate::modules::fees::FeesScreen;
use crate::modules::forum::{ForumScreen, ThreadScreen};
use crate::modules::leave::LeaveScreen;
use crate::modules::notes::NotesScreen;
use crate::modules::notices::NoticesScreen;
use crate::modules::quiz::{QuizScreen, QuizTimer};
use crate::modules::syllabus::SyllabusScreen;
use crate::navigation::{Layout, menu_for};
use crate::state::{AppState, init_app_state};

#[derive(Parser)]
#[command(name = "schoolhub")]
#[command(about = "Schoolhub - school management from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user and current selection
    Whoami,
    /// Choose the class and subject the other screens work on
    Select {
        #[arg(short = 'c', long)]
        class: Option<String>,

        #[arg(short = 's', long)]
        subject: Option<String>,
    },
    /// List the screens available to your role
    Menu,
    /// List classes and pick one
    Classes {
        /// Class to select without prompting
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Assignments: running and previous
    Homework {
        #[command(subcommand)]
        action: Option<HomeworkAction>,
    },
    /// Attendance roster of the selected class
    Attendance {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(short = 'd', long)]
        date: Option<NaiveDate>,

        /// Mark attendance interactively
        #[arg(long)]
        mark: bool,
    },
    /// Syllabus of the selected class and subject
    Syllabus {
        /// Topic id to mark as completed
        #[arg(long)]
        complete: Option<String>,
    },
    /// Fee categories
    Fees {
        #[command(subcommand)]
        action: Option<FeesAction>,
    },
    /// Leave applications
    Leave {
        #[command(subcommand)]
        action: Option<LeaveAction>,
    },
    /// School notices
    Notices {
        #[command(subcommand)]
        action: Option<NoticesAction>,
    },
    /// Study notes of the selected subject
    Notes {
        #[command(subcommand)]
        action: Option<NotesAction>,
    },
    /// Discussion forum
    Forum {
        #[command(subcommand)]
        action: Option<ForumAction>,
    },
    /// Take a quiz
    Quiz,
}

#[derive(Subcommand)]
pub enum HomeworkAction {
    List,
    Create {
        #[arg(short = 't', long)]
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,

        #[arg(short = 'd', long, default_value = "")]
        description: String,

        /// Defaults to the selected subject
        #[arg(short = 's', long)]
        subject: Option<String>,

        /// Defaults to the selected class
        #[arg(short = 'c', long)]
        class: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum FeesAction {
    List,
    Add {
        #[arg(short = 'n', long)]
        name: String,

        /// Amount such as 1200.50
        #[arg(short = 'a', long)]
        amount: String,

        #[arg(short = 'd', long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    List,
    Apply {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,

        #[arg(short = 'r', long)]
        reason: String,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum NoticesAction {
    List,
    Send {
        #[arg(short = 't', long)]
        title: String,

        #[arg(short = 'c', long)]
        content: String,
    },
}

#[derive(Subcommand)]
pub enum NotesAction {
    List,
    Add {
        #[arg(short = 't', long)]
        title: String,

        #[arg(short = 'c', long, default_value = "")]
        content: String,
    },
}

#[derive(Subcommand)]
pub enum ForumAction {
    /// List posts
    Posts,
    /// Show the comment tree of a post
    Thread { post: String },
    /// Comment on a post, or reply to a comment with --parent
    Comment {
        post: String,
        content: String,

        #[arg(long)]
        parent: Option<String>,
    },
    /// Edit one of your comments
    Edit {
        post: String,
        comment: String,
        content: String,
    },
    /// Delete one of your comments
    Delete { post: String, comment: String },
}

fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::new(ErrorKind::Config, anyhow!("Failed to read input: {}", err))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Runs one command and prints the queued toasts.
pub async fn run(config: ClientConfig, command: Commands) -> Result<(), AppError> {
    let (app, mut events) = init_app_state(config)?;
    let result = dispatch(&app, command).await;
    print_events(&mut events);
    result
}

fn print_events(events: &mut mpsc::UnboundedReceiver<UiEvent>) {
    for event in drain(events) {
        match event {
            UiEvent::Toast(toast) => println!("{}", toast),
            UiEvent::Redirect(route) => println!("→ {}", route),
        }
    }
}

async fn dispatch(app: &AppState, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Login { username, password } => handle_login(app, username, password).await,
        Commands::Logout => logout(app),
        Commands::Whoami => handle_whoami(app),
        Commands::Select { class, subject } => handle_select(app, class, subject),
        Commands::Menu => handle_menu(app),
        Commands::Classes { name } => handle_classes(app, name).await,
        Commands::Homework { action } => handle_homework(app, action.unwrap_or(HomeworkAction::List)).await,
        Commands::Attendance { date, mark } => handle_attendance(app, date.unwrap_or_else(today), mark).await,
        Commands::Syllabus { complete } => handle_syllabus(app, complete).await,
        Commands::Fees { action } => handle_fees(app, action.unwrap_or(FeesAction::List)).await,
        Commands::Leave { action } => handle_leave(app, action.unwrap_or(LeaveAction::List)).await,
        Commands::Notices { action } => handle_notices(app, action.unwrap_or(NoticesAction::List)).await,
        Commands::Notes { action } => handle_notes(app, action.unwrap_or(NotesAction::List)).await,
        Commands::Forum { action } => handle_forum(app, action.unwrap_or(ForumAction::Posts)).await,
        Commands::Quiz => handle_quiz(app).await,
    }
}

async fn handle_login(
    app: &AppState,
    username: Option<String>,
    password: Option<String>,
) -> Result<(), AppError> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_error)?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(prompt_error)?,
    };

    LoginScreen::new(app.clone()).submit(username, password).await?;

    let session = app.store.snapshot();
    println!("\n✅ Logged in as {}", session.display_name());
    if let Some(role) = session.role {
        println!("   Role: {}", role);
    }
    Ok(())
}

fn handle_whoami(app: &AppState) -> Result<(), AppError> {
    let session = app.store.snapshot();
    let Some(role) = session.role.filter(|_| session.is_logged_in) else {
        return Err(AppError::unauthenticated());
    };
    println!("{} ({})", session.display_name(), session.username);
    println!("   Role: {}", role);
    if !session.email.is_empty() {
        println!("   Email: {}", session.email);
    }
    let or_none = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    println!("   Class: {}", or_none(&session.selected_class));
    println!("   Subject: {}", or_none(&session.selected_subject));
    Ok(())
}

fn handle_select(
    app: &AppState,
    class: Option<String>,
    subject: Option<String>,
) -> Result<(), AppError> {
    let session = app.store.snapshot();
    if !session.is_logged_in {
        return Err(AppError::unauthenticated());
    }

    let interactive = class.is_none() && subject.is_none();

    let class = match class {
        Some(name) => Some(name),
        None if interactive && !session.classes.is_empty() => {
            let names: Vec<&str> = session.classes.iter().map(|c| c.name.as_str()).collect();
            let index = Select::new()
                .with_prompt("Class")
                .items(&names)
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            Some(names[index].to_string())
        }
        None => None,
    };

    if let Some(name) = class {
        let class_ref = session
            .classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AppError::not_found(anyhow!("You have no class named {}", name)))?;
        app.store.set_selected_class(class_ref.name.clone())?;
        app.store.set_selected_class_id(class_ref.id.clone())?;
        println!("✅ Class: {}", class_ref.name);
    }

    let subject = match subject {
        Some(subject) => Some(subject),
        None if interactive && !session.subjects.is_empty() => {
            let index = Select::new()
                .with_prompt("Subject")
                .items(&session.subjects)
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            Some(session.subjects[index].clone())
        }
        None => None,
    };

    if let Some(subject) = subject {
        app.store.set_selected_subject(subject.trim())?;
        println!("✅ Subject: {}", subject.trim());
    }
    Ok(())
}

fn handle_menu(app: &AppState) -> Result<(), AppError> {
    let role = app.store.role().ok_or_else(AppError::unauthenticated)?;
    println!("Menu for {}:", role);
    for item in menu_for(role) {
        let standalone = match item.route.layout() {
            Layout::Standalone => " (standalone)",
            Layout::WithSidebar => "",
        };
        println!("   {:<16} {}{}", item.label, item.route.path(), standalone);
    }
    Ok(())
}

async fn handle_classes(app: &AppState, name: Option<String>) -> Result<(), AppError> {
    let mut screen = ClassesScreen::open(app.clone())?;
    screen.load().await;
    let classes = screen.state().into_result()?;
    if classes.is_empty() {
        println!("No classes found");
        return Ok(());
    }

    let chosen = match name {
        Some(name) => find_class(&classes, &name)
            .ok_or_else(|| AppError::not_found(anyhow!("No class named {}", name.trim())))?,
        None => {
            let labels: Vec<String> = classes
                .iter()
                .map(|c| format!("{} {}", c.name, c.section).trim().to_string())
                .collect();
            let index = Select::new()
                .with_prompt("Select a class")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            &classes[index]
        }
    };
    screen.select(chosen)?;
    println!("✅ Class: {}", chosen.name);

    let subjects = screen.subjects().await?;
    for subject in subjects {
        println!("   {} {}", subject.name, subject.teacher);
    }
    Ok(())
}

async fn handle_homework(app: &AppState, action: HomeworkAction) -> Result<(), AppError> {
    let mut screen = HomeworkScreen::open(app.clone())?;
    match action {
        HomeworkAction::List => {
            screen.load().await;
            screen.state().into_result()?;
            let buckets = screen.buckets(today());
            println!("Running ({}):", buckets.running.len());
            for a in &buckets.running {
                println!("   #{} {} · due {} · {}", a.id, a.title, a.due_date, a.subject);
            }
            println!("Previous ({}):", buckets.previous.len());
            for a in &buckets.previous {
                println!("   #{} {} · due {} · {}", a.id, a.title, a.due_date, a.subject);
            }
        }
        HomeworkAction::Create {
            title,
            due,
            description,
            subject,
            class,
        } => {
            let session = app.store.snapshot();
            let dto = CreateAssignmentDto {
                title,
                description,
                due_date: due,
                subject: subject.unwrap_or(session.selected_subject),
                class_name: class.unwrap_or(session.selected_class),
            };
            screen.create(dto).await?;
        }
        HomeworkAction::Delete { id } => screen.delete(&id).await?,
    }
    Ok(())
}

async fn handle_attendance(app: &AppState, date: NaiveDate, mark: bool) -> Result<(), AppError> {
    let mut screen = AttendanceScreen::open(app.clone(), date)?;
    screen.load().await;
    let roster = screen.state().into_result()?;

    if mark {
        let choices = ["Present", "Absent", "Late"];
        let mut records = Vec::with_capacity(roster.len());
        for entry in &roster {
            let index = Select::new()
                .with_prompt(&entry.student_name)
                .items(&choices)
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            let status = match index {
                0 => AttendanceStatus::Present,
                1 => AttendanceStatus::Absent,
                _ => AttendanceStatus::Late,
            };
            records.push(AttendanceMark {
                student_id: entry.student_id.clone(),
                status,
            });
        }
        screen.mark(records).await?;
    }

    for entry in screen.state().data {
        println!("   {:<24} {:?}", entry.student_name, entry.status);
    }
    let summary = screen.summary();
    println!(
        "{}: {} present, {} absent, {} late, {} unmarked ({:.0}%)",
        screen.date(),
        summary.present,
        summary.absent,
        summary.late,
        summary.unmarked,
        summary.percentage()
    );
    Ok(())
}

async fn handle_syllabus(app: &AppState, complete: Option<String>) -> Result<(), AppError> {
    let mut screen = SyllabusScreen::open(app.clone())?;
    screen.load().await;
    screen.state().into_result()?;

    if let Some(topic_id) = complete {
        screen.mark_complete(&topic_id, true).await?;
    }

    let syllabus = screen.state().data;
    for topic in &syllabus.topics {
        let mark = if topic.completed { "✔" } else { " " };
        println!("[{}] #{} {}", mark, topic.id, topic.name);
        for sub in &topic.subtopics {
            let mark = if sub.completed { "✔" } else { " " };
            println!("    [{}] #{} {}", mark, sub.id, sub.name);
        }
    }
    let progress = screen.progress();
    println!(
        "Progress: {}/{} ({}%)",
        progress.completed,
        progress.total,
        progress.percentage()
    );
    Ok(())
}

async fn handle_fees(app: &AppState, action: FeesAction) -> Result<(), AppError> {
    let mut screen = FeesScreen::open(app.clone())?;
    match action {
        FeesAction::List => {
            screen.load().await;
            for category in screen.state().into_result()? {
                println!("   {:<24} {:>12}", category.name, format_amount(category.amount));
            }
            println!("   {:<24} {:>12}", "Total", format_amount(screen.total()));
        }
        FeesAction::Add {
            name,
            amount,
            description,
        } => {
            let amount = parse_amount(&amount).ok_or_else(|| {
                AppError::new(ErrorKind::Validation, anyhow!("Invalid amount: {}", amount))
            })?;
            screen
                .create(CreateFeeCategoryDto {
                    name,
                    amount,
                    description,
                })
                .await?;
        }
    }
    Ok(())
}

async fn handle_leave(app: &AppState, action: LeaveAction) -> Result<(), AppError> {
    let mut screen = LeaveScreen::open(app.clone())?;
    match action {
        LeaveAction::List => {
            screen.load().await;
            screen.state().into_result()?;
            let buckets = screen.buckets();
            for (label, list) in [
                ("Pending", &buckets.pending),
                ("Approved", &buckets.approved),
                ("Rejected", &buckets.rejected),
            ] {
                println!("{} ({}):", label, list.len());
                for leave in list {
                    println!(
                        "   #{} {} · {} → {} ({} days) · {}",
                        leave.id,
                        leave.applicant,
                        leave.start_date,
                        leave.end_date,
                        leave.days(),
                        leave.reason
                    );
                }
            }
        }
        LeaveAction::Apply { from, to, reason } => {
            screen
                .apply(CreateLeaveDto {
                    reason,
                    start_date: from,
                    end_date: to,
                })
                .await?;
        }
        LeaveAction::Approve { id } => screen.review(&id, LeaveStatus::Approved).await?,
        LeaveAction::Reject { id } => screen.review(&id, LeaveStatus::Rejected).await?,
    }
    Ok(())
}

async fn handle_notices(app: &AppState, action: NoticesAction) -> Result<(), AppError> {
    let mut screen = NoticesScreen::open(app.clone())?;
    match action {
        NoticesAction::List => {
            screen.load().await;
            screen.state().into_result()?;
            for notice in screen.sorted() {
                println!(
                    "[{}] {} · {}",
                    notice.created_at.format("%Y-%m-%d %H:%M"),
                    notice.title,
                    notice.sender
                );
                println!("   {}", notice.content);
            }
        }
        NoticesAction::Send { title, content } => {
            screen.send(CreateNoticeDto { title, content }).await?;
        }
    }
    Ok(())
}

async fn handle_notes(app: &AppState, action: NotesAction) -> Result<(), AppError> {
    let mut screen = NotesScreen::open(app.clone())?;
    match action {
        NotesAction::List => {
            screen.load().await;
            println!("Notes for {}:", screen.subject());
            for note in screen.state().into_result()? {
                println!("   #{} {}", note.id, note.title);
                if let Some(file) = &note.file {
                    println!("      {}", file);
                }
            }
        }
        NotesAction::Add { title, content } => {
            screen.create(&title, &content).await?;
        }
    }
    Ok(())
}

async fn handle_forum(app: &AppState, action: ForumAction) -> Result<(), AppError> {
    match action {
        ForumAction::Posts => {
            let mut screen = ForumScreen::open(app.clone())?;
            screen.load().await;
            for post in screen.state().into_result()? {
                println!("   #{} {} · {}", post.id, post.title, post.created_by.username);
            }
        }
        ForumAction::Thread { post } => {
            let mut screen = ThreadScreen::open(app.clone(), post)?;
            screen.load().await;
            screen.state().into_result()?;
            for line in screen.render(Utc::now()) {
                println!("{}", line);
            }
        }
        ForumAction::Comment {
            post,
            content,
            parent,
        } => {
            let mut screen = ThreadScreen::open(app.clone(), post)?;
            screen.reply(parent.as_deref(), &content).await?;
        }
        ForumAction::Edit {
            post,
            comment,
            content,
        } => {
            let mut screen = ThreadScreen::open(app.clone(), post)?;
            screen.load().await;
            screen.state().into_result()?;
            screen.edit(&comment, &content).await?;
        }
        ForumAction::Delete { post, comment } => {
            let mut screen = ThreadScreen::open(app.clone(), post)?;
            screen.load().await;
            screen.state().into_result()?;
            screen.delete(&comment).await?;
        }
    }
    Ok(())
}

async fn handle_quiz(app: &AppState) -> Result<(), AppError> {
    let mut screen = QuizScreen::open(app.clone())?;
    screen.load().await;
    let quizzes = screen.state().into_result()?;
    if quizzes.is_empty() {
        println!("No quizzes available");
        return Ok(());
    }

    let titles: Vec<&str> = quizzes.iter().map(|q| q.title.as_str()).collect();
    let index = Select::new()
        .with_prompt("Quiz")
        .items(&titles)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    let quiz = quizzes[index].clone();
    let timer = QuizTimer::for_quiz(&quiz);
    let mut attempt = screen.start(quiz).await?;

    let mut timed_out = false;
    for i in 0..attempt.questions.len() {
        if timer.is_expired() {
            timed_out = true;
            println!("⏰ Time is up");
            break;
        }
        let question = &attempt.questions[i];
        let prompt = match timer.remaining() {
            Some(left) => format!("{} ({}s left)", question.text, left.as_secs()),
            None => question.text.clone(),
        };
        let options = question.options.clone();
        let choice = Select::new()
            .with_prompt(prompt)
            .items(&options)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        // The prompt blocks, so the deadline can pass while it is open.
        if !attempt.answer_in_time(&timer, i, choice)? {
            timed_out = true;
            println!("⏰ Time is up, last answer not counted");
            break;
        }
    }

    let score = screen.submit(&attempt, timed_out).await?;
    println!("\nScore: {}/{}", score, attempt.questions.len());
    Ok(())
}
