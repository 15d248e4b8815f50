//! Demo Data Seeder
//!
//! Run with: cargo run --bin seed
//!
//! Creates a small demo dataset (one college, two students, two events)
//! directly through the write handlers, then prints the headline reports.

use campus_events::handlers::{
    CreateCollegeCommand, CreateCollegeHandler, CreateEventCommand, CreateEventHandler,
    CreateStudentCommand, CreateStudentHandler, MarkAttendanceCommand, MarkAttendanceHandler,
    RegisterStudentCommand, RegisterStudentHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
};
use campus_events::reports::ReportService;
use campus_events::{db, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    println!("Seeding demo data");
    println!("Connecting to {}...", config.database_url);

    let pool = db::connect(&config.database_url, config.database_max_connections).await?;
    db::init_schema(&pool).await?;

    let college = CreateCollegeHandler::new(pool.clone())
        .execute(CreateCollegeCommand::new("AI Institute".to_string()))
        .await;

    let college = match college {
        Ok(college) => college,
        Err(err) => {
            println!("College already exists, skipping... ({})", err);
            return Ok(());
        }
    };

    let students = CreateStudentHandler::new(pool.clone());
    let asha = students
        .execute(CreateStudentCommand::new(
            "Asha".to_string(),
            "asha@example.com".to_string(),
            college.id,
        ))
        .await?;
    let rahul = students
        .execute(CreateStudentCommand::new(
            "Rahul".to_string(),
            "rahul@example.com".to_string(),
            college.id,
        ))
        .await?;

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let events = CreateEventHandler::new(pool.clone());
    let seminar = events
        .execute(CreateEventCommand::new(
            "Intro to LLMs".to_string(),
            "Seminar".to_string(),
            today.clone(),
            college.id,
        ))
        .await?;
    let workshop = events
        .execute(CreateEventCommand::new(
            "Hackathon".to_string(),
            "Workshop".to_string(),
            today,
            college.id,
        ))
        .await?;

    let register = RegisterStudentHandler::new(pool.clone());
    register
        .execute(RegisterStudentCommand::new(asha.id, seminar.id))
        .await?;
    register
        .execute(RegisterStudentCommand::new(rahul.id, seminar.id))
        .await?;
    register
        .execute(RegisterStudentCommand::new(asha.id, workshop.id))
        .await?;

    let attendance = MarkAttendanceHandler::new(pool.clone());
    attendance
        .execute(MarkAttendanceCommand::new(
            asha.id,
            seminar.id,
            "present".to_string(),
        ))
        .await?;
    attendance
        .execute(MarkAttendanceCommand::new(
            rahul.id,
            seminar.id,
            "absent".to_string(),
        ))
        .await?;
    attendance
        .execute(MarkAttendanceCommand::new(
            asha.id,
            workshop.id,
            "present".to_string(),
        ))
        .await?;

    let feedback = SubmitFeedbackHandler::new(pool.clone());
    feedback
        .execute(
            SubmitFeedbackCommand::new(asha.id, seminar.id, 5).with_comment("Great!".to_string()),
        )
        .await?;
    feedback
        .execute(SubmitFeedbackCommand::new(rahul.id, seminar.id, 3))
        .await?;

    println!("\n=== Seeded ===");
    println!("College: {} (id {})", college.name, college.id);
    println!("Students: {} ({}), {} ({})", asha.name, asha.id, rahul.name, rahul.id);
    println!("Events: {} ({}), {} ({})", seminar.title, seminar.id, workshop.title, workshop.id);

    let reports = ReportService::new(pool);

    println!("\n=== Event Popularity ===");
    for row in reports.event_popularity(college.id).await? {
        println!("Event: {}, Total Registrations: {}", row.title, row.registrations);
    }

    println!("\n=== Attendance Rate ===");
    println!(
        "{}: {:.2}%",
        seminar.title,
        reports.attendance_rate(seminar.id).await?
    );

    println!("\n=== Feedback Rating ===");
    match reports.feedback_rating(seminar.id).await? {
        Some(avg) => println!("{}: {:.2}", seminar.title, avg),
        None => println!("{}: no feedback yet", seminar.title),
    }

    Ok(())
}
