//! API Routes
//!
//! HTTP endpoint definitions. Handlers here are thin glue: they parse the
//! payload, dispatch to a write handler or the report service, and
//! serialize the result. Rounding to two decimals happens here and nowhere
//! else.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use crate::domain::AttendanceStatus;
use crate::error::AppError;
use crate::handlers::{
    CreateCollegeCommand, CreateCollegeHandler, CreateEventCommand, CreateEventHandler,
    CreateStudentCommand, CreateStudentHandler, MarkAttendanceCommand, MarkAttendanceHandler,
    RegisterStudentCommand, RegisterStudentHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
};
use crate::reports::ReportService;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize)]
pub struct InitDbResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCollegeRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CollegeResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub college_id: i64,
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub college_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: String,
    pub college_id: i64,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: NaiveDate,
    pub college_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub student_id: i64,
    pub event_id: i64,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: i64,
    pub student_id: i64,
    pub event_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    pub student_id: i64,
    pub event_id: i64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub id: i64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub student_id: i64,
    pub event_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: i64,
    pub rating: i64,
}

#[derive(Debug, Deserialize)]
pub struct CollegeQuery {
    pub college_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    pub event_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct StudentQuery {
    pub student_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TopStudentsQuery {
    pub college_id: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    3
}

#[derive(Debug, Deserialize)]
pub struct EventSummaryQuery {
    pub college_id: i64,
    pub event_type: String,
}

#[derive(Debug, Serialize)]
pub struct EventPopularityRow {
    pub event_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: NaiveDate,
    pub registrations: i64,
}

#[derive(Debug, Serialize)]
pub struct AttendanceReportResponse {
    pub event_id: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct FeedbackReportResponse {
    pub event_id: i64,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ParticipationResponse {
    pub student_id: i64,
    pub events_attended: i64,
}

#[derive(Debug, Serialize)]
pub struct TopStudentRow {
    pub student_id: i64,
    pub name: String,
    pub events_attended: i64,
}

#[derive(Debug, Serialize)]
pub struct EventSummaryRow {
    pub event_id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub registrations: i64,
    pub attendance_pct: f64,
    pub avg_rating: Option<f64>,
}

/// Round at the presentation boundary only.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<SqlitePool> {
    Router::new()
        // Schema initialization
        .route("/initdb", post(initdb))
        // Write operations
        .route("/colleges", post(create_college))
        .route("/students", post(create_student))
        .route("/events", post(create_event))
        .route("/register", post(register))
        .route("/attendance", post(mark_attendance))
        .route("/feedback", post(submit_feedback))
        // Reports
        .route("/reports/event_popularity", get(event_popularity))
        .route("/reports/attendance", get(attendance_report))
        .route("/reports/feedback", get(feedback_report))
        .route("/reports/student_participation", get(student_participation))
        .route("/reports/top_active_students", get(top_active_students))
        .route("/reports/event_summary", get(event_summary))
}

// =========================================================================
// POST /initdb
// =========================================================================

/// Create the schema if absent; safe to call any number of times
async fn initdb(
    State(pool): State<SqlitePool>,
) -> Result<(StatusCode, Json<InitDbResponse>), AppError> {
    db::init_schema(&pool).await?;

    Ok((
        StatusCode::CREATED,
        Json(InitDbResponse {
            status: "ok".to_string(),
            message: "Database initialized".to_string(),
        }),
    ))
}

// =========================================================================
// POST /colleges
// =========================================================================

/// Create a new college
async fn create_college(
    State(pool): State<SqlitePool>,
    Json(request): Json<CreateCollegeRequest>,
) -> Result<(StatusCode, Json<CollegeResponse>), AppError> {
    let handler = CreateCollegeHandler::new(pool);

    let result = handler.execute(CreateCollegeCommand::new(request.name)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CollegeResponse {
            id: result.id,
            name: result.name,
        }),
    ))
}

// =========================================================================
// POST /students
// =========================================================================

/// Create a new student
async fn create_student(
    State(pool): State<SqlitePool>,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let handler = CreateStudentHandler::new(pool);

    let command = CreateStudentCommand::new(request.name, request.email, request.college_id);
    let result = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            id: result.id,
            name: result.name,
            email: result.email,
            college_id: result.college_id,
        }),
    ))
}

// =========================================================================
// POST /events
// =========================================================================

/// Create a new event
async fn create_event(
    State(pool): State<SqlitePool>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let handler = CreateEventHandler::new(pool);

    let command = CreateEventCommand::new(
        request.title,
        request.event_type,
        request.date,
        request.college_id,
    );
    let result = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            id: result.id,
            title: result.title,
            event_type: result.event_type,
            date: result.date,
            college_id: result.college_id,
        }),
    ))
}

// =========================================================================
// POST /register
// =========================================================================

/// Register a student for an event
async fn register(
    State(pool): State<SqlitePool>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let handler = RegisterStudentHandler::new(pool);

    let command = RegisterStudentCommand::new(request.student_id, request.event_id);
    let result = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            id: result.id,
            student_id: result.student_id,
            event_id: result.event_id,
        }),
    ))
}

// =========================================================================
// POST /attendance
// =========================================================================

/// Mark a registered student present or absent
async fn mark_attendance(
    State(pool): State<SqlitePool>,
    Json(request): Json<AttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceResponse>), AppError> {
    let handler = MarkAttendanceHandler::new(pool);

    let command = MarkAttendanceCommand::new(request.student_id, request.event_id, request.status);
    let result = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(AttendanceResponse {
            id: result.id,
            status: result.status,
        }),
    ))
}

// =========================================================================
// POST /feedback
// =========================================================================

/// Submit feedback for an event
async fn submit_feedback(
    State(pool): State<SqlitePool>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), AppError> {
    let handler = SubmitFeedbackHandler::new(pool);

    let command = SubmitFeedbackCommand::new(request.student_id, request.event_id, request.rating);
    let command = if let Some(comment) = request.comment {
        command.with_comment(comment)
    } else {
        command
    };

    let result = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            id: result.id,
            rating: result.rating,
        }),
    ))
}

// =========================================================================
// GET /reports/event_popularity
// =========================================================================

/// Registrations per event for a college, most popular first
async fn event_popularity(
    State(pool): State<SqlitePool>,
    Query(query): Query<CollegeQuery>,
) -> Result<Json<Vec<EventPopularityRow>>, AppError> {
    let reports = ReportService::new(pool);

    let rows = reports.event_popularity(query.college_id).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| EventPopularityRow {
                event_id: row.event_id,
                title: row.title,
                event_type: row.event_type,
                date: row.date,
                registrations: row.registrations,
            })
            .collect(),
    ))
}

// =========================================================================
// GET /reports/attendance
// =========================================================================

/// Attendance percentage for one event
async fn attendance_report(
    State(pool): State<SqlitePool>,
    Query(query): Query<EventQuery>,
) -> Result<Json<AttendanceReportResponse>, AppError> {
    let reports = ReportService::new(pool);

    let pct = reports.attendance_rate(query.event_id).await?;

    Ok(Json(AttendanceReportResponse {
        event_id: query.event_id,
        attendance_percentage: round2(pct),
    }))
}

// =========================================================================
// GET /reports/feedback
// =========================================================================

/// Average feedback rating for one event, null when none exists
async fn feedback_report(
    State(pool): State<SqlitePool>,
    Query(query): Query<EventQuery>,
) -> Result<Json<FeedbackReportResponse>, AppError> {
    let reports = ReportService::new(pool);

    let avg_rating = reports.feedback_rating(query.event_id).await?;

    Ok(Json(FeedbackReportResponse {
        event_id: query.event_id,
        avg_rating: avg_rating.map(round2),
    }))
}

// =========================================================================
// GET /reports/student_participation
// =========================================================================

/// Number of events a student attended
async fn student_participation(
    State(pool): State<SqlitePool>,
    Query(query): Query<StudentQuery>,
) -> Result<Json<ParticipationResponse>, AppError> {
    let reports = ReportService::new(pool);

    let events_attended = reports.student_participation(query.student_id).await?;

    Ok(Json(ParticipationResponse {
        student_id: query.student_id,
        events_attended,
    }))
}

// =========================================================================
// GET /reports/top_active_students
// =========================================================================

/// Most active students of a college, top `limit` (default 3)
async fn top_active_students(
    State(pool): State<SqlitePool>,
    Query(query): Query<TopStudentsQuery>,
) -> Result<Json<Vec<TopStudentRow>>, AppError> {
    let reports = ReportService::new(pool);

    let rows = reports
        .top_active_students(query.college_id, query.limit)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| TopStudentRow {
                student_id: row.student_id,
                name: row.name,
                events_attended: row.events_attended,
            })
            .collect(),
    ))
}

// =========================================================================
// GET /reports/event_summary
// =========================================================================

/// Combined per-event summary for a college and exact event type
async fn event_summary(
    State(pool): State<SqlitePool>,
    Query(query): Query<EventSummaryQuery>,
) -> Result<Json<Vec<EventSummaryRow>>, AppError> {
    let reports = ReportService::new(pool);

    let rows = reports
        .event_summary(query.college_id, &query.event_type)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| EventSummaryRow {
                event_id: row.event_id,
                title: row.title,
                date: row.date,
                registrations: row.registrations,
                attendance_pct: round2(row.attendance_pct),
                avg_rating: row.avg_rating.map(round2),
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_request_deserialize() {
        let json = r#"{
            "name": "Asha",
            "email": "asha@example.com",
            "college_id": 1
        }"#;

        let request: CreateStudentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Asha");
        assert_eq!(request.college_id, 1);
    }

    #[test]
    fn test_create_event_request_type_key() {
        let json = r#"{
            "title": "Intro to LLMs",
            "type": "Seminar",
            "date": "2026-08-06",
            "college_id": 1
        }"#;

        let request: CreateEventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.event_type, "Seminar");
        assert_eq!(request.date, "2026-08-06");
    }

    #[test]
    fn test_feedback_request_comment_defaults() {
        let json = r#"{"student_id": 1, "event_id": 2, "rating": 3}"#;

        let request: FeedbackRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.rating, 3);
        assert!(request.comment.is_none());
    }

    #[test]
    fn test_top_students_query_default_limit() {
        let query: TopStudentsQuery = serde_json::from_str(r#"{"college_id": 1}"#).unwrap();
        assert_eq!(query.limit, 3);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(50.0), 50.0);
    }
}
