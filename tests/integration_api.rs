//! API Integration Tests
//!
//! Drive the axum router end-to-end against an in-memory database.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

mod common;

async fn test_app() -> Router {
    let pool = common::setup_test_db().await;
    campus_events::api::create_router().with_state(pool)
}

/// POST a JSON payload, return status and parsed body.
async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, body)
}

/// GET a report, return status and parsed body.
async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    (status, body)
}

#[tokio::test]
async fn test_initdb_is_idempotent() {
    let app = test_app().await;

    let (status, body) = post_json(&app, "/initdb", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "ok");

    // Safe to call again
    let (status, _) = post_json(&app, "/initdb", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_full_scenario_e2e() {
    let app = test_app().await;

    // College -> Student -> Event -> Registration -> Attendance -> Feedback
    let (status, college) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    assert_eq!(status, StatusCode::CREATED, "College creation failed");
    let college_id = college["id"].as_i64().unwrap();

    let (status, student) = post_json(
        &app,
        "/students",
        json!({"name": "Asha", "email": "asha@example.com", "college_id": college_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Student creation failed");
    let student_id = student["id"].as_i64().unwrap();

    let (status, event) = post_json(
        &app,
        "/events",
        json!({
            "title": "Intro to LLMs",
            "type": "Seminar",
            "date": "2026-08-06",
            "college_id": college_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Event creation failed");
    assert_eq!(event["type"], "Seminar");
    let event_id = event["id"].as_i64().unwrap();

    let (status, _) = post_json(
        &app,
        "/register",
        json!({"student_id": student_id, "event_id": event_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed");

    let (status, attendance) = post_json(
        &app,
        "/attendance",
        json!({"student_id": student_id, "event_id": event_id, "status": "present"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Attendance failed");
    assert_eq!(attendance["status"], "present");

    let (status, feedback) = post_json(
        &app,
        "/feedback",
        json!({"student_id": student_id, "event_id": event_id, "rating": 5, "comment": "Great!"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Feedback failed");
    assert_eq!(feedback["rating"], 5);

    // Reports over the seeded state
    let (status, rows) = get_json(
        &app,
        &format!("/reports/event_popularity?college_id={}", college_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["registrations"], 1);
    assert_eq!(rows[0]["title"], "Intro to LLMs");

    let (status, report) =
        get_json(&app, &format!("/reports/attendance?event_id={}", event_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["attendance_percentage"], 100.0);

    let (status, report) =
        get_json(&app, &format!("/reports/feedback?event_id={}", event_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["avg_rating"], 5.0);

    let (status, report) = get_json(
        &app,
        &format!("/reports/student_participation?student_id={}", student_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["events_attended"], 1);
}

#[tokio::test]
async fn test_attendance_rate_half_present() {
    let app = test_app().await;

    let (_, college) = post_json(&app, "/colleges", json!({"name": "Tech University"})).await;
    let college_id = college["id"].as_i64().unwrap();

    let (_, event) = post_json(
        &app,
        "/events",
        json!({"title": "Hackathon", "type": "Workshop", "date": "2026-09-01", "college_id": college_id}),
    )
    .await;
    let event_id = event["id"].as_i64().unwrap();

    for (name, email, status) in [
        ("Asha", "asha@example.com", "present"),
        ("Rahul", "rahul@example.com", "absent"),
    ] {
        let (_, student) = post_json(
            &app,
            "/students",
            json!({"name": name, "email": email, "college_id": college_id}),
        )
        .await;
        let student_id = student["id"].as_i64().unwrap();

        let (created, _) = post_json(
            &app,
            "/register",
            json!({"student_id": student_id, "event_id": event_id}),
        )
        .await;
        assert_eq!(created, StatusCode::CREATED);

        let (created, _) = post_json(
            &app,
            "/attendance",
            json!({"student_id": student_id, "event_id": event_id, "status": status}),
        )
        .await;
        assert_eq!(created, StatusCode::CREATED);
    }

    let (status, report) =
        get_json(&app, &format!("/reports/attendance?event_id={}", event_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["attendance_percentage"], 50.0);
}

#[tokio::test]
async fn test_duplicate_college_conflict() {
    let app = test_app().await;

    let (status, _) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "duplicate_college");
}

#[tokio::test]
async fn test_duplicate_student_conflict() {
    let app = test_app().await;

    let (_, college) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let college_id = college["id"].as_i64().unwrap();

    let payload = json!({"name": "Asha", "email": "asha@example.com", "college_id": college_id});
    let (status, _) = post_json(&app, "/students", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/students", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "duplicate_student");
}

#[tokio::test]
async fn test_same_email_allowed_across_colleges() {
    let app = test_app().await;

    let (_, first) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let (_, second) = post_json(&app, "/colleges", json!({"name": "Tech University"})).await;

    for college in [&first, &second] {
        let (status, _) = post_json(
            &app,
            "/students",
            json!({"name": "Asha", "email": "asha@example.com", "college_id": college["id"]}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_duplicate_registration_conflict() {
    let app = test_app().await;

    let (_, college) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let college_id = college["id"].as_i64().unwrap();
    let (_, student) = post_json(
        &app,
        "/students",
        json!({"name": "Asha", "email": "asha@example.com", "college_id": college_id}),
    )
    .await;
    let (_, event) = post_json(
        &app,
        "/events",
        json!({"title": "Intro to LLMs", "type": "Seminar", "date": "2026-08-06", "college_id": college_id}),
    )
    .await;

    let payload = json!({"student_id": student["id"], "event_id": event["id"]});
    let (status, _) = post_json(&app, "/register", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/register", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "duplicate_registration");
}

#[tokio::test]
async fn test_register_unknown_ids_not_found() {
    let app = test_app().await;

    let (status, body) = post_json(&app, "/register", json!({"student_id": 1, "event_id": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "student_not_found");
}

#[tokio::test]
async fn test_register_cross_college_rejected() {
    let app = test_app().await;

    let (_, first) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let (_, second) = post_json(&app, "/colleges", json!({"name": "Tech University"})).await;

    let (_, student) = post_json(
        &app,
        "/students",
        json!({"name": "Asha", "email": "asha@example.com", "college_id": first["id"]}),
    )
    .await;
    let (_, event) = post_json(
        &app,
        "/events",
        json!({"title": "Hackathon", "type": "Workshop", "date": "2026-09-01", "college_id": second["id"]}),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/register",
        json!({"student_id": student["id"], "event_id": event["id"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "college_mismatch");
}

#[tokio::test]
async fn test_attendance_and_feedback_require_registration() {
    let app = test_app().await;

    let (_, college) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let college_id = college["id"].as_i64().unwrap();
    let (_, student) = post_json(
        &app,
        "/students",
        json!({"name": "Asha", "email": "asha@example.com", "college_id": college_id}),
    )
    .await;
    let (_, event) = post_json(
        &app,
        "/events",
        json!({"title": "Intro to LLMs", "type": "Seminar", "date": "2026-08-06", "college_id": college_id}),
    )
    .await;

    // Both ids are valid, but there is no registration for the pair
    let (status, body) = post_json(
        &app,
        "/attendance",
        json!({"student_id": student["id"], "event_id": event["id"], "status": "present"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "not_registered");

    let (status, body) = post_json(
        &app,
        "/feedback",
        json!({"student_id": student["id"], "event_id": event["id"], "rating": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "not_registered");
}

#[tokio::test]
async fn test_invalid_inputs_rejected() {
    let app = test_app().await;

    let (_, college) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let college_id = college["id"].as_i64().unwrap();

    // Unknown college
    let (status, body) = post_json(
        &app,
        "/students",
        json!({"name": "Asha", "email": "asha@example.com", "college_id": 999}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "college_not_found");

    // Unparseable date
    let (status, body) = post_json(
        &app,
        "/events",
        json!({"title": "Hackathon", "type": "Workshop", "date": "06/08/2026", "college_id": college_id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_date");

    let (_, student) = post_json(
        &app,
        "/students",
        json!({"name": "Asha", "email": "asha@example.com", "college_id": college_id}),
    )
    .await;
    let (_, event) = post_json(
        &app,
        "/events",
        json!({"title": "Intro to LLMs", "type": "Seminar", "date": "2026-08-06", "college_id": college_id}),
    )
    .await;
    let (status, _) = post_json(
        &app,
        "/register",
        json!({"student_id": student["id"], "event_id": event["id"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Status other than present/absent
    let (status, body) = post_json(
        &app,
        "/attendance",
        json!({"student_id": student["id"], "event_id": event["id"], "status": "late"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_status");

    // Rating outside 1..=5
    let (status, body) = post_json(
        &app,
        "/feedback",
        json!({"student_id": student["id"], "event_id": event["id"], "rating": 6}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_rating");
}

#[tokio::test]
async fn test_reports_on_empty_event() {
    let app = test_app().await;

    let (_, college) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let college_id = college["id"].as_i64().unwrap();
    let (_, event) = post_json(
        &app,
        "/events",
        json!({"title": "Intro to LLMs", "type": "Seminar", "date": "2026-08-06", "college_id": college_id}),
    )
    .await;
    let event_id = event["id"].as_i64().unwrap();

    // Zero attendance rows -> 0.0, not an error
    let (status, report) =
        get_json(&app, &format!("/reports/attendance?event_id={}", event_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["attendance_percentage"], 0.0);

    // Zero feedback rows -> null, not 0
    let (status, report) =
        get_json(&app, &format!("/reports/feedback?event_id={}", event_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(report["avg_rating"].is_null());

    // Event with zero registrations still listed, count 0
    let (status, rows) = get_json(
        &app,
        &format!("/reports/event_popularity?college_id={}", college_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["registrations"], 0);
}

#[tokio::test]
async fn test_event_summary_report() {
    let app = test_app().await;

    let (_, college) = post_json(&app, "/colleges", json!({"name": "AI Institute"})).await;
    let college_id = college["id"].as_i64().unwrap();

    let (_, older) = post_json(
        &app,
        "/events",
        json!({"title": "Rust Basics", "type": "Workshop", "date": "2026-05-01", "college_id": college_id}),
    )
    .await;
    let (_, newer) = post_json(
        &app,
        "/events",
        json!({"title": "Hackathon", "type": "Workshop", "date": "2026-09-01", "college_id": college_id}),
    )
    .await;
    // Different type, must not appear
    post_json(
        &app,
        "/events",
        json!({"title": "Intro to LLMs", "type": "Seminar", "date": "2026-08-06", "college_id": college_id}),
    )
    .await;

    let (_, student) = post_json(
        &app,
        "/students",
        json!({"name": "Asha", "email": "asha@example.com", "college_id": college_id}),
    )
    .await;
    post_json(
        &app,
        "/register",
        json!({"student_id": student["id"], "event_id": newer["id"]}),
    )
    .await;
    post_json(
        &app,
        "/attendance",
        json!({"student_id": student["id"], "event_id": newer["id"], "status": "present"}),
    )
    .await;
    post_json(
        &app,
        "/feedback",
        json!({"student_id": student["id"], "event_id": newer["id"], "rating": 4}),
    )
    .await;

    let (status, rows) = get_json(
        &app,
        &format!(
            "/reports/event_summary?college_id={}&event_type=Workshop",
            college_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Date descending: newer first
    assert_eq!(rows[0]["event_id"], newer["id"]);
    assert_eq!(rows[0]["registrations"], 1);
    assert_eq!(rows[0]["attendance_pct"], 100.0);
    assert_eq!(rows[0]["avg_rating"], 4.0);

    // No registrations/attendance/feedback: numeric defaults, null rating
    assert_eq!(rows[1]["event_id"], older["id"]);
    assert_eq!(rows[1]["registrations"], 0);
    assert_eq!(rows[1]["attendance_pct"], 0.0);
    assert!(rows[1]["avg_rating"].is_null());

    // Exact-match type filter is case-sensitive
    let (status, rows) = get_json(
        &app,
        &format!(
            "/reports/event_summary?college_id={}&event_type=workshop",
            college_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(rows.as_array().unwrap().is_empty());
}
