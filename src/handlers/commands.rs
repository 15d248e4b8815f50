//! Command definitions
//!
//! Commands represent intentions to change the system state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::AttendanceStatus;

/// Command to create a new college
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollegeCommand {
    pub name: String,
}

impl CreateCollegeCommand {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// Command to create a new student in a college
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentCommand {
    pub name: String,
    pub email: String,
    pub college_id: i64,
}

impl CreateStudentCommand {
    pub fn new(name: String, email: String, college_id: i64) -> Self {
        Self {
            name,
            email,
            college_id,
        }
    }
}

/// Command to create a new event in a college
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventCommand {
    pub title: String,
    /// Free-form category label (Workshop/Seminar/...)
    pub event_type: String,
    /// Calendar date as YYYY-MM-DD, parsed by the handler
    pub date: String,
    pub college_id: i64,
}

impl CreateEventCommand {
    pub fn new(title: String, event_type: String, date: String, college_id: i64) -> Self {
        Self {
            title,
            event_type,
            date,
            college_id,
        }
    }
}

/// Command to register a student for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStudentCommand {
    pub student_id: i64,
    pub event_id: i64,
}

impl RegisterStudentCommand {
    pub fn new(student_id: i64, event_id: i64) -> Self {
        Self {
            student_id,
            event_id,
        }
    }
}

/// Command to mark attendance for a registered student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceCommand {
    pub student_id: i64,
    pub event_id: i64,
    /// Raw status string, parsed by the handler (present/absent)
    pub status: String,
}

impl MarkAttendanceCommand {
    pub fn new(student_id: i64, event_id: i64, status: String) -> Self {
        Self {
            student_id,
            event_id,
            status,
        }
    }
}

/// Command to submit feedback for a registered student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFeedbackCommand {
    pub student_id: i64,
    pub event_id: i64,
    /// Raw rating, validated by the handler (1..=5)
    pub rating: i64,
    pub comment: Option<String>,
}

impl SubmitFeedbackCommand {
    pub fn new(student_id: i64, event_id: i64, rating: i64) -> Self {
        Self {
            student_id,
            event_id,
            rating,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: String) -> Self {
        self.comment = Some(comment);
        self
    }
}

/// Result of a successful college creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollegeResult {
    pub id: i64,
    pub name: String,
}

/// Result of a successful student creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentResult {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub college_id: i64,
}

/// Result of a successful event creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventResult {
    pub id: i64,
    pub title: String,
    pub event_type: String,
    pub date: NaiveDate,
    pub college_id: i64,
}

/// Result of a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStudentResult {
    pub id: i64,
    pub student_id: i64,
    pub event_id: i64,
}

/// Result of a successful attendance marking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceResult {
    pub id: i64,
    pub status: AttendanceStatus,
}

/// Result of a successful feedback submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFeedbackResult {
    pub id: i64,
    pub rating: i64,
}
