//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These errors represent referential and uniqueness invariant failures.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// College not found
    #[error("College not found: {0}")]
    CollegeNotFound(i64),

    /// Student not found
    #[error("Student not found: {0}")]
    StudentNotFound(i64),

    /// Event not found
    #[error("Event not found: {0}")]
    EventNotFound(i64),

    /// College name already taken
    #[error("College with this name already exists: {0}")]
    DuplicateCollege(String),

    /// (email, college) pair already taken
    #[error("Student with this email already exists in this college: {email}")]
    DuplicateStudent { email: String, college_id: i64 },

    /// Student already registered for the event
    #[error("Student {student_id} already registered for event {event_id}")]
    DuplicateRegistration { student_id: i64, event_id: i64 },

    /// Attendance already marked for the (student, event) pair
    #[error("Attendance already marked for student {student_id} at event {event_id}")]
    DuplicateAttendance { student_id: i64, event_id: i64 },

    /// Feedback already submitted for the (student, event) pair
    #[error("Feedback already submitted by student {student_id} for event {event_id}")]
    DuplicateFeedback { student_id: i64, event_id: i64 },

    /// Student and event belong to different colleges
    #[error("Student {student_id} and event {event_id} belong to different colleges")]
    CollegeMismatch { student_id: i64, event_id: i64 },

    /// Attendance or feedback attempted without a prior registration
    #[error("Student {student_id} must be registered for event {event_id} first")]
    NotRegistered { student_id: i64, event_id: i64 },

    /// Rating outside 1..=5
    #[error("Rating must be between 1 and 5 (got {0})")]
    InvalidRating(i64),

    /// Attendance status other than present/absent
    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    /// Date that does not parse as YYYY-MM-DD
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    /// Check if this is a validation error (bad input, 4xx non-conflict)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::CollegeMismatch { .. }
                | Self::NotRegistered { .. }
                | Self::InvalidRating(_)
                | Self::InvalidStatus(_)
                | Self::InvalidDate(_)
        )
    }

    /// Check if this is a uniqueness conflict (second, distinct status class)
    pub fn is_conflict_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCollege(_)
                | Self::DuplicateStudent { .. }
                | Self::DuplicateRegistration { .. }
                | Self::DuplicateAttendance { .. }
                | Self::DuplicateFeedback { .. }
        )
    }

    /// Check if this refers to a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CollegeNotFound(_) | Self::StudentNotFound(_) | Self::EventNotFound(_)
        )
    }
}
