//! Attendance Handler
//!
//! Marks a registered student present or absent at an event. A registration
//! for the (student, event) pair must already exist; the pair is marked at
//! most once.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{AttendanceStatus, DomainError};
use crate::error::AppError;

use super::{MarkAttendanceCommand, MarkAttendanceResult};

/// Handler for marking attendance
pub struct MarkAttendanceHandler {
    pool: SqlitePool,
}

impl MarkAttendanceHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute the mark attendance command
    pub async fn execute(&self, command: MarkAttendanceCommand) -> Result<MarkAttendanceResult, AppError> {
        // Reject bad status values before touching the store
        let status: AttendanceStatus = command.status.parse()?;

        let mut tx = self.pool.begin().await?;

        let registered: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM registrations WHERE student_id = $1 AND event_id = $2)",
        )
        .bind(command.student_id)
        .bind(command.event_id)
        .fetch_one(&mut *tx)
        .await?;

        if !registered {
            return Err(DomainError::NotRegistered {
                student_id: command.student_id,
                event_id: command.event_id,
            }
            .into());
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO attendance (student_id, event_id, status, marked_at) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(command.student_id)
        .bind(command.event_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Domain(DomainError::DuplicateAttendance {
                    student_id: command.student_id,
                    event_id: command.event_id,
                })
            }
            err => AppError::Database(err),
        })?;

        tx.commit().await?;

        Ok(MarkAttendanceResult { id, status })
    }
}
