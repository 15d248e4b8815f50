//! Registration Handler
//!
//! Registers a student for an event after checking that both exist and
//! belong to the same college. The cross-college check lives here, not in
//! the store schema.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::DomainError;
use crate::error::AppError;

use super::{RegisterStudentCommand, RegisterStudentResult};

/// Handler for event registration
pub struct RegisterStudentHandler {
    pool: SqlitePool,
}

impl RegisterStudentHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute the register command
    pub async fn execute(&self, command: RegisterStudentCommand) -> Result<RegisterStudentResult, AppError> {
        let mut tx = self.pool.begin().await?;

        let student_college: Option<i64> =
            sqlx::query_scalar("SELECT college_id FROM students WHERE id = $1")
                .bind(command.student_id)
                .fetch_optional(&mut *tx)
                .await?;

        let student_college =
            student_college.ok_or(DomainError::StudentNotFound(command.student_id))?;

        let event_college: Option<i64> =
            sqlx::query_scalar("SELECT college_id FROM events WHERE id = $1")
                .bind(command.event_id)
                .fetch_optional(&mut *tx)
                .await?;

        let event_college = event_college.ok_or(DomainError::EventNotFound(command.event_id))?;

        if student_college != event_college {
            return Err(DomainError::CollegeMismatch {
                student_id: command.student_id,
                event_id: command.event_id,
            }
            .into());
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO registrations (student_id, event_id, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(command.student_id)
        .bind(command.event_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Domain(DomainError::DuplicateRegistration {
                    student_id: command.student_id,
                    event_id: command.event_id,
                })
            }
            err => AppError::Database(err),
        })?;

        tx.commit().await?;

        Ok(RegisterStudentResult {
            id,
            student_id: command.student_id,
            event_id: command.event_id,
        })
    }
}
