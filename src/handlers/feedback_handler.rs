//! Feedback Handler
//!
//! Records a 1..=5 rating (with optional comment) from a registered student
//! for an event, at most once per (student, event) pair.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{DomainError, Rating};
use crate::error::AppError;

use super::{SubmitFeedbackCommand, SubmitFeedbackResult};

/// Handler for feedback submission
pub struct SubmitFeedbackHandler {
    pool: SqlitePool,
}

impl SubmitFeedbackHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute the submit feedback command
    pub async fn execute(&self, command: SubmitFeedbackCommand) -> Result<SubmitFeedbackResult, AppError> {
        let rating = Rating::new(command.rating)?;

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
            "INSERT INTO feedback (student_id, event_id, rating, comment, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(command.student_id)
        .bind(command.event_id)
        .bind(rating.value())
        .bind(&command.comment)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Domain(DomainError::DuplicateFeedback {
                    student_id: command.student_id,
                    event_id: command.event_id,
                })
            }
            err => AppError::Database(err),
        })?;

        tx.commit().await?;

        Ok(SubmitFeedbackResult {
            id,
            rating: rating.value(),
        })
    }
}
