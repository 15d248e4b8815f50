//! Event Creation Handler

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::domain::DomainError;
use crate::error::AppError;

use super::{CreateEventCommand, CreateEventResult};

/// Handler for event creation
pub struct CreateEventHandler {
    pool: SqlitePool,
}

impl CreateEventHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute the create event command
    ///
    /// The date must parse as YYYY-MM-DD; no further range validation.
    pub async fn execute(&self, command: CreateEventCommand) -> Result<CreateEventResult, AppError> {
        let date = NaiveDate::parse_from_str(&command.date, "%Y-%m-%d")
            .map_err(|_| DomainError::InvalidDate(command.date.clone()))?;

        let mut tx = self.pool.begin().await?;

        let college_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM colleges WHERE id = $1)")
                .bind(command.college_id)
                .fetch_one(&mut *tx)
                .await?;

        if !college_exists {
            return Err(DomainError::CollegeNotFound(command.college_id).into());
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO events (title, type, date, college_id) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&command.title)
        .bind(&command.event_type)
        .bind(date)
        .bind(command.college_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CreateEventResult {
            id,
            title: command.title,
            event_type: command.event_type,
            date,
            college_id: command.college_id,
        })
    }
}
