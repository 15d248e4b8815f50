//! College Creation Handler

use sqlx::SqlitePool;

use crate::domain::DomainError;
use crate::error::AppError;

use super::{CreateCollegeCommand, CreateCollegeResult};

/// Handler for college creation
pub struct CreateCollegeHandler {
    pool: SqlitePool,
}

impl CreateCollegeHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute the create college command
    ///
    /// The store's unique constraint on `colleges.name` is the duplicate
    /// check; a violation is reported as `DuplicateCollege`, not retried.
    pub async fn execute(&self, command: CreateCollegeCommand) -> Result<CreateCollegeResult, AppError> {
        let id: i64 = sqlx::query_scalar("INSERT INTO colleges (name) VALUES ($1) RETURNING id")
            .bind(&command.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::Domain(DomainError::DuplicateCollege(command.name.clone()))
                }
                err => AppError::Database(err),
            })?;

        tracing::debug!("Created college {} ({})", command.name, id);

        Ok(CreateCollegeResult {
            id,
            name: command.name,
        })
    }
}
