//! Student Creation Handler

use sqlx::SqlitePool;

use crate::domain::DomainError;
use crate::error::AppError;

use super::{CreateStudentCommand, CreateStudentResult};

/// Handler for student creation
pub struct CreateStudentHandler {
    pool: SqlitePool,
}

impl CreateStudentHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute the create student command
    pub async fn execute(&self, command: CreateStudentCommand) -> Result<CreateStudentResult, AppError> {
        // College check and insert share one transaction
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
            "INSERT INTO students (name, email, college_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&command.name)
        .bind(&command.email)
        .bind(command.college_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Domain(DomainError::DuplicateStudent {
                    email: command.email.clone(),
                    college_id: command.college_id,
                })
            }
            err => AppError::Database(err),
        })?;

        tx.commit().await?;

        Ok(CreateStudentResult {
            id,
            name: command.name,
            email: command.email,
            college_id: command.college_id,
        })
    }
}
