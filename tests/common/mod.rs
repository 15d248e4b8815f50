//! Common test utilities

use sqlx::SqlitePool;

/// Setup test database - fresh in-memory SQLite with the full schema.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = campus_events::db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to DB");

    campus_events::db::init_schema(&pool)
        .await
        .expect("Failed to create schema");

    pool
}
