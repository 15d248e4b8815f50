//! Database module
//!
//! Pool construction and idempotent schema creation.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Table creation statements, one per entity table.
///
/// All statements are `IF NOT EXISTS` so initialization is idempotent and
/// safe to run on every startup as well as through the init endpoint.
/// `AUTOINCREMENT` keeps ids monotonic and never reused.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS colleges (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        college_id INTEGER NOT NULL REFERENCES colleges(id),
        UNIQUE (email, college_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        type TEXT NOT NULL,
        date TEXT NOT NULL,
        college_id INTEGER NOT NULL REFERENCES colleges(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS registrations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES students(id),
        event_id INTEGER NOT NULL REFERENCES events(id),
        created_at TEXT NOT NULL,
        UNIQUE (student_id, event_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES students(id),
        event_id INTEGER NOT NULL REFERENCES events(id),
        status TEXT NOT NULL,
        marked_at TEXT NOT NULL,
        UNIQUE (student_id, event_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES students(id),
        event_id INTEGER NOT NULL REFERENCES events(id),
        rating INTEGER NOT NULL,
        comment TEXT,
        created_at TEXT NOT NULL,
        UNIQUE (student_id, event_id)
    )
    "#,
];

/// Create the connection pool.
///
/// The database file is created on first connect; foreign keys are enforced
/// per connection since SQLite leaves them off by default.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create all entity tables if they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

/// Check if all required tables exist
pub async fn check_schema(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let required_tables = [
        "colleges",
        "students",
        "events",
        "registrations",
        "attendance",
        "feedback",
    ];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = $1)",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    Ok(true)
}
