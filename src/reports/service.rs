//! Report Service
//!
//! Six aggregation queries over the entity tables. Each report is pure,
//! read-only, and computed fresh per call against the injected pool.
//!
//! Percentages and averages are returned as raw floats; rounding to two
//! decimals happens at the serialization boundary, never here. Ties on
//! equal aggregate counts break by ascending id so ordering is
//! deterministic.

use chrono::NaiveDate;
use sqlx::SqlitePool;

/// One row of the event popularity report.
#[derive(Debug, Clone)]
pub struct EventPopularity {
    pub event_id: i64,
    pub title: String,
    pub event_type: String,
    pub date: NaiveDate,
    pub registrations: i64,
}

/// One row of the top active students report.
#[derive(Debug, Clone)]
pub struct TopStudent {
    pub student_id: i64,
    pub name: String,
    pub events_attended: i64,
}

/// One row of the combined per-event summary report.
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub event_id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub registrations: i64,
    /// Raw percentage, 0.0 when the event has no attendance rows
    pub attendance_pct: f64,
    /// None when the event has no feedback rows at all
    pub avg_rating: Option<f64>,
}

/// Report Service for aggregate queries
#[derive(Debug, Clone)]
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    /// Create a new ReportService
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Registration counts for every event of a college.
    ///
    /// Events with zero registrations are included with count 0 (outer
    /// join). Ordered by count descending, then id ascending.
    pub async fn event_popularity(
        &self,
        college_id: i64,
    ) -> Result<Vec<EventPopularity>, sqlx::Error> {
        let rows: Vec<(i64, String, String, NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT e.id, e.title, e.type, e.date, COUNT(r.id) AS registrations
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            WHERE e.college_id = $1
            GROUP BY e.id
            ORDER BY registrations DESC, e.id ASC
            "#,
        )
        .bind(college_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(event_id, title, event_type, date, registrations)| EventPopularity {
                    event_id,
                    title,
                    event_type,
                    date,
                    registrations,
                },
            )
            .collect())
    }

    /// Percentage of `present` attendance rows for an event.
    ///
    /// 0.0 when the event has no attendance rows at all.
    pub async fn attendance_rate(&self, event_id: i64) -> Result<f64, sqlx::Error> {
        let pct: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(CASE WHEN status = 'present' THEN 1.0 ELSE 0.0 END) * 100.0
            FROM attendance
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(pct.unwrap_or(0.0))
    }

    /// Arithmetic mean of feedback ratings for an event.
    ///
    /// None when no feedback exists, deliberately distinct from a 0 rating.
    pub async fn feedback_rating(&self, event_id: i64) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar("SELECT AVG(rating) FROM feedback WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Number of events a student attended (`present` rows), across all
    /// colleges.
    pub async fn student_participation(&self, student_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(id) FROM attendance WHERE student_id = $1 AND status = 'present'",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await
    }

    /// The `limit` most active students of a college by `present` count.
    ///
    /// Students with zero present rows are excluded entirely (inner join).
    pub async fn top_active_students(
        &self,
        college_id: i64,
        limit: i64,
    ) -> Result<Vec<TopStudent>, sqlx::Error> {
        let rows: Vec<(i64, String, i64)> = sqlx::query_as(
            r#"
            SELECT s.id, s.name, COUNT(a.id) AS events_attended
            FROM students s
            JOIN attendance a ON a.student_id = s.id
            WHERE s.college_id = $1 AND a.status = 'present'
            GROUP BY s.id
            ORDER BY events_attended DESC, s.id ASC
            LIMIT $2
            "#,
        )
        .bind(college_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(student_id, name, events_attended)| TopStudent {
                student_id,
                name,
                events_attended,
            })
            .collect())
    }

    /// Combined registration count, attendance percentage, and average
    /// feedback rating for every event of a college with the given type.
    ///
    /// The type filter is exact, case-sensitive string equality. Counts and
    /// percentages default to 0 / 0.0 for events with no rows; the average
    /// rating stays NULL when no feedback exists. Ordered by event date
    /// descending, then id ascending.
    pub async fn event_summary(
        &self,
        college_id: i64,
        event_type: &str,
    ) -> Result<Vec<EventSummary>, sqlx::Error> {
        let rows: Vec<(i64, String, NaiveDate, i64, f64, Option<f64>)> = sqlx::query_as(
            r#"
            SELECT e.id, e.title, e.date,
                   COALESCE(r.registrations, 0) AS registrations,
                   COALESCE(a.attendance_pct, 0.0) AS attendance_pct,
                   f.avg_rating
            FROM events e
            LEFT JOIN (
                SELECT event_id, COUNT(id) AS registrations
                FROM registrations
                GROUP BY event_id
            ) r ON r.event_id = e.id
            LEFT JOIN (
                SELECT event_id,
                       AVG(CASE WHEN status = 'present' THEN 1.0 ELSE 0.0 END) * 100.0
                           AS attendance_pct
                FROM attendance
                GROUP BY event_id
            ) a ON a.event_id = e.id
            LEFT JOIN (
                SELECT event_id, AVG(rating) AS avg_rating
                FROM feedback
                GROUP BY event_id
            ) f ON f.event_id = e.id
            WHERE e.college_id = $1 AND e.type = $2
            ORDER BY e.date DESC, e.id ASC
            "#,
        )
        .bind(college_id)
        .bind(event_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(event_id, title, date, registrations, attendance_pct, avg_rating)| {
                    EventSummary {
                        event_id,
                        title,
                        date,
                        registrations,
                        attendance_pct,
                        avg_rating,
                    }
                },
            )
            .collect())
    }
}
