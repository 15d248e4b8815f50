//! Reports module
//!
//! Read-only aggregation queries over the entity tables.

mod service;

pub use service::{EventPopularity, EventSummary, ReportService, TopStudent};
