//! Command Handlers module
//!
//! Write-path handlers that validate referential and uniqueness invariants
//! before committing. Each handler runs its checks and insert against the
//! injected pool; failures leave the store unchanged.

mod attendance_handler;
mod college_handler;
mod commands;
mod event_handler;
mod feedback_handler;
mod registration_handler;
mod student_handler;

#[cfg(test)]
mod tests;

pub use attendance_handler::MarkAttendanceHandler;
pub use college_handler::CreateCollegeHandler;
pub use commands::*;
pub use event_handler::CreateEventHandler;
pub use feedback_handler::SubmitFeedbackHandler;
pub use registration_handler::RegisterStudentHandler;
pub use student_handler::CreateStudentHandler;
