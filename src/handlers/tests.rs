//! Unit tests for handlers
//!
//! Command construction and input validation only; end-to-end handler tests
//! live in tests/ and run against an in-memory database.

#[cfg(test)]
mod tests {
    use crate::domain::{AttendanceStatus, DomainError, Rating};
    use crate::handlers::{
        CreateEventCommand, CreateStudentCommand, MarkAttendanceCommand, SubmitFeedbackCommand,
    };

    #[test]
    fn test_create_student_command() {
        let cmd = CreateStudentCommand::new("Asha".to_string(), "asha@example.com".to_string(), 1);

        assert_eq!(cmd.name, "Asha");
        assert_eq!(cmd.email, "asha@example.com");
        assert_eq!(cmd.college_id, 1);
    }

    #[test]
    fn test_create_event_command_keeps_raw_date() {
        // Parsing happens in the handler so the error can carry the input
        let cmd = CreateEventCommand::new(
            "Intro to LLMs".to_string(),
            "Seminar".to_string(),
            "2026-08-06".to_string(),
            1,
        );

        assert_eq!(cmd.date, "2026-08-06");
        assert_eq!(cmd.event_type, "Seminar");
    }

    #[test]
    fn test_mark_attendance_command_status_parsing() {
        let cmd = MarkAttendanceCommand::new(1, 2, "present".to_string());
        let status: AttendanceStatus = cmd.status.parse().unwrap();
        assert_eq!(status, AttendanceStatus::Present);

        let cmd = MarkAttendanceCommand::new(1, 2, "skipped".to_string());
        let err = cmd.status.parse::<AttendanceStatus>().unwrap_err();
        assert_eq!(err, DomainError::InvalidStatus("skipped".to_string()));
    }

    #[test]
    fn test_submit_feedback_command_with_comment() {
        let cmd = SubmitFeedbackCommand::new(1, 2, 5).with_comment("Great!".to_string());

        assert_eq!(cmd.rating, 5);
        assert_eq!(cmd.comment, Some("Great!".to_string()));
        assert!(Rating::new(cmd.rating).is_ok());
    }

    #[test]
    fn test_submit_feedback_command_invalid_rating() {
        let cmd = SubmitFeedbackCommand::new(1, 2, 7);

        assert_eq!(
            Rating::new(cmd.rating).unwrap_err(),
            DomainError::InvalidRating(7)
        );
    }
}
