//! Error types for todo list operations

use crate::ids::{ListId, TodoId};
use listkeeper_common::{ErrorSeverity, Severity};
use std::fmt;
use thiserror::Error;

/// Result type for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// What a validated name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSubject {
    /// The name of a todo list
    List,
    /// The name of a todo inside a list
    Todo,
}

impl fmt::Display for NameSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSubject::List => f.write_str("list"),
            NameSubject::Todo => f.write_str("todo"),
        }
    }
}

fn length_message(subject: &NameSubject) -> &'static str {
    match subject {
        NameSubject::List => "List name must be between 1 and 100 characters.",
        NameSubject::Todo => "Todo must be between 1 and 100 characters.",
    }
}

fn duplicate_message(subject: &NameSubject) -> &'static str {
    match subject {
        NameSubject::List => "List name must be unique.",
        NameSubject::Todo => "Todo name must be unique.",
    }
}

/// A name was rejected; the message is shown to the user as-is
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty or longer than the allowed maximum
    #[error("{}", length_message(.subject))]
    TooShortOrLong { subject: NameSubject },

    /// Another entity in the same scope already uses this name, ignoring case
    #[error("{}", duplicate_message(.subject))]
    DuplicateName { subject: NameSubject },
}

impl ValidationError {
    /// The kind of entity whose name failed validation
    pub fn subject(&self) -> NameSubject {
        match self {
            ValidationError::TooShortOrLong { subject }
            | ValidationError::DuplicateName { subject } => *subject,
        }
    }
}

impl Severity for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }
}

/// Errors that can occur during todo operations
#[derive(Debug, Error)]
pub enum TodoError {
    /// A list or todo name was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No list with this id exists in the session
    #[error("list {id} not found")]
    ListNotFound { id: ListId },

    /// The list exists but holds no todo with this id
    #[error("todo {todo_id} not found in list {list_id}")]
    TodoNotFound { list_id: ListId, todo_id: TodoId },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Session store failure not covered by the variants above
    #[error("Session store error: {0}")]
    Session(String),
}

impl TodoError {
    /// Create a new session store error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// True for lookups that found nothing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TodoError::ListNotFound { .. } | TodoError::TodoNotFound { .. }
        )
    }
}

impl Severity for TodoError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TodoError::Validation(err) => err.severity(),

            TodoError::ListNotFound { .. } => ErrorSeverity::Error,
            TodoError::TodoNotFound { .. } => ErrorSeverity::Error,

            // Session state could not be read or written
            TodoError::Io(_) => ErrorSeverity::Critical,
            TodoError::Yaml(_) => ErrorSeverity::Critical,
            TodoError::Session(_) => ErrorSeverity::Critical,
        }
    }
}

#[cfg(test)]
mod severity_tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::TooShortOrLong {
            subject: NameSubject::List,
        };
        assert_eq!(
            err.to_string(),
            "List name must be between 1 and 100 characters."
        );

        let err = ValidationError::DuplicateName {
            subject: NameSubject::Todo,
        };
        assert_eq!(err.to_string(), "Todo name must be unique.");
        assert_eq!(err.subject(), NameSubject::Todo);
    }

    #[test]
    fn test_validation_is_transparent_in_todo_error() {
        let err: TodoError = ValidationError::DuplicateName {
            subject: NameSubject::List,
        }
        .into();
        assert_eq!(err.to_string(), "List name must be unique.");
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_not_found_severity() {
        let err = TodoError::ListNotFound { id: ListId::new(7) };
        assert!(err.is_not_found());
        assert_eq!(err.severity(), ErrorSeverity::Error);

        let err = TodoError::TodoNotFound {
            list_id: ListId::new(1),
            todo_id: TodoId::new(2),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "todo 2 not found in list 1");
    }

    #[test]
    fn test_store_errors_are_critical() {
        let io_error = TodoError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(io_error.severity(), ErrorSeverity::Critical);
        assert!(!io_error.is_not_found());

        assert_eq!(
            TodoError::session("gone").severity(),
            ErrorSeverity::Critical
        );
    }
}
