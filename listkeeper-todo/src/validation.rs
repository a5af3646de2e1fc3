//! Name validation for lists and todos

use crate::error::{NameSubject, ValidationError};
use crate::types::{Todo, TodoList};

/// Shortest accepted name, in characters
pub const MIN_NAME_LENGTH: usize = 1;

/// Longest accepted name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Validate a list name against the lists that already exist.
///
/// Fails when the name is outside 1..=100 characters or when any existing
/// list has the same name ignoring case. The length check wins when both
/// apply.
pub fn validate_list_name(name: &str, lists: &[TodoList]) -> Result<(), ValidationError> {
    check_length(name, NameSubject::List)?;
    if lists.iter().any(|list| same_name(&list.name, name)) {
        return Err(ValidationError::DuplicateName {
            subject: NameSubject::List,
        });
    }
    Ok(())
}

/// Validate a todo name against the todos already in `list`.
pub fn validate_todo_name(name: &str, list: &TodoList) -> Result<(), ValidationError> {
    validate_todo_name_among(name, &list.todos)
}

pub(crate) fn validate_todo_name_among(name: &str, todos: &[Todo]) -> Result<(), ValidationError> {
    check_length(name, NameSubject::Todo)?;
    if todos.iter().any(|todo| same_name(&todo.name, name)) {
        return Err(ValidationError::DuplicateName {
            subject: NameSubject::Todo,
        });
    }
    Ok(())
}

fn check_length(name: &str, subject: NameSubject) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::TooShortOrLong { subject })
    }
}

fn same_name(existing: &str, candidate: &str) -> bool {
    existing.to_lowercase() == candidate.to_lowercase()
}
