//! URL-encoded form bodies

use serde::Deserialize;

/// Body of the create and rename list forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListForm {
    #[serde(default)]
    pub list_name: String,
}

/// Body of the add-todo form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

/// Body of the toggle form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToggleForm {
    pub completed: Option<String>,
}

impl ToggleForm {
    /// Only the literal `"true"` marks a todo complete
    pub fn is_completed(&self) -> bool {
        self.completed.as_deref() == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_values() {
        let form = |value: Option<&str>| ToggleForm {
            completed: value.map(str::to_string),
        };
        assert!(form(Some("true")).is_completed());
        assert!(!form(Some("false")).is_completed());
        assert!(!form(Some("TRUE")).is_completed());
        assert!(!form(Some("")).is_completed());
        assert!(!form(None).is_completed());
    }
}
