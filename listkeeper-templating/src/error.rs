//! Error types for template rendering

use listkeeper_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;

/// Errors that can occur while parsing or rendering templates
#[derive(Debug, Error)]
pub enum TemplatingError {
    /// A built-in template failed to parse
    #[error("Template parse error in '{name}': {message}")]
    Parse { name: String, message: String },

    /// Rendering a parsed template failed
    #[error("Template render error in '{name}': {message}")]
    Render { name: String, message: String },

    /// A view model could not be converted to template variables
    #[error("Failed to build template variables: {0}")]
    Variables(String),

    /// No template is registered under this name
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

impl Severity for TemplatingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Built-in templates that do not parse make every page unusable
            TemplatingError::Parse { .. } => ErrorSeverity::Critical,
            TemplatingError::UnknownTemplate(_) => ErrorSeverity::Critical,
            TemplatingError::Render { .. } => ErrorSeverity::Error,
            TemplatingError::Variables(_) => ErrorSeverity::Error,
        }
    }
}
