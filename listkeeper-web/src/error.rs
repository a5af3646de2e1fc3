//! Errors raised while serving a request

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use listkeeper_common::{log_with_severity, ErrorSeverity, Severity};
use listkeeper_templating::TemplatingError;
use listkeeper_todo::TodoError;
use thiserror::Error;

/// Result type for web operations
pub type Result<T> = std::result::Result<T, WebError>;

/// Failures that cannot be turned into a flash message and redirect
#[derive(Debug, Error)]
pub enum WebError {
    /// The session store failed to load or save state
    #[error("Session store error: {0}")]
    Store(#[from] TodoError),

    /// A page failed to render
    #[error("Template error: {0}")]
    Template(#[from] TemplatingError),

    /// The session cookie could not be encoded as a header value
    #[error("Invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),

    /// Binding or serving the listener failed
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Severity for WebError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WebError::Store(err) => err.severity(),
            WebError::Template(err) => err.severity(),
            WebError::Header(_) => ErrorSeverity::Error,
            WebError::Io(_) => ErrorSeverity::Critical,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        log_with_severity("Request failed", &self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
