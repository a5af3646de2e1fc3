//! Error severity classification shared across Listkeeper crates
//!
//! Every crate defines its own `thiserror` enum and implements [`Severity`]
//! for it, so callers can pick a log level and a user-facing strategy without
//! matching on foreign variants.

use std::fmt;

/// Severity levels for error classification
///
/// # Severity Levels
///
/// - **Warning**: user-correctable input problems. The request is answered
///   normally, usually by redisplaying a form.
/// - **Error**: the requested operation failed (for example a missing list),
///   but the session and server are unaffected.
/// - **Critical**: the server could not read or write session state.
///
/// # Examples
///
/// ```rust
/// use listkeeper_common::ErrorSeverity;
///
/// // A list name that is too long is corrected by the user
/// let too_long = ErrorSeverity::Warning;
///
/// // A session store that cannot write to disk needs an operator
/// let disk_full = ErrorSeverity::Critical;
/// assert!(disk_full > too_long);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but system can continue
    Error,

    /// System cannot continue serving this request, requires attention
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use listkeeper_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     StoreUnavailable,
///     ListMissing,
///     NameTooLong,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::StoreUnavailable => ErrorSeverity::Critical,
///             MyError::ListMissing => ErrorSeverity::Error,
///             MyError::NameTooLong => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::ListMissing.severity(), ErrorSeverity::Error);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

/// Emit a tracing event for `error` at the level matching its severity.
///
/// `context` names the operation that failed and ends up in the message.
pub fn log_with_severity<E>(context: &str, error: &E)
where
    E: Severity + fmt::Display + ?Sized,
{
    match error.severity() {
        ErrorSeverity::Warning => tracing::warn!("{context}: {error}"),
        ErrorSeverity::Error => tracing::error!("{context}: {error}"),
        ErrorSeverity::Critical => tracing::error!(critical = true, "{context}: {error}"),
    }
}
