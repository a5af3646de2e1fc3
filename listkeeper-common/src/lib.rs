//! # Listkeeper Common
//!
//! Foundational pieces shared by every Listkeeper crate:
//!
//! - [`error`] - severity classification for domain errors
//! - [`logging`] - helpers for readable tracing output

pub mod error;
pub mod logging;

pub use error::{log_with_severity, ErrorSeverity, Severity};
pub use logging::Pretty;
