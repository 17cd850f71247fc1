//! Error types for the LearnBooks prototype.
//!
//! This module defines the centralized error type [`LearnBooksError`] and a type
//! alias [`Result`] used throughout the crate. All errors are implemented with
//! the `thiserror` crate. None of these conditions is fatal to the process: the
//! UI layer surfaces them as form banners or status-line messages.

use thiserror::Error;

/// The main error type for LearnBooks operations.
///
/// Consolidates the error taxonomy of the prototype: user-correctable
/// validation problems, authentication and registration failures, unknown
/// resources, transient service failures, and local I/O or configuration
/// problems. Variants wrapping external errors use `#[from]` for automatic
/// conversion.
#[derive(Debug, Error)]
pub enum LearnBooksError {
    /// A form field failed client-side validation.
    ///
    /// User-correctable; shown inline next to the offending field. The string
    /// names the field and the rule that failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication was rejected by the auth service.
    ///
    /// Shown as a form-level banner on the login screen.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Registration was rejected (for example a duplicate account).
    ///
    /// Shown as a form-level banner on the register screen.
    #[error("Registration error: {0}")]
    Registration(String),

    /// A referenced resource does not exist (for example an unknown book id).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A backend service call failed transiently.
    ///
    /// Retryable; shown in the status line. The string contains a description
    /// of what went wrong.
    #[error("Service error: {0}")]
    Service(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when a request cannot be posted or a response channel closed
    /// unexpectedly.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for LearnBooks operations.
pub type Result<T> = std::result::Result<T, LearnBooksError>;
