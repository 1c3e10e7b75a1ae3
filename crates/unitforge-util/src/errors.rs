use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for unitforge glue operations (I/O and lock file
/// handling). Domain errors from resolution have their own closed taxonomy
/// in `unitforge-resolver`.
#[derive(Debug, Error, Diagnostic)]
pub enum ForgeError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lock file is missing, unreadable, or malformed.
    #[error("Lock file error: {message}")]
    LockFile { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
