//! Error types for the wnquery library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`WnQueryError`] enum. Load-time structural faults (unreadable input,
//! malformed XML) abort the whole load; an invalid part-of-speech on a query
//! fails only that call and is distinct from an ordinary "not found" result,
//! which is never an error.
//!
//! # Examples
//!
//! ```
//! use wnquery::error::{Result, WnQueryError};
//!
//! fn check_pos(pos: &str) -> Result<()> {
//!     match pos {
//!         "n" | "v" | "a" | "b" => Ok(()),
//!         other => Err(WnQueryError::invalid_pos(other)),
//!     }
//! }
//!
//! assert!(check_pos("n").is_ok());
//! assert!(check_pos("x").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for wnquery operations.
#[derive(Error, Debug)]
pub enum WnQueryError {
    /// I/O errors (opening or reading the lexicon file, console I/O).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed XML input, reported with the input line number.
    #[error("Parse error (input line {line}): {message}")]
    Parse {
        /// Input line the fault was detected on.
        line: u64,
        /// Description of the fault.
        message: String,
    },

    /// Configuration errors raised before any parsing begins.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An unrecognized part-of-speech selector on a query or loaded record.
    #[error("Invalid part-of-speech '{0}' (expected one of n, v, a, b)")]
    InvalidPos(String),

    /// JSON serialization errors from the CLI output path.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with [`WnQueryError`].
pub type Result<T> = std::result::Result<T, WnQueryError>;

impl WnQueryError {
    /// Create a new parse error at the given input line.
    pub fn parse<S: Into<String>>(line: u64, msg: S) -> Self {
        WnQueryError::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WnQueryError::Config(msg.into())
    }

    /// Create a new invalid part-of-speech error.
    pub fn invalid_pos<S: Into<String>>(pos: S) -> Self {
        WnQueryError::InvalidPos(pos.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WnQueryError::Other(msg.into())
    }
}
