//! Error types and handling infrastructure for rfab.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Design Principles
//!
//! - **Protocol misuse is loud**: driving the gesture arbiter out of contract is a
//!   programming error in the integrating input layer and is reported, not swallowed
//! - **Context preservation**: include relevant information for debugging
//! - **Consistency**: standardized Result type across all modules

use thiserror::Error;

/// The main error type for rfab operations.
///
/// This enum covers protocol misuse at the arbiter boundary, configuration
/// problems, and terminal I/O failures.
#[derive(Error, Debug)]
pub enum RfabError {
    /// The input layer called an arbiter operation out of contract
    /// (e.g. `on_move` with no press in progress).
    #[error("Gesture protocol violation in {call}: {message}")]
    Protocol {
        call: &'static str,
        message: String,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Terminal and rendering related errors
    #[error("Terminal operation failed: {message}")]
    Terminal {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for rfab operations.
///
/// This type alias provides a consistent error handling interface across
/// all modules in the rfab codebase.
pub type Result<T> = std::result::Result<T, RfabError>;

impl RfabError {
    /// Create a Protocol error naming the violated operation
    pub fn protocol(call: &'static str, message: impl Into<String>) -> Self {
        Self::Protocol {
            call,
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to RfabError
impl From<std::io::Error> for RfabError {
    fn from(err: std::io::Error) -> Self {
        Self::Terminal {
            message: "IO operation failed".to_string(),
            source: err,
        }
    }
}
