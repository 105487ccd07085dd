//! Error types for memdtool
//!
//! Provides a unified error type for all operations. Every variant is fatal
//! to the invocation that raised it; nothing is retried.

use thiserror::Error;

/// Result type alias using ToolError
pub type Result<T> = std::result::Result<T, ToolError>;

/// Unified error type for memdtool operations
#[derive(Debug, Error)]
pub enum ToolError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// A read or write on an established connection failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection could not be established
    #[error("failed to connect to {addr}: {source}")]
    Transport {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// A response line does not have the shape the command requires
    #[error("{0}")]
    Protocol(String),

    /// An integer field that must parse did not
    #[error("invalid {field}: {value:?} is not an integer")]
    Value { field: &'static str, value: String },
}

impl ToolError {
    /// Build the protocol error reported for a malformed response line
    pub fn strange(command: &str, line: &str) -> Self {
        ToolError::Protocol(format!("result of `{}` is strange: {}", command, line))
    }
}
