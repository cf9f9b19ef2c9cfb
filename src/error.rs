//! Error types for the Notes MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Notes MCP Server
#[derive(Error, Debug)]
pub enum NotesMcpError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid arguments supplied by a caller
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NotesMcpError {
    /// Whether the caller can fix this by correcting its input and retrying
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, NotesMcpError::Validation(_))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Invalid-argument errors. Always recoverable by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Note text must not be empty")]
    EmptyText,

    #[error("Note text is {length} characters long (max: {max})")]
    TextTooLong { length: usize, max: usize },

    #[error("Count must be a non-negative integer, got {count}")]
    NegativeCount { count: i64 },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid parameter: {name} - {message}")]
    InvalidParameter { name: String, message: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Transport error: {message}")]
    TransportError { message: String },
}

/// Result type alias for Notes MCP operations
pub type Result<T> = std::result::Result<T, NotesMcpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::TextTooLong {
            length: 12,
            max: 10,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("max: 10"));
    }

    #[test]
    fn test_error_conversion() {
        let err: NotesMcpError = ValidationError::EmptyText.into();
        assert!(matches!(err, NotesMcpError::Validation(_)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_non_validation_errors_are_not_invalid_argument() {
        let err: NotesMcpError = McpError::UnknownTool {
            name: "edit_note".to_string(),
        }
        .into();
        assert!(!err.is_invalid_argument());
        assert!(err.to_string().contains("edit_note"));
    }
}
