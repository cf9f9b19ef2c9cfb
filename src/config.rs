//! Configuration management for the Notes MCP Server
//!
//! Handles environment variables, defaults and validation.

use crate::error::{ConfigError, NotesMcpError, Result};

/// Configuration for the Notes MCP Server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface the HTTP transport binds to
    pub host: String,

    /// Port the HTTP transport listens on
    pub port: u16,

    /// Route that accepts MCP messages
    pub path: String,

    /// Maximum note length in characters
    pub max_note_length: usize,
}

impl Config {
    /// Create a configuration from environment variables, falling back to defaults
    ///
    /// Not validated here; command-line flags may still replace these values.
    pub fn new() -> Self {
        let defaults = Self::default();

        let host = std::env::var("NOTES_MCP_HOST").unwrap_or(defaults.host);

        let port = std::env::var("NOTES_MCP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let path = std::env::var("NOTES_MCP_PATH").unwrap_or(defaults.path);

        let max_note_length = std::env::var("NOTES_MAX_NOTE_LENGTH")
            .ok()
            .and_then(|n| n.parse().ok())
            .unwrap_or(defaults.max_note_length);

        Self {
            host,
            port,
            path,
            max_note_length,
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(invalid(format!(
                "MCP path must start with '/', got '{}'",
                self.path
            )));
        }

        if self.path == notes::HEALTH_PATH {
            return Err(invalid(format!(
                "MCP path conflicts with the health route {}",
                notes::HEALTH_PATH
            )));
        }

        if self.max_note_length == 0 {
            return Err(invalid("Maximum note length must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: notes::DEFAULT_HOST.to_string(),
            port: notes::DEFAULT_PORT,
            path: notes::DEFAULT_PATH.to_string(),
            max_note_length: notes::DEFAULT_MAX_NOTE_LENGTH,
        }
    }
}

fn invalid(message: impl Into<String>) -> NotesMcpError {
    NotesMcpError::Config(ConfigError::InvalidConfig {
        message: message.into(),
    })
}

/// Notes server constants
pub mod notes {
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    pub const DEFAULT_PORT: u16 = 8000;

    pub const DEFAULT_PATH: &str = "/mcp";

    pub const DEFAULT_MAX_NOTE_LENGTH: usize = 2000;

    pub const HEALTH_PATH: &str = "/health";

    /// Largest HTTP request body accepted by the MCP route
    pub const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.path, "/mcp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_relative_path() {
        let config = Config {
            path: "mcp".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(NotesMcpError::Config(_))));
    }

    #[test]
    fn test_rejects_health_path() {
        let config = Config {
            path: "/health".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_max_length() {
        let config = Config {
            max_note_length: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
