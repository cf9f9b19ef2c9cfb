//! Notes MCP Server Library
//!
//! A Model Context Protocol (MCP) server that keeps short text notes in memory.
//! Provides tools for adding notes, listing them, and deleting a random subset.

pub mod config;
pub mod error;
pub mod mcp;
pub mod notes;

pub use config::Config;
pub use error::{NotesMcpError, Result};
