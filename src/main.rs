//! Notes MCP Server
//!
//! A Model Context Protocol (MCP) server that keeps short text notes in memory.
//! Notes are lost when the process exits.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use notes_mcp_server::config::Config;
use notes_mcp_server::error::Result;
use notes_mcp_server::mcp::http::run_http;
use notes_mcp_server::mcp::server::McpServer;
use notes_mcp_server::notes::store::NoteStore;

/// Notes MCP Server
#[derive(Parser)]
#[command(name = "notes-mcp-server")]
#[command(author, version, about = "Notes MCP Server - A Model Context Protocol server for quick notes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over HTTP (the default)
    Serve,

    /// Serve MCP over stdin/stdout for hosts that spawn the server
    Stdio,
}

/// Command-line overrides for environment configuration
#[derive(Args, Default)]
struct Overrides {
    /// Interface to listen on [env: NOTES_MCP_HOST]
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on [env: NOTES_MCP_PORT]
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Route that accepts MCP messages [env: NOTES_MCP_PATH]
    #[arg(long, global = true)]
    path: Option<String>,

    /// Maximum note length in characters [env: NOTES_MAX_NOTE_LENGTH]
    #[arg(long, global = true)]
    max_note_length: Option<usize>,
}

impl Overrides {
    /// Replace environment values with the flags given, then validate the result
    fn apply(self, mut config: Config) -> Result<Config> {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = self.path {
            config.path = path;
        }
        if let Some(max_note_length) = self.max_note_length {
            config.max_note_length = max_note_length;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays free for the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli.overrides.apply(Config::new())?;

    let store = Arc::new(NoteStore::new(config.max_note_length));
    let server = Arc::new(McpServer::new(store));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_http(server, &config).await?,
        Commands::Stdio => server.run_stdio().await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_fix_invalid_environment_values() {
        let from_env = Config {
            path: "no-leading-slash".to_string(),
            ..Config::default()
        };
        let overrides = Overrides {
            path: Some("/notes".to_string()),
            ..Overrides::default()
        };

        let config = overrides.apply(from_env).unwrap();
        assert_eq!(config.path, "/notes");
    }

    #[test]
    fn test_invalid_values_are_rejected_after_overrides() {
        let overrides = Overrides {
            max_note_length: Some(0),
            ..Overrides::default()
        };
        assert!(overrides.apply(Config::default()).is_err());
    }

    #[test]
    fn test_cli_parses_flags_after_subcommand() {
        let cli = Cli::parse_from(["notes-mcp-server", "serve", "--port", "9000"]);
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.overrides.port, Some(9000));
    }
}
