//! MCP Server implementation
//!
//! JSON-RPC dispatch shared by the HTTP and stdio transports.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;
use crate::notes::store::NoteStore;

/// MCP Server info
const SERVER_NAME: &str = "notes";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage hints returned from `initialize`
const INSTRUCTIONS: &str = "Keeps a list of short text notes for this session. \
Try: \"Add a note: Buy groceries\", \"Show my notes\", \"Delete 2 random notes\". \
Notes are kept in memory and are lost when the server restarts.";

/// MCP Server for notes
///
/// Holds no per-client state; one instance serves every HTTP caller.
pub struct McpServer {
    /// Tool handler
    tool_handler: ToolHandler,
}

impl McpServer {
    /// Create a new MCP server backed by the given store
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self {
            tool_handler: ToolHandler::new(store),
        }
    }

    /// Run the server on stdio
    pub async fn run_stdio(&self) -> Result<()> {
        tracing::info!("Serving MCP over stdio");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let mut response_str = serde_json::to_string(&response)?;
                response_str.push('\n');
                stdout.write_all(response_str.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a raw JSON-RPC message
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                None,
                JsonRpcError::parse_error(e.to_string()),
            )),
        }
    }

    /// Handle a parsed JSON-RPC request or notification
    ///
    /// Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported JSON-RPC version: {}",
                    request.jsonrpc
                )),
            ));
        }

        if request.method == methods::INITIALIZED {
            tracing::debug!("Client initialized");
        }

        let Some(id) = request.id.clone() else {
            // Notification, no response
            return None;
        };

        let response = match request.method.as_str() {
            methods::INITIALIZE => respond(id, &self.handle_initialize(request.params)),
            methods::INITIALIZED | methods::PING => {
                JsonRpcResponse::success(Some(id), serde_json::json!({}))
            }
            methods::LIST_TOOLS => respond(id, &self.handle_list_tools()),
            methods::CALL_TOOL => respond(id, &self.handle_call_tool(request.params).await),
            _ => JsonRpcResponse::error(
                Some(id),
                JsonRpcError::method_not_found(&request.method),
            ),
        };

        Some(response)
    }

    /// Handle initialize request
    fn handle_initialize(&self, params: Option<Value>) -> InitializeResult {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            tracing::info!(
                client = %client.name,
                version = client.version.as_deref().unwrap_or("unknown"),
                protocol = params.protocol_version.as_deref().unwrap_or("unknown"),
                "Client connected"
            );
        }

        InitializeResult {
            protocol_version: negotiate_version(params.protocol_version.as_deref()).to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: self.tool_handler.list_tools(),
        }
    }

    /// Handle call tool request
    async fn handle_call_tool(&self, params: Option<Value>) -> CallToolResult {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return CallToolResult::error(format!("Invalid tool parameters: {}", e));
                }
            },
            None => return CallToolResult::error("Missing tool parameters"),
        };

        self.tool_handler.call_tool(&params.name, params.arguments).await
    }
}

fn respond<T: Serialize>(id: RequestId, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(Some(id), value),
        Err(e) => JsonRpcResponse::error(Some(id), JsonRpcError::internal_error(e.to_string())),
    }
}
