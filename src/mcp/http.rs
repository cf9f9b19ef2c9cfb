//! HTTP transport
//!
//! Accepts one JSON-RPC message per `POST` on the configured path. Replies
//! are plain JSON, or a single SSE `message` event when the client's
//! `Accept` header lists `text/event-stream`. The server never keeps a
//! stream open.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header::ACCEPT, HeaderMap, StatusCode},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures_util::{future, stream};
use tower_http::trace::TraceLayer;

use crate::config::notes::{HEALTH_PATH, MAX_REQUEST_BODY_SIZE};
use crate::config::Config;
use crate::error::{McpError, Result};
use crate::mcp::server::McpServer;
use crate::mcp::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Build the HTTP router serving MCP on `path`
pub fn router(server: Arc<McpServer>, path: &str) -> Router {
    Router::new()
        .route(path, post(handle_post).get(handle_get))
        .route(HEALTH_PATH, get(health_check))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

/// Serve MCP over HTTP until Ctrl-C
pub async fn run_http(server: Arc<McpServer>, config: &Config) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, path = %config.path, "Serving MCP over HTTP");

    axum::serve(listener, router(server, &config.path))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| McpError::TransportError {
            message: e.to_string(),
        })?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn handle_post(
    State(server): State<Arc<McpServer>>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let event_stream = accepts_event_stream(&headers);

    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!(
                max_size = MAX_REQUEST_BODY_SIZE,
                "Request body exceeds maximum size limit"
            );
            let error = JsonRpcError::invalid_request(format!(
                "Request body too large (max: {} bytes)",
                MAX_REQUEST_BODY_SIZE
            ));
            return reply(
                StatusCode::PAYLOAD_TOO_LARGE,
                JsonRpcResponse::error(None, error),
                event_stream,
            );
        }
        Err(rejection) => {
            let error = JsonRpcError::invalid_request(rejection.body_text());
            return reply(
                rejection.status(),
                JsonRpcResponse::error(None, error),
                event_stream,
            );
        }
    };

    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let error = JsonRpcError::parse_error(format!("Parse error: {}", e));
            return reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::error(None, error),
                event_stream,
            );
        }
    };

    match server.handle_request(request).await {
        Some(response) => reply(StatusCode::OK, response, event_stream),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Whether the client can read a `text/event-stream` reply
fn accepts_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("text/event-stream"))
}

/// Send a response as plain JSON, or as a single `message` event for
/// streaming clients. Error statuses always go out as JSON.
fn reply(status: StatusCode, response: JsonRpcResponse, event_stream: bool) -> Response {
    if event_stream && status == StatusCode::OK {
        match Event::default().event("message").json_data(&response) {
            Ok(event) => {
                let events = stream::once(future::ready(Ok::<_, Infallible>(event)));
                return Sse::new(events).into_response();
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode event, replying with JSON"),
        }
    }

    (status, Json(response)).into_response()
}

async fn handle_get() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn health_check() -> &'static str {
    "OK"
}
