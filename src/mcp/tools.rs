//! MCP Tool definitions and handlers
//!
//! Defines the note tools and their implementations.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::{McpError, NotesMcpError, Result, ValidationError};
use crate::mcp::types::{CallToolResult, Tool};
use crate::notes::store::NoteStore;
use crate::notes::utils::{format_note, format_note_list};

/// Tool names
pub mod names {
    pub const ADD_NOTE: &str = "add_note";
    pub const READ_NOTES: &str = "read_notes";
    pub const DELETE_RANDOM_NOTES: &str = "delete_random_notes";
}

/// Tool handler
pub struct ToolHandler {
    store: Arc<NoteStore>,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            tool_def(names::ADD_NOTE, "Adds a new note", add_note_schema(self.store.max_note_length())),
            tool_def(names::READ_NOTES, "Lists all notes in the order they were added", json!({"type": "object", "properties": {}})),
            tool_def(names::DELETE_RANDOM_NOTES, "Deletes the given number of randomly chosen notes and returns them", delete_random_notes_schema()),
        ]
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        tracing::debug!(tool = name, "Calling tool");

        let result = match name {
            names::ADD_NOTE => self.handle_add_note(&args),
            names::READ_NOTES => Ok(self.handle_read_notes()),
            names::DELETE_RANDOM_NOTES => self.handle_delete_random_notes(&args),
            _ => Err(McpError::UnknownTool {
                name: name.to_string(),
            }
            .into()),
        };

        match result {
            Ok(result) => result,
            Err(e) => {
                if e.is_invalid_argument() {
                    tracing::warn!(tool = name, error = %e, "Rejected tool arguments");
                }
                CallToolResult::error(e.to_string())
            }
        }
    }

    // ==================== Tool Handlers ====================

    fn handle_add_note(&self, args: &Value) -> Result<CallToolResult> {
        let text = match args.get("text") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => return Err(missing("text")),
            Some(other) => {
                return Err(invalid_parameter(
                    "text",
                    format!("expected a string, got {}", type_name(other)),
                ))
            }
        };

        let note = self.store.add(text)?;
        tracing::debug!(id = %note.id, "Note added");

        Ok(CallToolResult::structured(
            format!("Note added successfully.\n\n{}", format_note(&note)),
            json!({ "note": note }),
        ))
    }

    fn handle_read_notes(&self) -> CallToolResult {
        let notes = self.store.list();

        let text = if notes.is_empty() {
            "No notes yet.".to_string()
        } else {
            format_note_list("Found", &notes)
        };

        CallToolResult::structured(text, json!({ "notes": notes }))
    }

    fn handle_delete_random_notes(&self, args: &Value) -> Result<CallToolResult> {
        let count = parse_count(args.get("count"))?;

        let removed = self.store.delete_random(count)?;
        tracing::info!(
            requested = count,
            removed = removed.len(),
            "Deleted random notes"
        );

        Ok(CallToolResult::structured(
            format_note_list("Deleted", &removed),
            json!({ "notes": removed }),
        ))
    }
}

/// Read a non-negative integer count, accepting values beyond `i64` as "everything"
fn parse_count(value: Option<&Value>) -> Result<i64> {
    match value {
        Some(Value::Number(n)) => {
            if let Some(count) = n.as_i64() {
                if count < 0 {
                    return Err(ValidationError::NegativeCount { count }.into());
                }
                Ok(count)
            } else if n.is_u64() {
                Ok(i64::MAX)
            } else {
                Err(invalid_parameter(
                    "count",
                    format!("expected a non-negative integer, got {}", n),
                ))
            }
        }
        Some(Value::Null) | None => Err(missing("count")),
        Some(other) => Err(invalid_parameter(
            "count",
            format!("expected a non-negative integer, got {}", type_name(other)),
        )),
    }
}

fn missing(field: &str) -> NotesMcpError {
    ValidationError::MissingField {
        field: field.to_string(),
    }
    .into()
}

fn invalid_parameter(name: &str, message: String) -> NotesMcpError {
    ValidationError::InvalidParameter {
        name: name.to_string(),
        message,
    }
    .into()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ==================== Schema Definitions ====================

fn tool_def(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

fn add_note_schema(max_length: usize) -> Value {
    json!({
        "type": "object",
        "properties": {
            "text": {
                "type": "string",
                "minLength": 1,
                "maxLength": max_length,
                "description": "Content of the note"
            }
        },
        "required": ["text"]
    })
}

fn delete_random_notes_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "count": {
                "type": "integer",
                "minimum": 0,
                "description": "How many notes to delete. Deletes every note if fewer exist"
            }
        },
        "required": ["count"]
    })
}
