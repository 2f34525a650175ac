/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Turns tool calls into session commands
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{HabitTrackerServer, ServerError};

/// MCP server wrapping one habit tracker session
pub struct McpServer {
    habit_tracker: HabitTrackerServer,
}

impl McpServer {
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self { habit_tracker }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub(crate) async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        if request.method.starts_with("notifications/") {
            debug!("Ignoring notification: {}", request.method);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => JsonRpcResponse::success(request.id, json!(null)),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Habit Streak Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(request.id, &result)
    }

    fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![
            tool::<tools::AddHabitParams>("habit_add", "Start tracking a new daily habit"),
            tool::<tools::CheckInParams>(
                "habit_check_in",
                "Mark a habit as done (or not done) for today and show the streak",
            ),
            tool::<tools::EditDayParams>(
                "habit_edit_day",
                "Set or toggle whether a habit was done on a past day",
            ),
            tool::<tools::StatusParams>("habit_status", "Show current streaks"),
            tool::<tools::CalendarParams>(
                "habit_calendar",
                "Show a habit's month calendar with completion progress",
            ),
            ToolDefinition {
                name: "habits_save".to_string(),
                description: "Save all progress to the sheet".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            },
            ToolDefinition {
                name: "habits_load".to_string(),
                description: "Reload all habits from the sheet, discarding unsaved changes".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            },
        ];

        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        debug!("Calling tool: {}", tool_params.name);
        let result = self.call_tool(&tool_params.name, tool_params.arguments).await;
        to_response(request.id, &result)
    }

    async fn call_tool(&mut self, name: &str, args: HashMap<String, Value>) -> ToolCallResult {
        let session = self.habit_tracker.session_mut();

        let outcome = match name {
            "habit_add" => match parse_args(args) {
                Ok(params) => tools::add_habit(session, params).map(|r| {
                    if r.success {
                        r.message
                    } else {
                        format!("⚠️ {}", r.message)
                    }
                }),
                Err(e) => return e,
            },
            "habit_check_in" => match parse_args(args) {
                Ok(params) => tools::check_in(session, params).map(|r| r.message),
                Err(e) => return e,
            },
            "habit_edit_day" => match parse_args(args) {
                Ok(params) => tools::edit_day(session, params).map(|r| r.message),
                Err(e) => return e,
            },
            "habit_status" => match parse_args(args) {
                Ok(params) => tools::get_habit_status(session, params).map(|r| r.message),
                Err(e) => return e,
            },
            "habit_calendar" => match parse_args(args) {
                Ok(params) => tools::get_habit_calendar(session, params).map(|r| r.message),
                Err(e) => return e,
            },
            "habits_save" => tools::save_habits(session).await.map(|r| r.message),
            "habits_load" => tools::load_habits(session).await.map(|r| r.message),
            _ => {
                return ToolCallResult::error(
                    error_codes::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", name),
                )
            }
        };

        match outcome {
            Ok(message) => ToolCallResult::success(message),
            Err(e) => {
                debug!("Tool {} failed: {}", name, e);
                ToolCallResult::from_server_error(&e)
            }
        }
    }
}

/// Tool definition whose input schema is derived from its parameter type
fn tool<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let input_schema = serde_json::to_value(schema_for!(T))
        .unwrap_or_else(|_| json!({"type": "object"}));

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Deserialize tool arguments into a parameter struct
fn parse_args<T: DeserializeOwned>(args: HashMap<String, Value>) -> Result<T, ToolCallResult> {
    serde_json::from_value(Value::Object(args.into_iter().collect()))
        .map_err(|e| {
            ToolCallResult::error(error_codes::INVALID_PARAMS, format!("Invalid arguments: {}", e))
        })
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}
