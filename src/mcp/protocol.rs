/// Wire types for the habit tracker's MCP endpoint
///
/// Line-delimited JSON-RPC 2.0 envelopes, the MCP handshake payloads and the
/// tool call results that carry session output back to the client.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::DomainError;
use crate::ServerError;

pub const MCP_VERSION: &str = "2024-11-05";

/// Incoming request or notification
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// Null for notifications
    #[serde(default)]
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

/// Outgoing response; exactly one of `result` and `error` is set
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// `tools/call` params: which habit tool to run and its arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

/// Text output of a habit tool
///
/// Failed calls set `is_error` and carry the application error code in
/// `data`, so clients can tell an unknown habit from a failed save.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Entry in the `tools/list` response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// The habit tool set is fixed for the lifetime of the server
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

/// Reply to `initialize`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application codes, -32000 to -32099
    /// No habit with the requested name is tracked
    pub const UNKNOWN_HABIT: i32 = -32001;
    /// Add rejected: name already tracked or empty
    pub const DUPLICATE_HABIT: i32 = -32002;
    /// Date, month or year outside what the calendar accepts
    pub const INVALID_DATE: i32 = -32003;
    /// Loading or saving the sheet failed
    pub const PERSISTENCE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message, data }),
        }
    }
}

impl ToolCallResult {
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
            data: None,
        }
    }

    /// Failed tool call tagged with an `error_codes` value
    pub fn error(code: i32, error_message: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", error_message),
            }],
            is_error: true,
            data: Some(json!({ "code": code })),
        }
    }

    pub fn from_server_error(error: &ServerError) -> Self {
        Self::error(server_error_to_json_rpc_code(error), error.to_string())
    }
}

/// Map a server error to its JSON-RPC error code
pub fn server_error_to_json_rpc_code(error: &ServerError) -> i32 {
    match error {
        ServerError::Domain(DomainError::UnknownHabit(_)) => error_codes::UNKNOWN_HABIT,
        ServerError::Domain(DomainError::DuplicateHabit { .. }) => error_codes::DUPLICATE_HABIT,
        ServerError::Domain(DomainError::InvalidDate(_)) => error_codes::INVALID_DATE,
        ServerError::Domain(DomainError::InvalidHabitName(_)) => error_codes::INVALID_PARAMS,
        ServerError::Persistence(_) => error_codes::PERSISTENCE_ERROR,
        ServerError::Io(_) | ServerError::Json(_) => error_codes::INTERNAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RejectReason;
    use crate::storage::StorageError;

    #[test]
    fn test_domain_errors_get_application_codes() {
        let unknown = ServerError::Domain(DomainError::UnknownHabit("Run".into()));
        assert_eq!(server_error_to_json_rpc_code(&unknown), error_codes::UNKNOWN_HABIT);

        let duplicate = ServerError::Domain(DomainError::DuplicateHabit {
            name: "Read".into(),
            reason: RejectReason::AlreadyExists,
        });
        assert_eq!(server_error_to_json_rpc_code(&duplicate), error_codes::DUPLICATE_HABIT);

        let bad_date = ServerError::Domain(DomainError::InvalidDate("13/2024".into()));
        assert_eq!(server_error_to_json_rpc_code(&bad_date), error_codes::INVALID_DATE);
    }

    #[test]
    fn test_storage_errors_map_to_persistence() {
        let error = ServerError::Persistence(StorageError::AllRowsMalformed { rows: 2 });
        assert_eq!(server_error_to_json_rpc_code(&error), error_codes::PERSISTENCE_ERROR);

        let result = ToolCallResult::from_server_error(&error);
        assert!(result.is_error);
        assert_eq!(result.data, Some(json!({ "code": error_codes::PERSISTENCE_ERROR })));
    }
}
