//! JSON-RPC 2.0 envelopes and the MCP payloads this server speaks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::workspace::Root;

pub const JSONRPC_VERSION: &str = "2.0";

/// Newest MCP revision this server implements.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

// ─────────────────────────────────────────────────────────────────────────────
// Error codes (JSON-RPC error.code)
// ─────────────────────────────────────────────────────────────────────────────

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// ─────────────────────────────────────────────────────────────────────────────
// Envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Integer(i64),
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Integer(n) => write!(f, "{n}"),
            RequestId::String(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: Value,
}

/// Error reply. `id` is `null` when the request could not be parsed.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    pub error: JsonRpcErrorObject,
}

/// Why an incoming line could not be turned into a message.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl ProtocolError {
    pub fn code(&self) -> i64 {
        match self {
            ProtocolError::Parse(_) => PARSE_ERROR,
            ProtocolError::Invalid(_) => INVALID_REQUEST,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    id: Option<RequestId>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

/// A classified incoming message.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Request {
        id: RequestId,
        method: String,
        params: Option<Value>,
    },
    Notification {
        method: String,
    },
    /// Reply to a request this server sent to the host.
    Response {
        id: RequestId,
        result: Result<Value, JsonRpcErrorObject>,
    },
}

impl Incoming {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(line)?;
        if value.is_array() {
            return Err(ProtocolError::Invalid(
                "batch requests are not supported".to_string(),
            ));
        }
        let raw: RawMessage =
            serde_json::from_value(value).map_err(|e| ProtocolError::Invalid(e.to_string()))?;

        if raw.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
            return Err(ProtocolError::Invalid(
                "missing or unsupported jsonrpc version".to_string(),
            ));
        }

        match (raw.id, raw.method) {
            (Some(id), Some(method)) => Ok(Incoming::Request {
                id,
                method,
                params: raw.params,
            }),
            (None, Some(method)) => Ok(Incoming::Notification { method }),
            (Some(id), None) => {
                let result = match (raw.result, raw.error) {
                    (_, Some(error)) => Err(error),
                    (Some(result), None) => Ok(result),
                    (None, None) => {
                        return Err(ProtocolError::Invalid(
                            "response carries neither result nor error".to_string(),
                        ));
                    }
                };
                Ok(Incoming::Response { id, result })
            }
            (None, None) => Err(ProtocolError::Invalid(
                "message has neither method nor id".to_string(),
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// initialize
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: ClientCapabilities,
    #[serde(default)]
    pub client_info: Option<Implementation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientCapabilities {
    /// Present when the client can answer `roots/list`.
    #[serde(default)]
    pub roots: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: Implementation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

/// The protocol version to answer `initialize` with.
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .find(|v| **v == requested)
        .copied()
        .unwrap_or(LATEST_PROTOCOL_VERSION)
}

// ─────────────────────────────────────────────────────────────────────────────
// tools/call
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<TextContent>,
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// roots/list (server -> client)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ListRootsResult {
    pub roots: Vec<Root>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_request_and_notification() {
        let req = Incoming::parse(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#).unwrap();
        assert_eq!(
            req,
            Incoming::Request {
                id: RequestId::Integer(1),
                method: "ping".to_string(),
                params: None,
            }
        );

        let note =
            Incoming::parse(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert_eq!(
            note,
            Incoming::Notification {
                method: "notifications/initialized".to_string()
            }
        );
    }

    #[test]
    fn parses_responses_with_string_ids() {
        let ok = Incoming::parse(r#"{"jsonrpc":"2.0","id":"pr-agent-1","result":{"roots":[]}}"#)
            .unwrap();
        assert_eq!(
            ok,
            Incoming::Response {
                id: RequestId::String("pr-agent-1".to_string()),
                result: Ok(json!({ "roots": [] })),
            }
        );

        let err = Incoming::parse(
            r#"{"jsonrpc":"2.0","id":"pr-agent-2","error":{"code":-32601,"message":"nope"}}"#,
        )
        .unwrap();
        assert!(matches!(err, Incoming::Response { result: Err(_), .. }));
    }

    #[test]
    fn rejects_bad_lines() {
        let parse = Incoming::parse("{not json").unwrap_err();
        assert_eq!(parse.code(), PARSE_ERROR);

        let no_version = Incoming::parse(r#"{"id":1,"method":"ping"}"#).unwrap_err();
        assert_eq!(no_version.code(), INVALID_REQUEST);

        let empty = Incoming::parse(r#"{"jsonrpc":"2.0"}"#).unwrap_err();
        assert_eq!(empty.code(), INVALID_REQUEST);
    }

    #[test]
    fn batch_is_an_invalid_request_not_a_parse_error() {
        let batch = Incoming::parse(r#"[{"jsonrpc":"2.0","id":1,"method":"ping"}]"#).unwrap_err();
        assert_eq!(batch.code(), INVALID_REQUEST);

        let empty_batch = Incoming::parse("[]").unwrap_err();
        assert_eq!(empty_batch.code(), INVALID_REQUEST);

        let scalar = Incoming::parse("42").unwrap_err();
        assert_eq!(scalar.code(), INVALID_REQUEST);
    }

    #[test]
    fn version_negotiation() {
        assert_eq!(negotiate_version("2024-11-05"), "2024-11-05");
        assert_eq!(negotiate_version("1999-01-01"), LATEST_PROTOCOL_VERSION);
    }

    #[test]
    fn error_reply_serializes_null_id() {
        let reply = JsonRpcError {
            jsonrpc: JSONRPC_VERSION,
            id: None,
            error: JsonRpcErrorObject::new(PARSE_ERROR, "Parse error"),
        };
        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            json!({ "jsonrpc": "2.0", "id": null, "error": { "code": -32700, "message": "Parse error" } })
        );
    }

    #[test]
    fn call_tool_result_shape() {
        assert_eq!(
            serde_json::to_value(CallToolResult::error("boom")).unwrap(),
            json!({ "content": [{ "type": "text", "text": "boom" }], "isError": true })
        );
    }
}
