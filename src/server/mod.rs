//! Model Context Protocol server over stdio.
//!
//! Reads newline-delimited JSON-RPC messages, answers `initialize`,
//! `ping`, `tools/list` and `tools/call`, and handles one message at a
//! time. A tool call may send `roots/list` back to the host before it
//! answers; see [`transport`].

pub mod protocol;
pub mod tools;
pub mod transport;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::constants::{APP_NAME, VERSION};
use protocol::{
    CallToolParams, INTERNAL_ERROR, INVALID_PARAMS, Implementation, Incoming, InitializeParams,
    InitializeResult, JSONRPC_VERSION, JsonRpcError, JsonRpcErrorObject, JsonRpcResponse,
    METHOD_NOT_FOUND, RequestId, ServerCapabilities, ToolsCapability, negotiate_version,
};
use tools::Toolbox;
use transport::{HostRoots, Transport};

const INSTRUCTIONS: &str = "Call analyze_file_changes to see what changed on the current branch, \
    decide what kind of change it is, then call suggest_template with your summary and change type.";

pub struct McpServer {
    toolbox: Toolbox,
    roots_timeout: Duration,
    client_roots: bool,
}

impl McpServer {
    pub fn new(toolbox: Toolbox, roots_timeout: Duration) -> Self {
        Self {
            toolbox,
            roots_timeout,
            client_roots: false,
        }
    }

    /// Serve stdin/stdout until the host closes stdin.
    pub async fn run_stdio(&mut self) -> std::io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }

    /// Serve one connection until end of input.
    pub async fn serve<R, W>(&mut self, reader: R, writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        tracing::info!("{APP_NAME} {VERSION} serving MCP on stdio");
        let mut transport = Transport::new(reader, writer);

        while let Some(line) = transport.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            self.handle_line(&mut transport, &line).await?;
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    async fn handle_line<R, W>(
        &mut self,
        transport: &mut Transport<R, W>,
        line: &str,
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let message = match Incoming::parse(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("rejecting message: {e}");
                return transport
                    .send(&error_reply(None, JsonRpcErrorObject::new(e.code(), e.to_string())))
                    .await;
            }
        };

        match message {
            Incoming::Request { id, method, params } => {
                tracing::debug!(%id, method, "request");
                let reply = self.handle_request(transport, &method, params).await;
                match reply {
                    Ok(result) => {
                        transport
                            .send(&JsonRpcResponse {
                                jsonrpc: JSONRPC_VERSION,
                                id,
                                result,
                            })
                            .await
                    }
                    Err(error) => transport.send(&error_reply(Some(id), error)).await,
                }
            }
            Incoming::Notification { method } => {
                self.handle_notification(&method);
                Ok(())
            }
            Incoming::Response { id, .. } => {
                tracing::warn!(%id, "ignoring response to a request that is no longer pending");
                Ok(())
            }
        }
    }

    async fn handle_request<R, W>(
        &mut self,
        transport: &mut Transport<R, W>,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, JsonRpcErrorObject>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        match method {
            "initialize" => {
                let params: InitializeParams = parse_params(params)?;
                to_result(self.initialize(params))
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": Toolbox::definitions() })),
            "tools/call" => {
                let params: CallToolParams = parse_params(params)?;
                let result = if self.client_roots {
                    let mut roots = HostRoots::new(transport, self.roots_timeout);
                    self.toolbox
                        .call(&params.name, params.arguments, Some(&mut roots))
                        .await
                } else {
                    self.toolbox.call(&params.name, params.arguments, None).await
                };
                match result {
                    Ok(result) => to_result(result),
                    Err(e) => Err(JsonRpcErrorObject::new(INVALID_PARAMS, e.to_string())),
                }
            }
            other => Err(JsonRpcErrorObject::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        }
    }

    fn initialize(&mut self, params: InitializeParams) -> InitializeResult {
        self.client_roots = params.capabilities.roots.is_some();
        if let Some(client) = &params.client_info {
            tracing::info!(
                client = %client.name,
                version = %client.version,
                roots = self.client_roots,
                "client connected"
            );
        }

        InitializeResult {
            protocol_version: negotiate_version(&params.protocol_version).to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: Implementation {
                name: APP_NAME.to_string(),
                version: VERSION.to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" => tracing::debug!("client finished initialization"),
            "notifications/cancelled" => {
                tracing::debug!("ignoring cancellation; calls are answered in order")
            }
            "notifications/roots/list_changed" => {
                tracing::debug!("roots changed; they are fetched per call")
            }
            other => tracing::debug!("ignoring notification {other}"),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcErrorObject> {
    serde_json::from_value(params.unwrap_or_else(|| json!({})))
        .map_err(|e| JsonRpcErrorObject::new(INVALID_PARAMS, format!("Invalid params: {e}")))
}

fn to_result<T: serde::Serialize>(value: T) -> Result<Value, JsonRpcErrorObject> {
    serde_json::to_value(value).map_err(|e| JsonRpcErrorObject::new(INTERNAL_ERROR, e.to_string()))
}

fn error_reply(id: Option<RequestId>, error: JsonRpcErrorObject) -> JsonRpcError {
    JsonRpcError {
        jsonrpc: JSONRPC_VERSION,
        id,
        error,
    }
}
