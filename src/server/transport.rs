//! Newline-delimited JSON-RPC over a byte stream pair.
//!
//! One JSON message per line in each direction. While waiting for the
//! answer to a request of its own, the transport parks unrelated lines in a
//! backlog that [`Transport::next_line`] drains first, so nothing the host
//! sends in the meantime is lost or reordered.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use super::protocol::{Incoming, JSONRPC_VERSION, JsonRpcRequest, ListRootsResult, RequestId};
use crate::workspace::{Root, RootsError, RootsProvider};

pub struct Transport<R, W> {
    lines: Lines<R>,
    writer: W,
    backlog: VecDeque<String>,
    next_request_id: u64,
}

impl<R, W> Transport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: reader.lines(),
            writer,
            backlog: VecDeque::new(),
            next_request_id: 1,
        }
    }

    /// Next incoming line, backlog first. `None` at end of input.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        if let Some(line) = self.backlog.pop_front() {
            return Ok(Some(line));
        }
        self.lines.next_line().await
    }

    /// Write one message followed by a newline and flush.
    pub async fn send<T: Serialize>(&mut self, message: &T) -> std::io::Result<()> {
        let mut bytes = serde_json::to_vec(message)?;
        bytes.push(b'\n');
        self.writer.write_all(&bytes).await?;
        self.writer.flush().await
    }

    /// Send a request to the host and wait up to `timeout` for its answer.
    pub async fn request(
        &mut self,
        method: &str,
        params: Option<Value>,
        timeout: Duration,
    ) -> Result<Value, RootsError> {
        let id = RequestId::String(format!("pr-agent-{}", self.next_request_id));
        self.next_request_id += 1;

        self.send(&JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: id.clone(),
            method: method.to_string(),
            params,
        })
        .await?;
        tracing::debug!(%id, method, "sent request to host");

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let line = match tokio::time::timeout_at(deadline, self.lines.next_line()).await {
                Err(_) => return Err(RootsError::Timeout(timeout.as_millis() as u64)),
                Ok(Ok(Some(line))) => line,
                Ok(Ok(None)) => return Err(RootsError::Closed),
                Ok(Err(e)) => return Err(e.into()),
            };

            match Incoming::parse(&line) {
                Ok(Incoming::Response { id: reply_id, result }) if reply_id == id => {
                    return result.map_err(|e| RootsError::Host(e.message));
                }
                _ => self.backlog.push_back(line),
            }
        }
    }
}

/// [`RootsProvider`] that asks the connected host via `roots/list`.
pub struct HostRoots<'a, R, W> {
    transport: &'a mut Transport<R, W>,
    timeout: Duration,
}

impl<'a, R, W> HostRoots<'a, R, W> {
    pub fn new(transport: &'a mut Transport<R, W>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }
}

#[async_trait]
impl<'a, R, W> RootsProvider for HostRoots<'a, R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn list_roots(&mut self) -> Result<Vec<Root>, RootsError> {
        let value = self
            .transport
            .request("roots/list", None, self.timeout)
            .await?;
        let result: ListRootsResult =
            serde_json::from_value(value).map_err(|e| RootsError::Malformed(e.to_string()))?;
        Ok(result.roots)
    }
}
