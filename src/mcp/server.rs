//! MCP server loop.
//!
//! Reads one JSON-RPC message per line from stdin and writes one response
//! per line to stdout. All logging goes to stderr via tracing; stdout
//! carries nothing but the protocol stream.

use std::io::{BufRead, Write};

use serde_json::Value;
use tracing::{debug, info};

use crate::lookup::Resolver;

use super::handlers::ToolHandlers;
use super::protocol::*;
use super::tools::get_tools;

const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    handlers: ToolHandlers,
}

impl McpServer {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            handlers: ToolHandlers::new(resolver),
        }
    }

    /// Serve stdio until EOF.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        info!("server started, waiting for messages");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            debug!(msg = %preview(&line), "<-");

            let response = self.handle(&line).await;
            let out = serde_json::to_string(&response)?;
            debug!(msg = %preview(&out), "->");

            writeln!(stdout, "{}", out)?;
            stdout.flush()?;
        }

        info!("server shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message. Public so alternate transports and
    /// tests can drive the server without stdio.
    pub async fn handle(&self, msg: &str) -> JsonRpcResponse {
        let req: JsonRpcRequest = match serde_json::from_str(msg) {
            Ok(r) => r,
            Err(e) => return JsonRpcResponse::error(None, PARSE_ERROR, e.to_string()),
        };

        let id = req.id.clone();

        match req.method.as_str() {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.into(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: "domain-lookup-mcp".into(),
                        version: env!("CARGO_PKG_VERSION").into(),
                    },
                };
                serialize_result(id, result)
            }

            "notifications/initialized" => JsonRpcResponse::success(id, Value::Null),

            "tools/list" => serialize_result(id, ToolsListResult { tools: get_tools() }),

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
                };

                debug!(tool = %params.name, "calling tool");
                let result = self.handlers.handle(&params.name, params.arguments).await;
                serialize_result(id, result)
            }

            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", req.method),
            ),
        }
    }
}

fn serialize_result(id: Option<Value>, result: impl serde::Serialize) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => {
            JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e))
        }
    }
}

fn preview(msg: &str) -> &str {
    let cut = msg
        .char_indices()
        .nth(100)
        .map(|(i, _)| i)
        .unwrap_or(msg.len());
    &msg[..cut]
}
