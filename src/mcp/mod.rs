//! MCP (Model Context Protocol) server module.
//!
//! Exposes the domain lookup core as two tools over JSON-RPC on stdio:
//!
//! - `lookup_domain`  — one domain, returns `{"<domain>":"<status>"}`
//! - `lookup_domains` — a batch, returns `{"<domain>":"<status>", ...}`
//!
//! Status is always one of `registered`, `available`, `unknown`.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use handlers::ToolHandlers;
pub use server::McpServer;
