//! Domain lookup MCP server binary.
//!
//! ## Usage
//!
//! ```bash
//! ./target/debug/domain_mcp
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG` (optional): tracing filter, defaults to `info`
//! - `RDAP_BASE_URL` (optional): overrides the RDAP bootstrap endpoint

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use domain_lookup_mcp::lookup::{HttpRdapClient, Resolver, TcpWhoisClient};
use domain_lookup_mcp::mcp::McpServer;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is the protocol stream, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("starting MCP server over stdio");

    let rdap = Arc::new(HttpRdapClient::new()?);
    let whois = Arc::new(TcpWhoisClient::new());
    info!("shared RDAP and WHOIS clients created");

    let resolver = Resolver::new(rdap, whois);
    McpServer::new(resolver).run().await
}
