//! Tool handlers bridging MCP arguments to the lookup core.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::lookup::{BatchDispatcher, LookupStatus, Resolver};

use super::protocol::ToolCallResult;

#[derive(Debug, Deserialize)]
struct SingleDomainLookup {
    domain: String,
}

#[derive(Debug, Deserialize)]
struct MultipleDomainsLookup {
    domains: Vec<String>,
}

/// Tool handlers holding the shared dispatcher.
pub struct ToolHandlers {
    dispatcher: BatchDispatcher,
}

impl ToolHandlers {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            dispatcher: BatchDispatcher::new(resolver),
        }
    }

    /// Handle a tool call by name. Lookup outcomes always come back as text
    /// content; only unknown tools and undecodable arguments are errors.
    pub async fn handle(&self, name: &str, args: Value) -> ToolCallResult {
        match self.dispatch(name, args).await {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<String> {
        match name {
            "lookup_domain" => self.lookup_domain(args).await,
            "lookup_domains" => self.lookup_domains(args).await,
            _ => Err(anyhow!("Unknown tool: {}", name)),
        }
    }

    async fn lookup_domain(&self, args: Value) -> Result<String> {
        let args: SingleDomainLookup =
            serde_json::from_value(args).map_err(|e| anyhow!("invalid arguments: {}", e))?;
        info!(domain = %args.domain, "single lookup request");

        let status = self.dispatcher.resolver().resolve(&args.domain).await;

        let mut results = HashMap::new();
        results.insert(args.domain.clone(), status);
        Ok(render_results(&results, || {
            format!("Error formatting result for {}", args.domain)
        }))
    }

    async fn lookup_domains(&self, args: Value) -> Result<String> {
        let args: MultipleDomainsLookup =
            serde_json::from_value(args).map_err(|e| anyhow!("invalid arguments: {}", e))?;
        info!(count = args.domains.len(), "batch lookup request");

        let results = self.dispatcher.resolve_all(args.domains).await;
        Ok(render_results(&results, || {
            "Error formatting results for multiple domains".to_string()
        }))
    }
}

/// Serialize the result map to compact JSON. A serialization failure
/// degrades to a human-readable message since the boundary expects text
/// content either way.
fn render_results(
    results: &HashMap<String, LookupStatus>,
    fallback: impl FnOnce() -> String,
) -> String {
    match serde_json::to_string(results) {
        Ok(json) => {
            info!(%json, "lookup response");
            json
        }
        Err(e) => {
            error!(error = %e, "failed to serialize lookup results");
            fallback()
        }
    }
}
