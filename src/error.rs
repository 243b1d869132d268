//! Error types for the lookup clients.
//!
//! Client errors never reach the tool-call boundary: the resolver converts a
//! primary failure into a WHOIS fallback and a secondary failure into
//! `LookupStatus::Unknown`.

use thiserror::Error;

/// Errors from the RDAP (primary) client.
#[derive(Error, Debug)]
pub enum RdapError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RDAP query for {domain} returned HTTP {status}")]
    Status { domain: String, status: u16 },

    #[error("malformed RDAP body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Errors from the WHOIS (secondary) client.
#[derive(Error, Debug)]
pub enum WhoisError {
    #[error("WHOIS I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("empty WHOIS response from {0}")]
    EmptyResponse(String),
}
