//! WHOIS client (secondary lookup protocol).
//!
//! Classic port-43 text protocol: ask `whois.iana.org` for the TLD, follow
//! the `refer:` line to the registry server when present, and classify the
//! raw text into an availability flag where the wording is unambiguous.
//! Anything ambiguous is left as `None` with the raw text passed through so
//! the resolver can apply its own heuristic.

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::WhoisError;

pub const IANA_WHOIS_HOST: &str = "whois.iana.org";

const WHOIS_PORT: u16 = 43;

/// Response phrases that mean the registry has no record for the domain.
const AVAILABLE_MARKERS: &[&str] = &[
    "no match",
    "not found",
    "no entries found",
    "no data found",
    "no object found",
    "status: free",
    "available for registration",
];

/// Fields that only appear in a real registration record.
const REGISTERED_MARKERS: &[&str] = &["domain name:", "registrar:", "creation date:", "created:"];

/// Secondary lookup capability.
#[async_trait]
pub trait WhoisProvider: Send + Sync {
    async fn query(&self, domain: &str) -> Result<WhoisRecord, WhoisError>;
}

/// What a WHOIS query yields. Neither field is guaranteed meaningful: the
/// flag is only set when the response wording is unambiguous, and the raw
/// text may be empty.
#[derive(Debug, Clone, Default)]
pub struct WhoisRecord {
    pub is_available: Option<bool>,
    pub raw_text: String,
}

/// `WhoisProvider` over plain TCP with IANA referral chasing.
pub struct TcpWhoisClient {
    iana_host: String,
}

impl TcpWhoisClient {
    pub fn new() -> Self {
        Self {
            iana_host: IANA_WHOIS_HOST.to_string(),
        }
    }

    /// Point the referral lookup at a different root server (tests).
    pub fn with_iana_host(iana_host: impl Into<String>) -> Self {
        Self {
            iana_host: iana_host.into(),
        }
    }
}

impl Default for TcpWhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WhoisProvider for TcpWhoisClient {
    async fn query(&self, domain: &str) -> Result<WhoisRecord, WhoisError> {
        let iana_text = raw_query(&self.iana_host, domain).await?;

        let raw_text = match parse_referral(&iana_text) {
            Some(server) => {
                debug!(%domain, %server, "following WHOIS referral");
                raw_query(&server, domain).await?
            }
            None => {
                debug!(%domain, "no WHOIS referral, using IANA response");
                iana_text
            }
        };

        if raw_text.trim().is_empty() {
            return Err(WhoisError::EmptyResponse(domain.to_string()));
        }

        Ok(WhoisRecord {
            is_available: classify(&raw_text),
            raw_text,
        })
    }
}

/// One query/response exchange with a WHOIS server.
async fn raw_query(server: &str, domain: &str) -> Result<String, WhoisError> {
    let mut stream = TcpStream::connect((server, WHOIS_PORT)).await?;
    stream.write_all(format!("{domain}\r\n").as_bytes()).await?;
    stream.shutdown().await?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Extract the registry server from an IANA `refer:` line, if any.
fn parse_referral(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("refer:")?;
        let server = rest.trim();
        (!server.is_empty()).then(|| server.to_string())
    })
}

/// Derive the availability flag from well-known response wording. Returns
/// `None` when the text matches neither family of markers.
fn classify(raw_text: &str) -> Option<bool> {
    let lower = raw_text.to_lowercase();
    if AVAILABLE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(true);
    }
    if REGISTERED_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(false);
    }
    None
}
