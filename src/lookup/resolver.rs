//! Resolution Engine.
//!
//! Reconciles the two lookup protocols into one tri-state verdict:
//!
//! 1. RDAP first. A response recognizable as a domain object means
//!    Registered and WHOIS is never consulted.
//! 2. Any RDAP failure, or a success with an unexpected shape, falls through
//!    to WHOIS under a bounded timeout.
//! 3. WHOIS availability flag true → Available, false → Registered. No flag
//!    but non-empty raw text → Registered (an existing record is the usual
//!    reason descriptive text comes back at all). Otherwise Unknown.
//!
//! No retries at this layer; one failed attempt per client is final for the
//! resolution attempt.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use super::rdap::RdapClient;
use super::whois::WhoisProvider;
use super::LookupStatus;

/// Upper bound on a single WHOIS query. Expiry drops the in-flight call.
pub const WHOIS_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared, read-only handles to the two clients. Cloned freely across batch
/// workers; no per-resolution state.
#[derive(Clone)]
pub struct Resolver {
    rdap: Arc<dyn RdapClient>,
    whois: Arc<dyn WhoisProvider>,
    whois_timeout: Duration,
}

impl Resolver {
    pub fn new(rdap: Arc<dyn RdapClient>, whois: Arc<dyn WhoisProvider>) -> Self {
        Self {
            rdap,
            whois,
            whois_timeout: WHOIS_TIMEOUT,
        }
    }

    pub fn with_whois_timeout(mut self, whois_timeout: Duration) -> Self {
        self.whois_timeout = whois_timeout;
        self
    }

    /// Resolve one domain. Never fails: every error path degrades to a
    /// status, so a batch sibling can never be aborted from here.
    pub async fn resolve(&self, domain: &str) -> LookupStatus {
        debug!(%domain, "RDAP lookup");

        match self.rdap.lookup(domain).await {
            Ok(response) if response.is_domain() => {
                debug!(%domain, "RDAP returned a domain object");
                return LookupStatus::Registered;
            }
            Ok(_) => {
                warn!(%domain, "RDAP succeeded but response was not a domain object");
            }
            Err(e) => {
                warn!(%domain, error = %e, "RDAP lookup failed");
            }
        }

        debug!(%domain, "RDAP inconclusive, falling back to WHOIS");
        let status = self.resolve_with_whois(domain).await;
        debug!(%domain, %status, "final lookup result");
        status
    }

    async fn resolve_with_whois(&self, domain: &str) -> LookupStatus {
        let record = match timeout(self.whois_timeout, self.whois.query(domain)).await {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                warn!(%domain, error = %e, "WHOIS lookup failed");
                return LookupStatus::Unknown;
            }
            Err(_) => {
                warn!(%domain, timeout = ?self.whois_timeout, "WHOIS lookup timed out");
                return LookupStatus::Unknown;
            }
        };

        match record.is_available {
            Some(true) => LookupStatus::Available,
            Some(false) => LookupStatus::Registered,
            None if !record.raw_text.is_empty() => {
                debug!(%domain, "WHOIS raw text present but availability unclear, inferring registered");
                LookupStatus::Registered
            }
            None => LookupStatus::Unknown,
        }
    }
}
