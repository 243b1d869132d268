//! Domain registration lookup.
//!
//! RDAP is the primary, structured source of truth; WHOIS is the legacy
//! fallback consulted only when RDAP is inconclusive. Every lookup ends in
//! exactly one of three statuses.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod dispatch;
pub mod rdap;
pub mod resolver;
pub mod whois;

pub use dispatch::{BatchDispatcher, DEFAULT_WORKER_CAP};
pub use rdap::{HttpRdapClient, RdapClient, RdapResponse};
pub use resolver::Resolver;
pub use whois::{TcpWhoisClient, WhoisProvider, WhoisRecord};

/// Tri-state verdict for a domain. Serializes to the stable lowercase wire
/// tokens consumers parse on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Registered,
    Available,
    Unknown,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::Registered => "registered",
            LookupStatus::Available => "available",
            LookupStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
