//! Domain registration lookup over RDAP with WHOIS fallback, served through
//! the Model Context Protocol.
//!
//! The lookup core ([`lookup`]) answers "is this domain registered?" with a
//! tri-state verdict and fans batches out over a bounded worker pool; the
//! [`mcp`] module wraps it in a JSON-RPC-over-stdio tool server.

pub mod error;
pub mod lookup;
pub mod mcp;

pub use lookup::{BatchDispatcher, LookupStatus, Resolver};
