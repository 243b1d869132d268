//! RDAP client (primary lookup protocol).
//!
//! Queries the rdap.org bootstrap service, which redirects to the registry's
//! RDAP endpoint for the TLD. A response carrying `objectClassName: "domain"`
//! is the registration signal; everything else is inconclusive and the caller
//! falls back to WHOIS.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::error::RdapError;

/// Default bootstrap endpoint. Override with `RDAP_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://rdap.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RDAP_MEDIA_TYPE: &str = "application/rdap+json";

/// Primary lookup capability. Implementations return the decoded RDAP body
/// or an error; they never interpret the result.
#[async_trait]
pub trait RdapClient: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<RdapResponse, RdapError>;
}

/// Decoded RDAP response. Only the fields the resolver looks at are kept;
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdapResponse {
    #[serde(default)]
    pub object_class_name: Option<String>,
    #[serde(default)]
    pub ldh_name: Option<String>,
    #[serde(default)]
    pub status: Vec<String>,
}

impl RdapResponse {
    /// Whether the body is recognizable as a domain-registration object.
    pub fn is_domain(&self) -> bool {
        self.object_class_name.as_deref() == Some("domain")
    }

    /// A minimal registration object, handy for test doubles.
    pub fn domain_object() -> Self {
        Self {
            object_class_name: Some("domain".into()),
            ..Self::default()
        }
    }
}

/// `RdapClient` backed by reqwest against the bootstrap redirector.
pub struct HttpRdapClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRdapClient {
    pub fn new() -> Result<Self, RdapError> {
        let base_url =
            std::env::var("RDAP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("domain-lookup-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RdapClient for HttpRdapClient {
    async fn lookup(&self, domain: &str) -> Result<RdapResponse, RdapError> {
        let url = format!("{}/domain/{}", self.base_url, domain);
        debug!(%domain, %url, "RDAP request");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, RDAP_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RdapError::Status {
                domain: domain.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let decoded: RdapResponse = serde_json::from_str(&body)?;
        debug!(
            %domain,
            object_class = decoded.object_class_name.as_deref().unwrap_or("<none>"),
            "RDAP response decoded"
        );
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_object_is_recognized() {
        assert!(RdapResponse::domain_object().is_domain());
    }

    #[test]
    fn other_object_classes_are_not_domains() {
        let entity = RdapResponse {
            object_class_name: Some("entity".into()),
            ..RdapResponse::default()
        };
        assert!(!entity.is_domain());
        assert!(!RdapResponse::default().is_domain());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let decoded: RdapResponse = serde_json::from_str(
            r#"{"objectClassName":"domain","ldhName":"example.com","handle":"X","links":[]}"#,
        )
        .unwrap();
        assert!(decoded.is_domain());
        assert_eq!(decoded.ldh_name.as_deref(), Some("example.com"));
    }
}
