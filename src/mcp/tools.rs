//! Tool definitions for the domain lookup server.

use serde_json::json;

use super::protocol::Tool;

/// The two lookup tools this server exposes.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "lookup_domain".into(),
            description: "Looks up a single domain name using RDAP (with WHOIS fallback). \
                          Returns JSON: {\"domain\": \"status\"} \
                          ('registered', 'available', or 'unknown')"
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "domain": {
                        "type": "string",
                        "description": "The domain name to look up (e.g., foo.bar)"
                    }
                },
                "required": ["domain"]
            }),
        },
        Tool {
            name: "lookup_domains".into(),
            description: "Looks up multiple domain names using RDAP (with WHOIS fallback). \
                          Returns JSON: {\"domain1\": \"status1\", ...} \
                          ('registered', 'available', or 'unknown')"
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "domains": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "A list of domain names to look up (e.g., [\"foo.bar\", \"example.com\"])"
                    }
                },
                "required": ["domains"]
            }),
        },
    ]
}
