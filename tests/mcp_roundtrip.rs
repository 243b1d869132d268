//! End-to-end tests of the MCP surface over scripted lookup clients.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use domain_lookup_mcp::error::{RdapError, WhoisError};
use domain_lookup_mcp::lookup::{
    RdapClient, RdapResponse, Resolver, WhoisProvider, WhoisRecord,
};
use domain_lookup_mcp::mcp::{McpServer, ToolHandlers};

struct ScriptedRdap {
    responses: HashMap<String, RdapResponse>,
}

#[async_trait]
impl RdapClient for ScriptedRdap {
    async fn lookup(&self, domain: &str) -> Result<RdapResponse, RdapError> {
        match self.responses.get(domain) {
            Some(response) => Ok(response.clone()),
            None => Err(RdapError::Status {
                domain: domain.to_string(),
                status: 500,
            }),
        }
    }
}

struct ScriptedWhois {
    responses: HashMap<String, WhoisRecord>,
}

#[async_trait]
impl WhoisProvider for ScriptedWhois {
    async fn query(&self, domain: &str) -> Result<WhoisRecord, WhoisError> {
        match self.responses.get(domain) {
            Some(record) => Ok(record.clone()),
            None => Err(WhoisError::EmptyResponse(domain.to_string())),
        }
    }
}

/// RDAP knows example.com; WHOIS knows foo.test (available) and google.com
/// (taken); everything else fails in both clients.
fn scripted_resolver() -> Resolver {
    let rdap = ScriptedRdap {
        responses: HashMap::from([("example.com".to_string(), RdapResponse::domain_object())]),
    };
    let whois = ScriptedWhois {
        responses: HashMap::from([
            (
                "foo.test".to_string(),
                WhoisRecord {
                    is_available: Some(true),
                    raw_text: String::new(),
                },
            ),
            (
                "google.com".to_string(),
                WhoisRecord {
                    is_available: Some(false),
                    raw_text: "Domain Name: google.com".into(),
                },
            ),
        ]),
    };
    Resolver::new(Arc::new(rdap), Arc::new(whois))
}

fn handlers() -> ToolHandlers {
    ToolHandlers::new(scripted_resolver())
}

fn text_of(result: &domain_lookup_mcp::mcp::protocol::ToolCallResult) -> &str {
    &result.content[0].text
}

#[tokio::test]
async fn single_lookup_returns_exact_json() {
    let h = handlers();
    let result = h
        .handle("lookup_domain", json!({"domain": "example.com"}))
        .await;

    assert_eq!(result.is_error, None);
    assert_eq!(result.content[0].content_type, "text");
    assert_eq!(text_of(&result), r#"{"example.com":"registered"}"#);
}

#[tokio::test]
async fn single_lookup_falls_back_to_whois() {
    let h = handlers();

    let result = h.handle("lookup_domain", json!({"domain": "foo.test"})).await;
    assert_eq!(text_of(&result), r#"{"foo.test":"available"}"#);

    let result = h
        .handle("lookup_domain", json!({"domain": "google.com"}))
        .await;
    assert_eq!(text_of(&result), r#"{"google.com":"registered"}"#);
}

#[tokio::test]
async fn single_lookup_unknown_when_both_clients_fail() {
    let h = handlers();
    let result = h.handle("lookup_domain", json!({"domain": "bar.test"})).await;
    assert_eq!(text_of(&result), r#"{"bar.test":"unknown"}"#);
}

#[tokio::test]
async fn batch_lookup_resolves_every_domain() {
    let h = handlers();
    let result = h
        .handle(
            "lookup_domains",
            json!({"domains": ["example.com", "foo.test", "google.com"]}),
        )
        .await;

    assert_eq!(result.is_error, None);
    let parsed: HashMap<String, String> = serde_json::from_str(text_of(&result)).unwrap();
    let expected = HashMap::from([
        ("example.com".to_string(), "registered".to_string()),
        ("foo.test".to_string(), "available".to_string()),
        ("google.com".to_string(), "registered".to_string()),
    ]);
    assert_eq!(parsed, expected);
}

#[tokio::test]
async fn empty_batch_returns_literal_empty_object() {
    let h = handlers();
    let result = h.handle("lookup_domains", json!({"domains": []})).await;
    assert_eq!(text_of(&result), "{}");
}

#[tokio::test]
async fn unknown_tool_is_an_error_result() {
    let h = handlers();
    let result = h.handle("lookup_nothing", json!({})).await;
    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("Unknown tool"));
}

#[tokio::test]
async fn missing_required_argument_is_an_error_result() {
    let h = handlers();
    let result = h.handle("lookup_domain", json!({})).await;
    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("invalid arguments"));
}

// JSON-RPC layer

fn server() -> McpServer {
    McpServer::new(scripted_resolver())
}

async fn roundtrip(server: &McpServer, msg: &str) -> Value {
    serde_json::to_value(server.handle(msg).await).unwrap()
}

#[tokio::test]
async fn initialize_reports_tools_capability() {
    let s = server();
    let resp = roundtrip(
        &s,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
    )
    .await;

    assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(resp["result"]["serverInfo"]["name"], "domain-lookup-mcp");
    assert_eq!(resp["result"]["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn tools_list_names_both_lookup_tools() {
    let s = server();
    let resp = roundtrip(&s, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;

    let tools = resp["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["lookup_domain", "lookup_domains"]);
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
}

#[tokio::test]
async fn tools_call_carries_the_lookup_text() {
    let s = server();
    let resp = roundtrip(
        &s,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"lookup_domain","arguments":{"domain":"example.com"}}}"#,
    )
    .await;

    assert_eq!(
        resp["result"]["content"][0]["text"],
        r#"{"example.com":"registered"}"#
    );
}

#[tokio::test]
async fn malformed_message_is_a_parse_error() {
    let s = server();
    let resp = roundtrip(&s, "this is not json").await;
    assert_eq!(resp["error"]["code"], -32700);
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let s = server();
    let resp = roundtrip(&s, r#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#).await;
    assert_eq!(resp["error"]["code"], -32601);
}

#[tokio::test]
async fn bad_tool_call_params_are_invalid_params() {
    let s = server();
    let resp = roundtrip(
        &s,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"arguments":{}}}"#,
    )
    .await;
    assert_eq!(resp["error"]["code"], -32602);
}
