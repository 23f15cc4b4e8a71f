/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for capital-adapter tests

#![allow(dead_code)]

use capital_adapter::{CapitalClient, ClientConfig, SessionTokens};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client whose live and demo roots both point at the mock server
pub fn client_for(server: &MockServer) -> CapitalClient {
    CapitalClient::with_config_and_base_urls(ClientConfig::default(), &server.uri(), &server.uri())
        .expect("client init")
}

pub fn test_tokens() -> SessionTokens {
    SessionTokens::new("cst-initial", "sec-initial")
}

/// GET /session reports `account_id` as active for requests carrying `cst`
pub async fn mount_active_account(server: &MockServer, cst: &str, account_id: &str) {
    Mock::given(method("GET"))
        .and(path("/session"))
        .and(header("CST", cst))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clientId": "CLIENT-1",
            "accountId": account_id,
            "timezoneOffset": 0,
            "locale": "en",
            "currency": "USD",
            "symbol": "$",
            "streamEndpoint": "wss://api-streaming-capital.backend-capital.com/"
        })))
        .mount(server)
        .await;
}

pub fn deal_reference_body(reference: &str) -> serde_json::Value {
    json!({ "dealReference": reference })
}

pub fn confirmation_body(
    reference: &str,
    deal_status: &str,
    affected_deal_ids: &[&str],
) -> serde_json::Value {
    let affected: Vec<_> = affected_deal_ids
        .iter()
        .map(|id| json!({ "dealId": id, "status": "OPENED" }))
        .collect();
    json!({
        "status": if deal_status == "ACCEPTED" { "OPEN" } else { deal_status },
        "dealStatus": deal_status,
        "dealReference": reference,
        "affectedDeals": affected,
    })
}
