/*
[INPUT]:  HTTP configuration (base URLs, optional timeouts), per-call auth headers
[OUTPUT]: Configured reqwest client and classified API responses
[POS]:    HTTP layer - core client implementation and transport helper
[UPDATE]: When adding connection options or changing request/response handling
*/

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::SessionTokens;
use crate::http::{CapitalError, Result};
use crate::types::Environment;

/// Base URLs for Capital.com API
pub const LIVE_BASE_URL: &str = "https://api-capital.backend-capital.com/api/v1";
pub const DEMO_BASE_URL: &str = "https://demo-api-capital.backend-capital.com/api/v1";

pub const CST_HEADER: &str = "cst";
pub const SECURITY_TOKEN_HEADER: &str = "x-security-token";
pub const API_KEY_HEADER: &str = "x-cap-api-key";

/// HTTP client configuration
///
/// Timeouts left as `None` keep reqwest's own defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub live_base_url: String,
    pub demo_base_url: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            live_base_url: LIVE_BASE_URL.to_string(),
            demo_base_url: DEMO_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

/// Header values attached to a single request
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AuthHeaders<'a> {
    pub cst: Option<&'a str>,
    pub security_token: Option<&'a str>,
    pub api_key: Option<&'a str>,
}

impl<'a> AuthHeaders<'a> {
    pub fn api_key(api_key: &'a str) -> Self {
        Self {
            api_key: Some(api_key),
            ..Self::default()
        }
    }

    pub fn session(tokens: &'a SessionTokens) -> Self {
        Self {
            cst: Some(tokens.cst.as_str()),
            security_token: Some(tokens.security_token.as_str()),
            api_key: None,
        }
    }
}

/// Successful (status < 400) response
#[derive(Debug)]
pub(crate) struct ApiResponse {
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Header value, `None` when absent, empty, or not valid text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
    }
}

/// Main HTTP client for Capital.com API
///
/// Holds only immutable configuration; session tokens are passed per call.
#[derive(Debug, Clone)]
pub struct CapitalClient {
    http_client: Client,
    live_base_url: String,
    demo_base_url: String,
}

impl CapitalClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http_client = builder.build()?;

        let live_base_url = normalize_base_url(&config.live_base_url)?;
        let demo_base_url = normalize_base_url(&config.demo_base_url)?;

        Ok(Self {
            http_client,
            live_base_url,
            demo_base_url,
        })
    }

    /// Create a client that talks to explicit roots, e.g. a mock server
    pub fn with_config_and_base_urls(
        config: ClientConfig,
        live_base_url: &str,
        demo_base_url: &str,
    ) -> Result<Self> {
        Self::with_config(ClientConfig {
            live_base_url: live_base_url.to_string(),
            demo_base_url: demo_base_url.to_string(),
            ..config
        })
    }

    pub fn base_url(&self, environment: Environment) -> &str {
        match environment {
            Environment::Live => &self.live_base_url,
            Environment::Demo => &self.demo_base_url,
        }
    }

    /// Build full URL; the endpoint is appended so the root's path prefix survives
    fn url(&self, environment: Environment, endpoint: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url(environment), endpoint))?)
    }

    /// Send one request and classify the response.
    ///
    /// Status >= 400 becomes [`CapitalError::Api`] with the raw body text.
    pub(crate) async fn execute<P>(
        &self,
        method: Method,
        environment: Environment,
        endpoint: &str,
        payload: Option<&P>,
        auth: AuthHeaders<'_>,
    ) -> Result<ApiResponse>
    where
        P: Serialize + ?Sized,
    {
        let url = self.url(environment, endpoint)?;
        let mut builder = self.http_client.request(method.clone(), url);

        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload)?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }
        if let Some(token) = auth.security_token.filter(|t| !t.is_empty()) {
            builder = builder.header(SECURITY_TOKEN_HEADER, token);
        }
        if let Some(cst) = auth.cst.filter(|c| !c.is_empty()) {
            builder = builder.header(CST_HEADER, cst);
        }
        if let Some(api_key) = auth.api_key.filter(|k| !k.is_empty()) {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        debug!(
            %method,
            %environment,
            endpoint,
            status = status.as_u16(),
            "capital api exchange"
        );

        if status.as_u16() >= 400 {
            return Err(CapitalError::api_error(
                status,
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        Ok(ApiResponse { headers, body })
    }

    pub(crate) async fn get(
        &self,
        environment: Environment,
        endpoint: &str,
        tokens: &SessionTokens,
    ) -> Result<ApiResponse> {
        self.execute::<()>(
            Method::GET,
            environment,
            endpoint,
            None,
            AuthHeaders::session(tokens),
        )
        .await
    }

    pub(crate) async fn delete(
        &self,
        environment: Environment,
        endpoint: &str,
        tokens: &SessionTokens,
    ) -> Result<ApiResponse> {
        self.execute::<()>(
            Method::DELETE,
            environment,
            endpoint,
            None,
            AuthHeaders::session(tokens),
        )
        .await
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim_end_matches('/');
    Url::parse(trimmed)?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, OpenPositionRequest};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer) -> CapitalClient {
        let live = format!("{}/live/api/v1", server.uri());
        let demo = format!("{}/demo/api/v1/", server.uri());
        CapitalClient::with_config_and_base_urls(ClientConfig::default(), &live, &demo)
            .expect("client init")
    }

    #[test]
    fn test_default_config_uses_platform_roots() {
        let config = ClientConfig::default();
        assert_eq!(config.live_base_url, LIVE_BASE_URL);
        assert_eq!(config.demo_base_url, DEMO_BASE_URL);
        assert!(config.timeout.is_none());
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = CapitalClient::with_config_and_base_urls(
            ClientConfig::default(),
            "not a url",
            DEMO_BASE_URL,
        );
        assert!(matches!(result, Err(CapitalError::UrlParse(_))));
    }

    #[tokio::test]
    async fn test_environment_selects_root_and_keeps_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/demo/api/v1/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/live/api/v1/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tokens = SessionTokens::new("cst", "sec");
        client
            .get(Environment::Demo, "/accounts", &tokens)
            .await
            .expect("demo call");
        client
            .get(Environment::Live, "/accounts", &tokens)
            .await
            .expect("live call");
    }

    #[tokio::test]
    async fn test_payload_sets_content_type_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/live/api/v1/session"))
            .and(header("content-type", "application/json"))
            .and(header("X-CAP-API-KEY", "key-1"))
            .and(body_json(json!({"hello": "world"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client
            .execute(
                Method::POST,
                Environment::Live,
                "/session",
                Some(&json!({"hello": "world"})),
                AuthHeaders::api_key("key-1"),
            )
            .await
            .expect("post");
        assert_eq!(response.body, b"{}");
    }

    #[tokio::test]
    async fn test_float_levels_survive_echo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/live/api/v1/positions"))
            .respond_with(|req: &Request| {
                ResponseTemplate::new(200).set_body_raw(req.body.clone(), "application/json")
            })
            .mount(&server)
            .await;

        let request = OpenPositionRequest::new("BTCUSD", Direction::Sell, 0.123456789)
            .stop_level(Some(67012.34))
            .profit_level(Some(0.000_012_5))
            .guaranteed_stop(true);

        let client = client_for(&server);
        let tokens = SessionTokens::new("cst", "sec");
        let echoed: OpenPositionRequest = client
            .execute(
                Method::POST,
                Environment::Live,
                "/positions",
                Some(&request),
                AuthHeaders::session(&tokens),
            )
            .await
            .expect("echo")
            .json()
            .expect("decode echo");

        assert_eq!(echoed, request);
        assert_eq!(echoed.size, 0.123456789);
        assert_eq!(echoed.stop_level, Some(67012.34));
        assert_eq!(echoed.profit_level, Some(0.000_012_5));
    }

    #[tokio::test]
    async fn test_empty_tokens_are_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live/api/v1/session"))
            .respond_with(|req: &Request| {
                let has_cst = req.headers.contains_key("cst");
                let has_token = req.headers.contains_key("x-security-token");
                let has_type = req.headers.contains_key("content-type");
                ResponseTemplate::new(200).set_body_json(json!({
                    "cst": has_cst,
                    "token": has_token,
                    "contentType": has_type,
                }))
            })
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tokens = SessionTokens::new("", "");
        let response = client
            .get(Environment::Live, "/session", &tokens)
            .await
            .expect("get");
        let seen: serde_json::Value = response.json().expect("decode");
        assert_eq!(seen, json!({"cst": false, "token": false, "contentType": false}));
    }

    #[tokio::test]
    async fn test_session_headers_sent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/live/api/v1/positions/D1"))
            .and(header("CST", "cst-1"))
            .and(header("X-SECURITY-TOKEN", "sec-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"dealReference": "R"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tokens = SessionTokens::new("cst-1", "sec-1");
        let response = client
            .delete(Environment::Live, "/positions/D1", &tokens)
            .await
            .expect("delete");
        assert!(response.header("content-type").is_some());
    }

    #[tokio::test]
    async fn test_error_status_carries_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live/api/v1/positions"))
            .and(header_exists("cst"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("{\"errorCode\":\"error.invalid.details\"}"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get(Environment::Live, "/positions", &SessionTokens::new("c", "s"))
            .await
            .expect_err("400 must fail");

        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "API request failed with status 400: {\"errorCode\":\"error.invalid.details\"}"
        );
        assert_eq!(err.error_code().as_deref(), Some("error.invalid.details"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = CapitalClient::with_config_and_base_urls(
            ClientConfig::default(),
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
        )
        .expect("client init");
        let err = client
            .get(Environment::Live, "/session", &SessionTokens::new("c", "s"))
            .await
            .expect_err("closed server");
        assert!(matches!(err, CapitalError::Http(_)));
        assert!(err.to_string().starts_with("error making API request"));
    }
}
