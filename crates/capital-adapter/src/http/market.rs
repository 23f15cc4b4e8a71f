/*
[INPUT]:  Target account id, epic, and session tokens
[OUTPUT]: Open positions and market details for the account
[POS]:    HTTP layer - read-only account-scoped queries
[UPDATE]: When adding query endpoints or changing response format
*/

// ### Query Endpoints

use crate::auth::SessionTokens;
use crate::http::trade::POSITIONS_ENDPOINT;
use crate::http::{CapitalClient, Result, ResultExt};
use crate::types::{Environment, MarketDetails, PositionsResponse};

impl CapitalClient {
    /// Open positions of the account
    ///
    /// GET /positions
    pub async fn get_positions(
        &self,
        environment: Environment,
        account_id: &str,
        tokens: &SessionTokens,
    ) -> Result<PositionsResponse> {
        let tokens = self
            .ensure_active_account(environment, account_id, tokens)
            .await
            .context("error getting positions")?;

        self.get(environment, POSITIONS_ENDPOINT, &tokens)
            .await
            .context("error getting positions")?
            .json()
            .context("error parsing positions response")
    }

    /// Instrument metadata and dealing rules for an epic
    ///
    /// GET /markets/{epic}
    pub async fn get_market_details(
        &self,
        environment: Environment,
        account_id: &str,
        epic: &str,
        tokens: &SessionTokens,
    ) -> Result<MarketDetails> {
        let tokens = self
            .ensure_active_account(environment, account_id, tokens)
            .await
            .context("error getting market details")?;

        self.get(environment, &format!("/markets/{epic}"), &tokens)
            .await
            .context("error getting market details")?
            .json()
            .context("error parsing market details response")
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::SessionTokens;
    use crate::http::{CapitalClient, ClientConfig};
    use crate::types::{Direction, Environment};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with_active_account(account_id: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clientId": "C1",
                "accountId": account_id,
                "timezoneOffset": 1,
                "locale": "en",
                "currency": "USD",
                "symbol": "$",
                "streamEndpoint": "wss://api-streaming-capital.backend-capital.com/"
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_get_positions() {
        let server = server_with_active_account("ACC-1").await;
        Mock::given(method("GET"))
            .and(path("/positions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "positions": [{
                    "position": {
                        "dealId": "D1",
                        "size": 1.5,
                        "direction": "BUY",
                        "level": 1.0825,
                        "upl": 3.2,
                        "currency": "USD",
                        "guaranteedStop": true
                    },
                    "market": {"epic": "EURUSD", "instrumentName": "EUR/USD"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CapitalClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init");

        let response = client
            .get_positions(Environment::Live, "ACC-1", &SessionTokens::new("c", "s"))
            .await
            .expect("positions");

        assert_eq!(response.positions.len(), 1);
        let open = &response.positions[0];
        assert_eq!(open.position.deal_id, "D1");
        assert_eq!(open.position.direction, Direction::Buy);
        assert_eq!(open.position.level, 1.0825);
        assert!(open.position.guaranteed_stop);
        assert_eq!(open.market.epic, "EURUSD");
    }

    #[tokio::test]
    async fn test_get_market_details() {
        let server = server_with_active_account("ACC-1").await;
        Mock::given(method("GET"))
            .and(path("/markets/US500"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instrument": {
                    "epic": "US500",
                    "name": "US 500",
                    "type": "INDICES",
                    "lotSize": 1,
                    "currency": "USD",
                    "guaranteedStopAllowed": true
                },
                "dealingRules": {
                    "minDealSize": {"unit": "POINTS", "value": 0.01},
                    "maxDealSize": {"unit": "POINTS", "value": 1000.0},
                    "minStopOrProfitDistance": {"unit": "PERCENTAGE", "value": 0.1}
                },
                "snapshot": {"marketStatus": "TRADEABLE", "bid": 5301.2, "offer": 5301.8}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CapitalClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init");

        let details = client
            .get_market_details(Environment::Demo, "ACC-1", "US500", &SessionTokens::new("c", "s"))
            .await
            .expect("market details");

        assert_eq!(details.instrument.name, "US 500");
        assert!(details.instrument.guaranteed_stop_allowed);
        assert_eq!(details.dealing_rules.min_deal_size.value, 0.01);
        assert_eq!(details.dealing_rules.max_deal_size.unit, "POINTS");
        let snapshot = details.snapshot.expect("snapshot");
        assert_eq!(snapshot.market_status, "TRADEABLE");
        assert_eq!(snapshot.offer, 5301.8);
    }

    #[tokio::test]
    async fn test_unknown_epic_surfaces_not_found() {
        let server = server_with_active_account("ACC-1").await;
        Mock::given(method("GET"))
            .and(path("/markets/NOPE"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"errorCode":"error.not-found.epic"}"#),
            )
            .mount(&server)
            .await;

        let client = CapitalClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init");

        let err = client
            .get_market_details(Environment::Live, "ACC-1", "NOPE", &SessionTokens::new("c", "s"))
            .await
            .expect_err("404");

        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().starts_with("error getting market details: "));
    }
}
