/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{DealStatus, Direction};

/// Account the active session is currently bound to (GET /session)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentAccount {
    pub client_id: String,
    pub account_id: String,
    pub timezone_offset: i32,
    pub locale: String,
    pub currency: String,
    pub symbol: String,
    pub stream_endpoint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Balance {
    pub balance: f64,
    pub deposit: f64,
    pub profit_loss: f64,
    pub available: f64,
}

/// Tradeable account as listed by GET /accounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub account_name: String,
    pub account_type: String,
    pub preferred: bool,
    pub status: String,
    pub currency: String,
    pub symbol: String,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    pub contract_size: f64,
    #[serde(default)]
    pub created_date: String,
    #[serde(default, rename = "createdDateUTC")]
    pub created_date_utc: String,
    pub deal_id: String,
    #[serde(default)]
    pub deal_reference: String,
    #[serde(default)]
    pub working_order_id: String,
    pub size: f64,
    #[serde(default)]
    pub leverage: f64,
    #[serde(default)]
    pub upl: f64,
    pub direction: Direction,
    #[serde(default)]
    pub level: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub guaranteed_stop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_level: Option<f64>,
}

/// Market snapshot attached to a position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PositionMarket {
    pub instrument_name: String,
    pub expiry: String,
    pub market_status: String,
    pub epic: String,
    pub instrument_type: String,
    pub lot_size: f64,
    pub high: f64,
    pub low: f64,
    pub percentage_change: f64,
    pub net_change: f64,
    pub bid: f64,
    pub offer: f64,
    pub update_time: String,
    #[serde(rename = "updateTimeUTC")]
    pub update_time_utc: String,
    pub delay_time: i64,
    pub streaming_prices_available: bool,
    pub scaling_factor: i64,
}

/// One entry of GET /positions, also the body of GET /positions/{dealId}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub position: Position,
    #[serde(default)]
    pub market: PositionMarket,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AffectedDeal {
    pub deal_id: String,
    pub status: String,
}

/// Authoritative outcome of a submitted order (GET /confirms/{dealReference})
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DealConfirmation {
    pub status: String,
    pub deal_status: DealStatus,
    pub deal_reference: String,
    pub deal_id: String,
    pub affected_deals: Vec<AffectedDeal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop: Option<bool>,
}

impl DealConfirmation {
    pub fn is_accepted(&self) -> bool {
        self.deal_status == DealStatus::Accepted
    }

    /// Deal id of the first affected deal, the canonical id of an opened position
    pub fn first_deal_id(&self) -> Option<&str> {
        self.affected_deals.first().map(|deal| deal.deal_id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealSize {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DealingRules {
    pub min_step_distance: DealSize,
    pub min_deal_size: DealSize,
    pub max_deal_size: DealSize,
    pub min_size_increment: DealSize,
    pub min_guaranteed_stop_distance: DealSize,
    pub min_stop_or_profit_distance: DealSize,
    pub max_stop_or_profit_distance: DealSize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Instrument {
    pub epic: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instrument_type: String,
    pub market_id: String,
    pub currency: String,
    pub lot_size: f64,
    pub spot_bid: f64,
    pub spot_ask: f64,
    pub min_deal_size: f64,
    pub max_deal_size: f64,
    pub otc_tradeable: bool,
    pub guaranteed_stop_allowed: bool,
    pub streaming_prices_available: bool,
    pub market_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub market_status: String,
    pub net_change: f64,
    pub percentage_change: f64,
    pub update_time: String,
    pub delay_time: i64,
    pub bid: f64,
    pub offer: f64,
    pub high: f64,
    pub low: f64,
    pub decimal_places_factor: i64,
    pub scaling_factor: i64,
}

/// Instrument metadata and dealing constraints for an epic (GET /markets/{epic})
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketDetails {
    pub instrument: Instrument,
    pub dealing_rules: DealingRules,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<MarketSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_confirmation_missing_fields_default() {
        let confirm: DealConfirmation =
            serde_json::from_str(r#"{"dealStatus":"ACCEPTED"}"#).expect("decode");
        assert!(confirm.is_accepted());
        assert!(confirm.affected_deals.is_empty());
        assert_eq!(confirm.first_deal_id(), None);
        assert_eq!(confirm.reason, None);
    }

    #[test]
    fn test_open_position_decodes_platform_shape() {
        let body = r#"{
            "position": {
                "contractSize": 1,
                "createdDate": "2024-05-02T10:00:00.000",
                "createdDateUTC": "2024-05-02T09:00:00.000",
                "dealId": "006011e7-0001-54c4-0000-000080560043",
                "dealReference": "p_006011e7-0001-54c4-0000-000080560043",
                "workingOrderId": "",
                "size": 0.5,
                "leverage": 20,
                "upl": -1.25,
                "direction": "SELL",
                "level": 2301.4,
                "currency": "USD",
                "guaranteedStop": false,
                "stopLevel": 2350.0
            },
            "market": {
                "instrumentName": "Gold",
                "epic": "GOLD",
                "instrumentType": "COMMODITIES",
                "marketStatus": "TRADEABLE",
                "updateTimeUTC": "2024-05-02T09:01:00.000",
                "bid": 2301.1,
                "offer": 2301.5
            }
        }"#;

        let open: OpenPosition = serde_json::from_str(body).expect("decode");
        assert_eq!(open.position.direction, Direction::Sell);
        assert_eq!(open.position.size, 0.5);
        assert_eq!(open.position.stop_level, Some(2350.0));
        assert_eq!(open.position.profit_level, None);
        assert_eq!(open.market.epic, "GOLD");
        assert_eq!(open.market.update_time_utc, "2024-05-02T09:01:00.000");
    }

    #[test]
    fn test_market_details_rules() {
        let body = r#"{
            "instrument": {"epic": "EURUSD", "name": "EUR/USD", "type": "CURRENCIES"},
            "dealingRules": {
                "minDealSize": {"unit": "AMOUNT", "value": 100.0},
                "maxDealSize": {"unit": "AMOUNT", "value": 5000000.0},
                "minStopOrProfitDistance": {"unit": "PERCENTAGE", "value": 0.02}
            }
        }"#;

        let details: MarketDetails = serde_json::from_str(body).expect("decode");
        assert_eq!(details.instrument.instrument_type, "CURRENCIES");
        assert_eq!(details.dealing_rules.min_deal_size.value, 100.0);
        assert_eq!(details.dealing_rules.min_stop_or_profit_distance.unit, "PERCENTAGE");
        assert!(details.snapshot.is_none());
    }
}
