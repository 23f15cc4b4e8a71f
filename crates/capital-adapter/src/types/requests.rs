/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::Direction;

/// Body of POST /session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub identifier: String,
    pub password: String,
    pub encrypted_password: bool,
}

/// Body of PUT /session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAccountRequest {
    pub account_id: String,
}

/// Body of POST /positions
///
/// A stop or profit level of exactly zero counts as unset and is left out of
/// the payload, so a zero-distance level cannot be requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPositionRequest {
    pub epic: String,
    pub direction: Direction,
    pub size: f64,
    pub guaranteed_stop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_level: Option<f64>,
}

impl OpenPositionRequest {
    pub fn new(epic: impl Into<String>, direction: Direction, size: f64) -> Self {
        Self {
            epic: epic.into(),
            direction,
            size,
            guaranteed_stop: false,
            stop_level: None,
            profit_level: None,
        }
    }

    pub fn stop_level(mut self, level: Option<f64>) -> Self {
        self.stop_level = non_zero(level);
        self
    }

    pub fn profit_level(mut self, level: Option<f64>) -> Self {
        self.profit_level = non_zero(level);
        self
    }

    pub fn guaranteed_stop(mut self, guaranteed_stop: bool) -> Self {
        self.guaranteed_stop = guaranteed_stop;
        self
    }

    /// Drop zero-valued levels that were set directly on the public fields
    pub(crate) fn normalized(mut self) -> Self {
        self.stop_level = non_zero(self.stop_level);
        self.profit_level = non_zero(self.profit_level);
        self
    }
}

fn non_zero(level: Option<f64>) -> Option<f64> {
    level.filter(|value| *value != 0.0)
}
