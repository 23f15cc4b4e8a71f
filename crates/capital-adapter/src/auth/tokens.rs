/*
[INPUT]:  CST / X-SECURITY-TOKEN header values and issue timestamps
[OUTPUT]: Caller-owned session token pair with age helpers
[POS]:    Auth layer - session token value type
[UPDATE]: When the token pair gains fields or staleness helpers change
*/

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Paired session credentials returned by session creation or account switch.
///
/// The client never stores or refreshes these; callers pass them on every
/// authenticated call and replace them after a switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub cst: String,
    pub security_token: String,
    pub issued_at: DateTime<Utc>,
}

impl SessionTokens {
    /// Build a pair stamped with the current time
    pub fn new(cst: impl Into<String>, security_token: impl Into<String>) -> Self {
        Self {
            cst: cst.into(),
            security_token: security_token.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.issued_at
    }

    /// True when the pair was issued more than `max_age` ago
    pub fn is_older_than(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}
