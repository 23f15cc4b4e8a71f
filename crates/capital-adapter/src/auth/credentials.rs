/*
[INPUT]:  API key and login identifier/password
[OUTPUT]: Validated login credentials for session creation
[POS]:    Auth layer - precondition checks before POST /session
[UPDATE]: When login inputs or their validation rules change
*/

use std::fmt;

use crate::http::{CapitalError, Result};

/// Login material for POST /session
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub identifier: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        identifier: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Reject empty fields before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(CapitalError::Validation(
                "capital.com API key is required".to_string(),
            ));
        }
        if self.identifier.is_empty() || self.password.is_empty() {
            return Err(CapitalError::Validation(
                "capital.com credentials are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}
