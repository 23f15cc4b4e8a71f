/*
[INPUT]:  Error sources (validation, HTTP, API, serialization, deal outcome)
[OUTPUT]: Structured error types with operation context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiErrorBody;

/// Main error type for the Capital.com adapter
#[derive(Error, Debug)]
pub enum CapitalError {
    /// Required input was missing; no request was sent
    #[error("{0}")]
    Validation(String),

    /// HTTP request failed before a status was received
    #[error("error making API request: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a status >= 400
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Session response carried no CST or X-SECURITY-TOKEN header
    #[error("failed to obtain session tokens")]
    MissingSessionTokens,

    /// Deal confirmation did not report ACCEPTED
    #[error("deal was not accepted: {status}{}", format_reason(.reason))]
    DealRejected {
        status: String,
        reason: Option<String>,
    },

    /// Accepted confirmation listed no affected deals
    #[error("no affected deals found")]
    NoAffectedDeals,

    /// Error wrapped with the step or operation that produced it
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<CapitalError>,
    },
}

impl CapitalError {
    /// Create an API error from status code and raw body
    pub fn api_error(status: StatusCode, body: impl Into<String>) -> Self {
        CapitalError::Api {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// Wrap this error with a description of the failing step
    pub fn context(self, context: impl Into<String>) -> Self {
        CapitalError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error below any context wrappers
    pub fn root(&self) -> &CapitalError {
        match self {
            CapitalError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status of a remote rejection, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            CapitalError::Api { status, .. } => Some(*status),
            CapitalError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Platform `errorCode` parsed from a rejection body
    pub fn error_code(&self) -> Option<String> {
        match self.root() {
            CapitalError::Api { body, .. } => serde_json::from_str::<ApiErrorBody>(body)
                .ok()
                .map(|parsed| parsed.error_code),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
            || matches!(self.root(), CapitalError::MissingSessionTokens)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.root(), CapitalError::Validation(_))
    }
}

fn format_reason(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|reason| format!(" ({reason})"))
        .unwrap_or_default()
}

/// Attach step context to fallible results
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CapitalError>,
{
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|err| err.into().context(context))
    }
}

/// Result type alias for Capital.com operations
pub type Result<T> = std::result::Result<T, CapitalError>;
