/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Capital.com adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod auth;
pub mod http;
pub mod types;

pub use api::CapitalApi;

// Re-export commonly used types from auth
pub use auth::{Credentials, SessionTokens};

// Re-export commonly used types from http
pub use http::{
    CapitalClient,
    CapitalError,
    ClientConfig,
    DEMO_BASE_URL,
    LIVE_BASE_URL,
    Result,
};

// Re-export all types
pub use types::*;
