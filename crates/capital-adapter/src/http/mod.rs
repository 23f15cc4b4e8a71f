/*
[INPUT]:  HTTP client configuration, session tokens, and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod market;
pub mod session;
pub mod trade;

pub use error::{CapitalError, Result, ResultExt};

pub use client::{CapitalClient, ClientConfig, DEMO_BASE_URL, LIVE_BASE_URL};
