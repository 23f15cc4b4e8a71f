/*
[INPUT]:  Login credentials and session header values
[OUTPUT]: Validated credentials and caller-owned session tokens
[POS]:    Auth layer - credential and token value types
[UPDATE]: When auth inputs or token handling change
*/

pub mod credentials;
pub mod tokens;

pub use credentials::Credentials;
pub use tokens::SessionTokens;
