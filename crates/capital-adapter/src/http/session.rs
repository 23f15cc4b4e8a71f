/*
[INPUT]:  Login credentials or session tokens, target account ids
[OUTPUT]: Session info, fresh token pairs, current/listed accounts
[POS]:    HTTP layer - session endpoints (/session, /accounts)
[UPDATE]: When session lifecycle or account endpoints change
*/

use chrono::Utc;
use reqwest::Method;
use tracing::info;

use crate::auth::{Credentials, SessionTokens};
use crate::http::client::{AuthHeaders, CST_HEADER, SECURITY_TOKEN_HEADER};
use crate::http::{CapitalClient, CapitalError, Result, ResultExt};
use crate::types::{
    Account, AccountsResponse, CreateSessionRequest, CurrentAccount, Environment, SessionInfo,
    SwitchAccountRequest, SwitchAccountResult,
};

const SESSION_ENDPOINT: &str = "/session";
const ACCOUNTS_ENDPOINT: &str = "/accounts";

impl CapitalClient {
    /// Log in and obtain a session token pair
    ///
    /// POST /session
    /// Requires: X-CAP-API-KEY header. Tokens are read from the CST and
    /// X-SECURITY-TOKEN response headers; a response without them fails even
    /// if the body decoded.
    pub async fn create_session(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<(SessionInfo, SessionTokens)> {
        credentials.validate()?;

        let payload = CreateSessionRequest {
            identifier: credentials.identifier.clone(),
            password: credentials.password.clone(),
            encrypted_password: false,
        };

        let response = self
            .execute(
                Method::POST,
                environment,
                SESSION_ENDPOINT,
                Some(&payload),
                AuthHeaders::api_key(&credentials.api_key),
            )
            .await
            .context("error creating session")?;

        let session: SessionInfo = response.json().context("error unmarshalling session")?;

        let (Some(cst), Some(security_token)) = (
            response.header(CST_HEADER),
            response.header(SECURITY_TOKEN_HEADER),
        ) else {
            return Err(CapitalError::MissingSessionTokens);
        };

        info!(
            %environment,
            account_id = %session.current_account_id,
            "capital session created"
        );

        Ok((session, SessionTokens::new(cst, security_token)))
    }

    /// Account the token pair is currently bound to
    ///
    /// GET /session
    pub async fn get_current_account(
        &self,
        environment: Environment,
        tokens: &SessionTokens,
    ) -> Result<CurrentAccount> {
        self.get(environment, SESSION_ENDPOINT, tokens)
            .await
            .context("error getting session info")?
            .json()
            .context("error parsing session response")
    }

    /// Rebind the session to another account
    ///
    /// PUT /session
    /// The returned pair replaces the caller's; a header the platform leaves
    /// out keeps the caller's value.
    pub async fn switch_active_account(
        &self,
        environment: Environment,
        account_id: &str,
        tokens: &SessionTokens,
    ) -> Result<(SwitchAccountResult, SessionTokens)> {
        let payload = SwitchAccountRequest {
            account_id: account_id.to_string(),
        };

        let response = self
            .execute(
                Method::PUT,
                environment,
                SESSION_ENDPOINT,
                Some(&payload),
                AuthHeaders::session(tokens),
            )
            .await
            .context("error switching account")?;

        let result: SwitchAccountResult = response
            .json()
            .context("error parsing switch account response")?;

        let switched = SessionTokens {
            cst: response.header(CST_HEADER).unwrap_or(tokens.cst.as_str()).to_string(),
            security_token: response
                .header(SECURITY_TOKEN_HEADER)
                .unwrap_or(tokens.security_token.as_str())
                .to_string(),
            issued_at: Utc::now(),
        };

        info!(%environment, account_id, "active account switched");

        Ok((result, switched))
    }

    /// All accounts visible to the session; not tied to the active account
    ///
    /// GET /accounts
    pub async fn get_accounts(
        &self,
        environment: Environment,
        tokens: &SessionTokens,
    ) -> Result<Vec<Account>> {
        let response: AccountsResponse = self
            .get(environment, ACCOUNTS_ENDPOINT, tokens)
            .await
            .context("error getting accounts")?
            .json()
            .context("error parsing accounts response")?;

        Ok(response.accounts)
    }
}
