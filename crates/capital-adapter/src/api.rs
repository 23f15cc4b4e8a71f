/*
[INPUT]:  Environment, credentials/tokens, and operation arguments
[OUTPUT]: Object-safe async surface over every public operation
[POS]:    Crate seam - what consumers program against
[UPDATE]: When a public operation is added or its signature changes
*/

use async_trait::async_trait;

use crate::auth::{Credentials, SessionTokens};
use crate::http::{CapitalClient, Result};
use crate::types::{
    Account, CurrentAccount, DealConfirmation, Environment, MarketDetails, OpenPositionRequest,
    PositionsResponse, SessionInfo, SwitchAccountResult,
};

/// Capital.com trading operations.
///
/// Tokens are always supplied by the caller. Account-scoped operations switch
/// the session to `account_id` first when another account is active.
#[async_trait]
pub trait CapitalApi: Send + Sync {
    async fn create_session(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<(SessionInfo, SessionTokens)>;

    async fn get_current_account(
        &self,
        environment: Environment,
        tokens: &SessionTokens,
    ) -> Result<CurrentAccount>;

    async fn switch_active_account(
        &self,
        environment: Environment,
        account_id: &str,
        tokens: &SessionTokens,
    ) -> Result<(SwitchAccountResult, SessionTokens)>;

    async fn get_accounts(
        &self,
        environment: Environment,
        tokens: &SessionTokens,
    ) -> Result<Vec<Account>>;

    async fn open_position(
        &self,
        environment: Environment,
        account_id: &str,
        request: OpenPositionRequest,
        tokens: &SessionTokens,
    ) -> Result<String>;

    async fn close_position(
        &self,
        environment: Environment,
        account_id: &str,
        deal_id: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation>;

    async fn confirm_deal(
        &self,
        environment: Environment,
        account_id: &str,
        deal_reference: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation>;

    async fn get_positions(
        &self,
        environment: Environment,
        account_id: &str,
        tokens: &SessionTokens,
    ) -> Result<PositionsResponse>;

    async fn get_market_details(
        &self,
        environment: Environment,
        account_id: &str,
        epic: &str,
        tokens: &SessionTokens,
    ) -> Result<MarketDetails>;
}

#[async_trait]
impl CapitalApi for CapitalClient {
    async fn create_session(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<(SessionInfo, SessionTokens)> {
        CapitalClient::create_session(self, environment, credentials).await
    }

    async fn get_current_account(
        &self,
        environment: Environment,
        tokens: &SessionTokens,
    ) -> Result<CurrentAccount> {
        CapitalClient::get_current_account(self, environment, tokens).await
    }

    async fn switch_active_account(
        &self,
        environment: Environment,
        account_id: &str,
        tokens: &SessionTokens,
    ) -> Result<(SwitchAccountResult, SessionTokens)> {
        CapitalClient::switch_active_account(self, environment, account_id, tokens).await
    }

    async fn get_accounts(
        &self,
        environment: Environment,
        tokens: &SessionTokens,
    ) -> Result<Vec<Account>> {
        CapitalClient::get_accounts(self, environment, tokens).await
    }

    async fn open_position(
        &self,
        environment: Environment,
        account_id: &str,
        request: OpenPositionRequest,
        tokens: &SessionTokens,
    ) -> Result<String> {
        CapitalClient::open_position(self, environment, account_id, request, tokens).await
    }

    async fn close_position(
        &self,
        environment: Environment,
        account_id: &str,
        deal_id: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation> {
        CapitalClient::close_position(self, environment, account_id, deal_id, tokens).await
    }

    async fn confirm_deal(
        &self,
        environment: Environment,
        account_id: &str,
        deal_reference: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation> {
        CapitalClient::confirm_deal(self, environment, account_id, deal_reference, tokens).await
    }

    async fn get_positions(
        &self,
        environment: Environment,
        account_id: &str,
        tokens: &SessionTokens,
    ) -> Result<PositionsResponse> {
        CapitalClient::get_positions(self, environment, account_id, tokens).await
    }

    async fn get_market_details(
        &self,
        environment: Environment,
        account_id: &str,
        epic: &str,
        tokens: &SessionTokens,
    ) -> Result<MarketDetails> {
        CapitalClient::get_market_details(self, environment, account_id, epic, tokens).await
    }
}
