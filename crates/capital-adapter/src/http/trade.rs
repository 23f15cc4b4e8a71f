/*
[INPUT]:  Position requests, deal ids/references, session tokens, target account id
[OUTPUT]: Opened deal ids and deal confirmations
[POS]:    HTTP layer - account guard plus trading endpoints (/positions, /confirms)
[UPDATE]: When order flow, confirmation rules, or the account guard change
*/

use std::borrow::Cow;

use reqwest::Method;
use tracing::{debug, info, warn};

use crate::auth::SessionTokens;
use crate::http::client::AuthHeaders;
use crate::http::{CapitalClient, CapitalError, Result, ResultExt};
use crate::types::{
    DealConfirmation, DealReferenceResponse, Environment, OpenPosition, OpenPositionRequest,
};

pub(crate) const POSITIONS_ENDPOINT: &str = "/positions";

impl CapitalClient {
    /// Make sure the session operates on `account_id` before an account-scoped call.
    ///
    /// Returns the caller's tokens untouched when the account is already active,
    /// otherwise the pair produced by the switch. Runs at most one switch.
    pub(crate) async fn ensure_active_account<'t>(
        &self,
        environment: Environment,
        account_id: &str,
        tokens: &'t SessionTokens,
    ) -> Result<Cow<'t, SessionTokens>> {
        let current = self
            .get_current_account(environment, tokens)
            .await
            .context("error getting current account")?;

        if current.account_id == account_id {
            return Ok(Cow::Borrowed(tokens));
        }

        debug!(
            from = %current.account_id,
            to = account_id,
            "active account differs, switching"
        );

        let (_, switched) = self
            .switch_active_account(environment, account_id, tokens)
            .await
            .context("error switching account")?;

        Ok(Cow::Owned(switched))
    }

    /// Open a position and wait for its confirmation
    ///
    /// POST /positions, then GET /confirms/{dealReference}
    /// Returns the deal id of the first affected deal.
    pub async fn open_position(
        &self,
        environment: Environment,
        account_id: &str,
        request: OpenPositionRequest,
        tokens: &SessionTokens,
    ) -> Result<String> {
        self.submit_open(environment, account_id, request, tokens)
            .await
            .context("error opening position")
    }

    async fn submit_open(
        &self,
        environment: Environment,
        account_id: &str,
        request: OpenPositionRequest,
        tokens: &SessionTokens,
    ) -> Result<String> {
        let tokens = self
            .ensure_active_account(environment, account_id, tokens)
            .await?;
        let request = request.normalized();

        let reference: DealReferenceResponse = self
            .execute(
                Method::POST,
                environment,
                POSITIONS_ENDPOINT,
                Some(&request),
                AuthHeaders::session(&tokens),
            )
            .await
            .context("error submitting position")?
            .json()
            .context("error parsing position response")?;

        // Guard already ran above; the confirmation reuses the bound tokens.
        let confirmation = self
            .fetch_confirmation(environment, &reference.deal_reference, &tokens)
            .await
            .context("error confirming deal")?;
        ensure_accepted(&confirmation)?;

        let deal_id = confirmation
            .first_deal_id()
            .ok_or(CapitalError::NoAffectedDeals)?;

        info!(
            %environment,
            account_id,
            epic = %request.epic,
            direction = %request.direction,
            deal_id,
            "position opened"
        );

        Ok(deal_id.to_string())
    }

    /// Close an open position and wait for its confirmation
    ///
    /// GET /positions/{dealId}, DELETE /positions/{dealId}, then GET /confirms/{dealReference}
    pub async fn close_position(
        &self,
        environment: Environment,
        account_id: &str,
        deal_id: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation> {
        self.submit_close(environment, account_id, deal_id, tokens)
            .await
            .context("error closing position")
    }

    async fn submit_close(
        &self,
        environment: Environment,
        account_id: &str,
        deal_id: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation> {
        let tokens = self
            .ensure_active_account(environment, account_id, tokens)
            .await?;
        let endpoint = format!("{POSITIONS_ENDPOINT}/{deal_id}");

        // Existence check, so an unknown deal id reports the lookup failure.
        let position: OpenPosition = self
            .get(environment, &endpoint, &tokens)
            .await
            .context("error getting position details")?
            .json()
            .context("error parsing position details")?;

        debug!(
            deal_id,
            epic = %position.market.epic,
            size = position.position.size,
            "closing position"
        );

        let reference: DealReferenceResponse = self
            .delete(environment, &endpoint, &tokens)
            .await
            .context("error deleting position")?
            .json()
            .context("error parsing close position response")?;

        let confirmation = self
            .fetch_confirmation(environment, &reference.deal_reference, &tokens)
            .await
            .context("error confirming position close")?;
        ensure_accepted(&confirmation)?;

        info!(%environment, account_id, deal_id, "position closed");

        Ok(confirmation)
    }

    /// Fetch the authoritative outcome of a submitted deal
    ///
    /// GET /confirms/{dealReference}
    pub async fn confirm_deal(
        &self,
        environment: Environment,
        account_id: &str,
        deal_reference: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation> {
        let tokens = self
            .ensure_active_account(environment, account_id, tokens)
            .await
            .context("error confirming deal")?;

        self.fetch_confirmation(environment, deal_reference, &tokens)
            .await
            .context("error confirming deal")
    }

    async fn fetch_confirmation(
        &self,
        environment: Environment,
        deal_reference: &str,
        tokens: &SessionTokens,
    ) -> Result<DealConfirmation> {
        self.get(environment, &format!("/confirms/{deal_reference}"), tokens)
            .await
            .context("error getting deal confirmation")?
            .json()
            .context("error parsing confirm response")
    }
}

fn ensure_accepted(confirmation: &DealConfirmation) -> Result<()> {
    if confirmation.is_accepted() {
        return Ok(());
    }

    warn!(
        deal_reference = %confirmation.deal_reference,
        status = %confirmation.status,
        reason = ?confirmation.reason,
        "deal not accepted"
    );

    Err(CapitalError::DealRejected {
        status: confirmation.status.clone(),
        reason: confirmation.reason.clone(),
    })
}
