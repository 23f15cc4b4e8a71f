/*
[INPUT]:  Parsed subcommand, CLI configuration, and a CapitalApi implementation
[OUTPUT]: JSON value describing the operation result
[POS]:    Command layer - maps subcommands onto adapter operations
[UPDATE]: When adding subcommands or adapter operations
*/

use anyhow::{Context, Result};
use capital_adapter::{CapitalApi, Direction, OpenPositionRequest};
use clap::Subcommand;
use serde_json::{Value, json};
use tracing::info;

use crate::config::CliConfig;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a session and print the session details
    Session,
    /// List every trading account of the login
    Accounts,
    /// Show the account the session currently points at
    CurrentAccount,
    /// List open positions
    Positions {
        #[arg(long)]
        account: Option<String>,
    },
    /// Show instrument, dealing rules and snapshot for an epic
    Market {
        #[arg(long)]
        account: Option<String>,
        epic: String,
    },
    /// Open a position and print the resulting deal id
    Open {
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        epic: String,
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        size: f64,
        #[arg(long)]
        stop_level: Option<f64>,
        #[arg(long)]
        profit_level: Option<f64>,
        #[arg(long)]
        guaranteed_stop: bool,
    },
    /// Close a position by deal id
    Close {
        #[arg(long)]
        account: Option<String>,
        deal_id: String,
    },
    /// Fetch the confirmation for a deal reference
    Confirm {
        #[arg(long)]
        account: Option<String>,
        deal_reference: String,
    },
    /// Make another account the active one
    Switch { account_id: String },
}

/// Create a session, run `command` with it, and return the printable result.
pub async fn run(api: &dyn CapitalApi, config: &CliConfig, command: Command) -> Result<Value> {
    let environment = config.environment();
    let (session, tokens) = api
        .create_session(environment, &config.credentials())
        .await
        .context("create session")?;
    info!(
        %environment,
        account_id = %session.current_account_id,
        "session ready"
    );

    let output = match command {
        Command::Session => serde_json::to_value(&session)?,
        Command::Accounts => {
            let accounts = api
                .get_accounts(environment, &tokens)
                .await
                .context("list accounts")?;
            serde_json::to_value(accounts)?
        }
        Command::CurrentAccount => {
            let current = api
                .get_current_account(environment, &tokens)
                .await
                .context("get current account")?;
            serde_json::to_value(current)?
        }
        Command::Positions { account } => {
            let account_id = config.resolve_account(account.as_deref())?;
            let positions = api
                .get_positions(environment, &account_id, &tokens)
                .await
                .context("list positions")?;
            serde_json::to_value(positions)?
        }
        Command::Market { account, epic } => {
            let account_id = config.resolve_account(account.as_deref())?;
            let details = api
                .get_market_details(environment, &account_id, &epic, &tokens)
                .await
                .with_context(|| format!("get market details for {epic}"))?;
            serde_json::to_value(details)?
        }
        Command::Open {
            account,
            epic,
            direction,
            size,
            stop_level,
            profit_level,
            guaranteed_stop,
        } => {
            let account_id = config.resolve_account(account.as_deref())?;
            let request = OpenPositionRequest::new(epic, direction, size)
                .stop_level(stop_level)
                .profit_level(profit_level)
                .guaranteed_stop(guaranteed_stop);
            let deal_id = api
                .open_position(environment, &account_id, request, &tokens)
                .await
                .context("open position")?;
            json!({ "dealId": deal_id })
        }
        Command::Close { account, deal_id } => {
            let account_id = config.resolve_account(account.as_deref())?;
            let confirmation = api
                .close_position(environment, &account_id, &deal_id, &tokens)
                .await
                .with_context(|| format!("close position {deal_id}"))?;
            serde_json::to_value(confirmation)?
        }
        Command::Confirm {
            account,
            deal_reference,
        } => {
            let account_id = config.resolve_account(account.as_deref())?;
            let confirmation = api
                .confirm_deal(environment, &account_id, &deal_reference, &tokens)
                .await
                .with_context(|| format!("confirm deal {deal_reference}"))?;
            serde_json::to_value(confirmation)?
        }
        Command::Switch { account_id } => {
            let (result, _) = api
                .switch_active_account(environment, &account_id, &tokens)
                .await
                .with_context(|| format!("switch to account {account_id}"))?;
            json!({ "accountId": account_id, "result": result })
        }
    };

    Ok(output)
}
