/*
[INPUT]:  Capital.com API key and login from environment variables
[OUTPUT]: Session tokens, current account, and account list
[POS]:    Examples - session flow demonstration
[UPDATE]: When session flow changes
*/

use capital_adapter::*;

/// Example: Session flow
///
/// 1. Create HTTP client
/// 2. Create a session on the demo environment
/// 3. Look up the active account and list all accounts
///
/// Requires CAPITAL_API_KEY, CAPITAL_IDENTIFIER and CAPITAL_PASSWORD.
#[tokio::main]
async fn main() {
    println!("=== Capital.com Session Example ===\n");

    let client = match CapitalClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    let credentials = Credentials::new(
        std::env::var("CAPITAL_API_KEY").unwrap_or_default(),
        std::env::var("CAPITAL_IDENTIFIER").unwrap_or_default(),
        std::env::var("CAPITAL_PASSWORD").unwrap_or_default(),
    );

    let (session, tokens) = match client.create_session(Environment::Demo, &credentials).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Failed to create session: {}", e);
            return;
        }
    };
    println!("✓ Session created for client {}", session.client_id);
    println!("  Current account: {}", session.current_account_id);

    match client.get_current_account(Environment::Demo, &tokens).await {
        Ok(current) => println!("✓ Active account {} ({})", current.account_id, current.currency),
        Err(e) => eprintln!("Failed to get current account: {}", e),
    }

    match client.get_accounts(Environment::Demo, &tokens).await {
        Ok(accounts) => {
            println!("✓ {} account(s)", accounts.len());
            for account in accounts {
                println!(
                    "  {} {} balance={} available={}",
                    account.account_id,
                    account.account_name,
                    account.balance.balance,
                    account.balance.available
                );
            }
        }
        Err(e) => eprintln!("Failed to list accounts: {}", e),
    }
}
