/*
[INPUT]:  Capital.com credentials, target account id, and order parameters
[OUTPUT]: Opened deal id and close confirmation
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use capital_adapter::*;

/// Example: open and close a small demo position
///
/// Trading endpoints require:
/// 1. A session token pair (CST + X-SECURITY-TOKEN)
/// 2. The target account to be active; the client switches when needed
///
/// Requires CAPITAL_API_KEY, CAPITAL_IDENTIFIER, CAPITAL_PASSWORD and
/// CAPITAL_ACCOUNT_ID.
#[tokio::main]
async fn main() {
    println!("=== Capital.com Trading Example ===\n");

    let client = match CapitalClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let credentials = Credentials::new(
        std::env::var("CAPITAL_API_KEY").unwrap_or_default(),
        std::env::var("CAPITAL_IDENTIFIER").unwrap_or_default(),
        std::env::var("CAPITAL_PASSWORD").unwrap_or_default(),
    );
    let account_id = std::env::var("CAPITAL_ACCOUNT_ID").unwrap_or_default();

    let (_, tokens) = match client.create_session(Environment::Demo, &credentials).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Failed to create session: {}", e);
            return;
        }
    };
    println!("✓ Session created");

    match client
        .get_market_details(Environment::Demo, &account_id, "GOLD", &tokens)
        .await
    {
        Ok(details) => println!(
            "✓ GOLD min deal size {} {}",
            details.dealing_rules.min_deal_size.value, details.dealing_rules.min_deal_size.unit
        ),
        Err(e) => eprintln!("Failed to get market details: {}", e),
    }

    // A zero level is treated as unset and left out of the order.
    let order = OpenPositionRequest::new("GOLD", Direction::Buy, 1.0)
        .stop_level(Some(0.0))
        .profit_level(None);
    println!("\nOrder request: {:?}", order);

    let deal_id = match client
        .open_position(Environment::Demo, &account_id, order, &tokens)
        .await
    {
        Ok(deal_id) => deal_id,
        Err(e) => {
            eprintln!("Failed to open position: {}", e);
            return;
        }
    };
    println!("✓ Position opened: {}", deal_id);

    match client
        .close_position(Environment::Demo, &account_id, &deal_id, &tokens)
        .await
    {
        Ok(confirmation) => println!("✓ Position closed: {}", confirmation.status),
        Err(e) => eprintln!("Failed to close position: {}", e),
    }
}
