//! List all accounts with their balances.

use anyhow::Result;

use crate::client::WalletClient;
use crate::commands::print_account;

pub async fn run(client: &WalletClient) -> Result<()> {
    let accounts = client.get_all_accounts().await?;

    if accounts.is_empty() {
        println!("No accounts.");
        return Ok(());
    }

    for account in &accounts {
        let balance = client.get_balance_for_account(&account.account_id).await?;
        println!();
        print_account(account, Some(&balance));
    }
    println!();
    Ok(())
}
