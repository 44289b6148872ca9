//! Create a new account.

use anyhow::Result;

use crate::client::WalletClient;
use crate::commands::print_account;

pub async fn run(client: &WalletClient, name: Option<&str>, block: Option<u64>) -> Result<()> {
    let account = client.create_account(name, block).await?;

    println!("Created a new account.");
    println!();
    print_account(&account, None);
    println!();
    Ok(())
}
