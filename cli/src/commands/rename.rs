//! Change an account's name.

use anyhow::Result;

use crate::client::WalletClient;
use crate::commands::{print_account, resolve_account};

pub async fn run(client: &WalletClient, account_id: &str, name: &str) -> Result<()> {
    let account = resolve_account(client, account_id).await?;
    let old_name = account.name.clone();

    let account = client
        .update_account_name(&account.account_id, name)
        .await?;

    println!("Renamed account from {:?} to {:?}.", old_name, account.name);
    println!();
    print_account(&account, None);
    println!();
    Ok(())
}
