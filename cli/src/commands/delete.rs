//! Delete an account from the wallet.

use anyhow::Result;
use colored::Colorize;

use crate::client::WalletClient;
use crate::commands::{confirm, print_account, resolve_account, short_id};

pub async fn run(client: &WalletClient, account_id: &str) -> Result<()> {
    let account = resolve_account(client, account_id).await?;
    let balance = client.get_balance_for_account(&account.account_id).await?;

    // An empty, fully synced account can go without ceremony.
    if balance.is_synced && balance.unspent_pmob.is_zero() {
        println!("Account {} has 0 MOB.", short_id(&account));
    } else {
        println!("You are about to delete this account:");
        println!();
        print_account(&account, Some(&balance));
        println!();
        println!(
            "{}",
            "You will lose access to the funds in this account unless you\n\
             restore it from the seed phrase."
                .yellow()
        );
        if !confirm("Continue? (Y/N) ")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    client.delete_account(&account.account_id).await?;
    println!("Deleted.");
    Ok(())
}
