//! Export an account's seed phrase to a file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::client::WalletClient;
use crate::commands::{confirm, print_account, resolve_account};
use crate::seed::write_export_file;

pub async fn run(client: &WalletClient, account_id: &str) -> Result<()> {
    let account = resolve_account(client, account_id).await?;
    let balance = client.get_balance_for_account(&account.account_id).await?;

    println!("You are about to export the seed phrase for this account:");
    println!();
    print_account(&account, Some(&balance));
    println!();
    println!(
        "{}",
        "Anyone who has access to the seed phrase can spend all the\n\
         funds in the account. Keep the exported file safe and private!"
            .yellow()
    );

    if !confirm("Really write the account seed phrase to a file? (Y/N) ")? {
        println!("Cancelled.");
        return Ok(());
    }

    let secrets = client.export_account_secrets(&account.account_id).await?;
    let id16 = account
        .account_id
        .get(..16)
        .unwrap_or(&account.account_id);
    let path = PathBuf::from(format!("mobilecoin_seed_phrase_{id16}.json"));

    write_export_file(&account, &secrets, &path)
        .with_context(|| format!("Could not write {}", path.display()))?;

    println!("Wrote {}.", path.display());
    Ok(())
}
