//! Show the transaction outputs received and spent by an account.

use anyhow::Result;
use colored::Colorize;

use crate::client::{Txo, WalletClient};
use crate::commands::{resolve_account, short_id};

pub async fn run(client: &WalletClient, account_id: &str) -> Result<()> {
    let account = resolve_account(client, account_id).await?;
    let txos = client.get_all_txos_by_account(&account.account_id).await?;

    if txos.is_empty() {
        println!("No transaction outputs for account {}.", short_id(&account));
        return Ok(());
    }

    // Unspent outputs first, then spent ones.
    let (unspent, spent): (Vec<&Txo>, Vec<&Txo>) =
        txos.iter().partition(|txo| !txo.is_spent());

    println!();
    for txo in unspent.iter().chain(spent.iter()) {
        let id = txo.txo_id.get(..6).unwrap_or(&txo.txo_id);
        let block = txo
            .received_block_index
            .as_deref()
            .unwrap_or("?")
            .to_owned();
        if let Some(spent_block) = &txo.spent_block_index {
            println!(
                "{} {} MOB  received at block {}, {}",
                id.cyan(),
                txo.value_pmob,
                block,
                format!("spent at block {spent_block}").dimmed(),
            );
        } else {
            println!(
                "{} {} MOB  received at block {}, {}",
                id.cyan(),
                txo.value_pmob,
                block,
                "unspent".green(),
            );
        }
    }
    println!();
    Ok(())
}
