//! CLI subcommands, one module each, plus shared terminal helpers.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use colored::Colorize;

use crate::client::{Account, Balance, WalletClient};

pub mod create;
pub mod delete;
pub mod export;
pub mod history;
pub mod import;
pub mod list;
pub mod rename;
pub mod send;
pub mod start;
pub mod stop;

/// Account ids are 32-byte hex fingerprints.
const ACCOUNT_ID_LEN: usize = 64;

/// Resolve a (possibly abbreviated) account id against the wallet.
pub async fn resolve_account(client: &WalletClient, prefix: &str) -> Result<Account> {
    // A full-length id does not need the listing.
    if prefix.len() == ACCOUNT_ID_LEN {
        return Ok(client.get_account(prefix).await?);
    }
    let accounts = client.get_all_accounts().await?;
    resolve_account_in(accounts, prefix)
}

/// Prefix matching behind [`resolve_account`]. The prefix must select
/// exactly one account.
pub fn resolve_account_in(accounts: Vec<Account>, prefix: &str) -> Result<Account> {
    let mut matches: Vec<Account> = accounts
        .into_iter()
        .filter(|account| account.account_id.starts_with(prefix))
        .collect();

    match matches.len() {
        0 => bail!("Could not find an account starting with {prefix:?}."),
        1 => Ok(matches.remove(0)),
        _ => {
            let ids: Vec<&str> = matches
                .iter()
                .map(|account| account.account_id.as_str())
                .collect();
            bail!(
                "Multiple accounts match {prefix:?}: {}",
                ids.join(", ")
            );
        }
    }
}

/// Ask a yes/no question on the terminal. Only `y`/`yes` proceeds.
pub fn confirm(message: &str) -> Result<bool> {
    print!("{message}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Print an account summary, with balance and sync progress if available.
pub fn print_account(account: &Account, balance: Option<&Balance>) {
    println!("{} {}", short_id(account).cyan(), account.name);
    println!("  address {}", account.main_address);

    if let Some(balance) = balance {
        let offline = if balance.is_offline() { " [offline]" } else { "" };
        println!(
            "  {} MOB ({}/{} blocks synced){}",
            balance.unspent_pmob.to_string().green(),
            balance.account_block_index,
            balance.total_blocks(),
            offline,
        );
        if let Some(pending) = balance.pending_pmob {
            if !pending.is_zero() {
                println!("  {} MOB pending", pending.to_string().yellow());
            }
        }
    }
}

/// The first six characters of the account id, as shown in listings.
/// Falls back to the whole id rather than slicing through a character
/// of a malformed response.
pub fn short_id(account: &Account) -> &str {
    let id = &account.account_id;
    id.get(..6).unwrap_or(id)
}
