//! Send MOB to an address.

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::amount::{Amount, TRANSACTION_FEE};
use crate::client::WalletClient;
use crate::commands::{confirm, resolve_account, short_id};

/// The send amount and the total charged (amount plus fee), given what the
/// account currently holds. `"all"` empties the account.
pub fn compute_send_amounts(unspent: Amount, amount_arg: &str) -> Result<(Amount, Amount)> {
    if amount_arg == "all" {
        let amount = unspent
            .checked_sub(TRANSACTION_FEE)
            .with_context(|| {
                format!(
                    "The account holds {unspent} MOB, not enough to cover \
                     the {TRANSACTION_FEE} MOB fee."
                )
            })?;
        return Ok((amount, unspent));
    }

    let amount: Amount = amount_arg
        .parse()
        .with_context(|| format!("Invalid amount {amount_arg:?}"))?;
    let Some(total) = amount.checked_add(TRANSACTION_FEE) else {
        bail!("Invalid amount {amount_arg:?}");
    };
    Ok((amount, total))
}

pub async fn run(
    client: &WalletClient,
    account_id: &str,
    amount_arg: &str,
    to_address: &str,
) -> Result<()> {
    let account = resolve_account(client, account_id).await?;
    let balance = client.get_balance_for_account(&account.account_id).await?;
    let unspent = balance.unspent_pmob;

    let (amount, total) = compute_send_amounts(unspent, amount_arg)?;

    println!(
        "Sending {} MOB from account {} {}",
        amount.to_string().green(),
        short_id(&account).cyan(),
        account.name,
    );
    println!("to address {to_address}.");
    println!("Fee is {TRANSACTION_FEE} MOB, for a total amount of {total} MOB.");

    if total > unspent {
        println!(
            "{}",
            format!(
                "Cannot send this transaction, because the account only\n\
                 contains {unspent} MOB. Try sending all funds by entering amount as \"all\"."
            )
            .red()
        );
        return Ok(());
    }

    if !confirm("Confirm? (Y/N) ")? {
        println!("Cancelled.");
        return Ok(());
    }

    let transaction_log = client
        .build_and_submit_transaction(&account.account_id, amount, to_address)
        .await?;

    println!(
        "Sent {} MOB, with a transaction fee of {} MOB.",
        transaction_log.value_pmob.to_string().green(),
        transaction_log.fee_pmob,
    );
    Ok(())
}
