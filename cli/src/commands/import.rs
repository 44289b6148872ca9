//! Import an account from entropy, a seed phrase, or an export file.

use anyhow::Result;

use crate::client::WalletClient;
use crate::commands::print_account;
use crate::seed::parse_import_source;

pub async fn run(
    client: &WalletClient,
    seed: &str,
    name: Option<&str>,
    block: Option<u64>,
) -> Result<()> {
    let spec = parse_import_source(seed)?;

    // An explicit --block wins over the block recorded in an export file.
    let first_block = block.or(spec.first_block_index);

    let account = client
        .import_account(&spec.entropy, name, first_block, spec.fog_keys.as_ref())
        .await?;
    let balance = client.get_balance_for_account(&account.account_id).await?;

    println!("Imported account.");
    println!();
    print_account(&account, Some(&balance));
    println!();
    Ok(())
}
