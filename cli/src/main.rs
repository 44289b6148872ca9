//! MobileCoin command-line wallet.
//!
//! Thin client over the wallet server's JSON-RPC API. All key handling,
//! ledger scanning, and transaction building happens in the server; this
//! binary shapes requests and formats terminal output.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod amount;
mod client;
mod commands;
mod config;
mod seed;

#[cfg(test)]
mod tests;


use client::WalletClient;
use config::Config;

#[derive(Parser)]
#[command(name = "mobcli")]
#[command(version)]
#[command(about = "MobileCoin command-line wallet")]
#[command(long_about = r#"
MobileCoin command-line wallet.

Talks to a locally running wallet server, which owns the keys and the
ledger. Configure it with the MOBILECOIN_CONFIG environment variable.

Quick Start:
  1. mobcli start --bg       Start the wallet server
  2. mobcli create           Create an account
  3. mobcli list             See accounts and balances
  4. mobcli send ...         Send MOB
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show requests and responses on the wire.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local wallet server
    Start {
        /// Run without connecting to peers
        #[arg(long)]
        offline: bool,

        /// Run in the background; stop with "mobcli stop"
        #[arg(long)]
        bg: bool,
    },

    /// Stop the local wallet server
    Stop,

    /// Create a new account
    Create {
        /// Account name
        #[arg(short, long)]
        name: Option<String>,

        /// Block index at which to start the account. No transactions
        /// before this block will be loaded.
        #[arg(short, long)]
        block: Option<u64>,
    },

    /// Change an account's name
    Rename {
        /// Account ID code (a unique prefix is enough)
        account_id: String,

        /// New account name
        name: String,
    },

    /// Import an account
    Import {
        /// Account seed phrase, export file, or root entropy hex
        seed: String,

        /// Account name
        #[arg(short, long)]
        name: Option<String>,

        /// Block index at which to start the account. No transactions
        /// before this block will be loaded.
        #[arg(short, long)]
        block: Option<u64>,
    },

    /// Export an account's seed phrase to a file
    Export {
        /// Account ID code (a unique prefix is enough)
        account_id: String,
    },

    /// Delete an account from local storage
    Delete {
        /// Account ID code (a unique prefix is enough)
        account_id: String,
    },

    /// List accounts and balances
    List,

    /// Show an account's transaction outputs
    History {
        /// Account ID code (a unique prefix is enough)
        account_id: String,
    },

    /// Send a transaction
    Send {
        /// Account ID to send from (a unique prefix is enough)
        account_id: String,

        /// Amount of MOB to send, or "all"
        amount: String,

        /// Address to send to
        to_address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = WalletClient::new(Config::api_url()?, cli.verbose);

    match cli.command {
        Commands::Start { offline, bg } => {
            commands::start::run(offline, bg, cli.verbose)?;
        }
        Commands::Stop => {
            commands::stop::run(cli.verbose)?;
        }
        Commands::Create { name, block } => {
            commands::create::run(&client, name.as_deref(), block).await?;
        }
        Commands::Rename { account_id, name } => {
            commands::rename::run(&client, &account_id, &name).await?;
        }
        Commands::Import { seed, name, block } => {
            commands::import::run(&client, &seed, name.as_deref(), block).await?;
        }
        Commands::Export { account_id } => {
            commands::export::run(&client, &account_id).await?;
        }
        Commands::Delete { account_id } => {
            commands::delete::run(&client, &account_id).await?;
        }
        Commands::List => {
            commands::list::run(&client).await?;
        }
        Commands::History { account_id } => {
            commands::history::run(&client, &account_id).await?;
        }
        Commands::Send {
            account_id,
            amount,
            to_address,
        } => {
            commands::send::run(&client, &account_id, &amount, &to_address).await?;
        }
    }

    Ok(())
}
