//! Configuration for the MobileCoin CLI.
//!
//! Configuration comes from the `MOBILECOIN_CONFIG` environment variable,
//! which holds either the JSON itself or a path to a JSON file. The
//! `start` and `stop` commands need the full server configuration; RPC
//! commands only need the API URL and fall back to the default endpoint
//! when no configuration is present.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const CONFIG_ENV_VAR: &str = "MOBILECOIN_CONFIG";

/// Wallet server JSON-RPC endpoint used when the config does not set one.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:9090/wallet";

/// Wallet server launch configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    /// Path to the wallet server binary.
    pub executable: PathBuf,

    #[serde(rename = "ledger-db")]
    pub ledger_db: PathBuf,

    #[serde(rename = "wallet-db")]
    pub wallet_db: PathBuf,

    /// Consensus peers to connect to (online mode).
    #[serde(default)]
    pub peer: Vec<String>,

    #[serde(rename = "tx-source-url", default)]
    pub tx_source_url: Vec<String>,

    #[serde(rename = "fog-ingest-enclave-css")]
    pub fog_ingest_enclave_css: Option<PathBuf>,

    /// Where the server writes its log when started with --bg.
    pub logfile: Option<PathBuf>,

    #[serde(rename = "api-url")]
    pub api_url: Option<String>,
}

impl Config {
    /// Load the full configuration, required for `start` and `stop`.
    pub fn load() -> Result<Config> {
        let raw = match env::var(CONFIG_ENV_VAR) {
            Ok(raw) => raw,
            Err(_) => bail!(
                "The {} environment variable is not set. It must contain \
                 the wallet server configuration as JSON, or a path to a \
                 JSON file.",
                CONFIG_ENV_VAR
            ),
        };
        Self::parse(&raw)
    }

    pub(crate) fn parse(raw: &str) -> Result<Config> {
        let json = if raw.trim_start().starts_with('{') {
            raw.to_owned()
        } else {
            fs::read_to_string(raw.trim())
                .with_context(|| format!("Failed to read config file {raw:?}"))?
        };
        serde_json::from_str(&json).context("Failed to parse wallet server configuration")
    }

    /// The JSON-RPC endpoint of the wallet server.
    ///
    /// Falls back to the default endpoint only when no configuration is
    /// set, so RPC commands work against a server started by other
    /// means. A configuration that is present but unreadable is an
    /// error, not a silent fallback.
    pub fn api_url() -> Result<String> {
        let raw = match env::var(CONFIG_ENV_VAR) {
            Ok(raw) => raw,
            Err(_) => return Ok(DEFAULT_API_URL.to_owned()),
        };
        let config = Self::parse(&raw)?;
        Ok(config
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned()))
    }
}
