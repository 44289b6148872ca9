//! JSON-RPC client for the wallet server API.
//!
//! Every call is a single HTTP POST of a JSON-RPC 2.0 envelope. The wallet
//! server transmits integer amounts and block indices as decimal strings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use colored::Colorize;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::amount::Amount;
use crate::seed::FogKeys;

#[derive(Error, Debug)]
pub enum WalletApiError {
    #[error("Could not connect to the wallet server at {url}. Try running 'mobcli start'.")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Wallet server returned HTTP {0}")]
    Http(reqwest::StatusCode),
    #[error("Wallet server returned a non-JSON response: {0}")]
    BadBody(String),
    #[error("Wallet API error: {0}")]
    Server(Value),
    #[error("Malformed wallet API response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

type ApiResult<T> = Result<T, WalletApiError>;

/// An account as reported by the wallet server.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub account_id: String,
    #[serde(default)]
    pub name: String,
    pub main_address: String,
    #[serde(default)]
    pub first_block_index: Option<String>,
}

/// Balance and sync status for one account.
#[derive(Deserialize, Clone, Debug)]
pub struct Balance {
    pub unspent_pmob: Amount,
    #[serde(default)]
    pub pending_pmob: Option<Amount>,
    pub is_synced: bool,
    #[serde(with = "u64_str")]
    pub account_block_index: u64,
    #[serde(with = "u64_str")]
    pub local_block_index: u64,
    #[serde(with = "u64_str")]
    pub network_block_index: u64,
}

impl Balance {
    /// The ledger height to sync against. A network height of zero means
    /// the server is offline and only the local ledger copy counts.
    pub fn total_blocks(&self) -> u64 {
        if self.is_offline() {
            self.local_block_index
        } else {
            self.network_block_index
        }
    }

    pub fn is_offline(&self) -> bool {
        self.network_block_index == 0
    }
}

/// Private key material for an account. The account key is kept as raw
/// JSON so export files carry it through unchanged.
#[derive(Deserialize, Clone, Debug)]
pub struct AccountSecrets {
    pub entropy: String,
    pub account_key: Value,
}

/// A transaction output belonging to an account.
#[derive(Deserialize, Clone, Debug)]
pub struct Txo {
    #[serde(alias = "txo_id_hex")]
    pub txo_id: String,
    pub value_pmob: Amount,
    #[serde(default)]
    pub received_block_index: Option<String>,
    #[serde(default)]
    pub spent_block_index: Option<String>,
}

impl Txo {
    pub fn is_spent(&self) -> bool {
        self.spent_block_index.is_some()
    }
}

/// Record of a submitted transaction.
#[derive(Deserialize, Clone, Debug)]
pub struct TransactionLog {
    pub value_pmob: Amount,
    pub fee_pmob: Amount,
}

pub struct WalletClient {
    url: String,
    verbose: bool,
    http: reqwest::Client,
    last_id: AtomicU64,
}

/// Wrap a method call in the JSON-RPC 2.0 envelope the wallet API expects.
pub(crate) fn envelope(method: &str, params: Value, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "api_version": "2",
        "id": id,
        "method": method,
        "params": params,
    })
}

impl WalletClient {
    pub fn new(url: impl Into<String>, verbose: bool) -> Self {
        Self {
            url: url.into(),
            verbose,
            http: reqwest::Client::new(),
            last_id: AtomicU64::new(0),
        }
    }

    async fn call(&self, method: &str, params: Value) -> ApiResult<Value> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let request = envelope(method, params, id);

        if self.verbose {
            println!("{} {}", "POST".dimmed(), self.url.dimmed());
            println!("{}", serde_json::to_string_pretty(&request)?.dimmed());
            println!();
        }

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|source| WalletApiError::Connection {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| WalletApiError::Connection {
                url: self.url.clone(),
                source,
            })?;
        let value: Value =
            serde_json::from_str(&body).map_err(|_| WalletApiError::BadBody(body.clone()))?;

        if self.verbose {
            println!("{}", status.to_string().dimmed());
            println!("{}", serde_json::to_string_pretty(&value)?.dimmed());
            println!();
        }

        if !status.is_success() {
            return Err(WalletApiError::Http(status));
        }
        if let Some(error) = value.get("error") {
            if !error.is_null() {
                return Err(WalletApiError::Server(error.clone()));
            }
        }
        value
            .get("result")
            .cloned()
            .ok_or_else(|| WalletApiError::MalformedResponse("missing \"result\"".into()))
    }

    pub async fn create_account(
        &self,
        name: Option<&str>,
        first_block: Option<u64>,
    ) -> ApiResult<Account> {
        let mut params = json!({ "name": name.unwrap_or("") });
        if let Some(block) = first_block {
            params["first_block_index"] = json!(block.to_string());
        }
        let result = self.call("create_account", params).await?;
        decode(&result, "account")
    }

    pub async fn import_account(
        &self,
        entropy: &str,
        name: Option<&str>,
        first_block: Option<u64>,
        fog_keys: Option<&FogKeys>,
    ) -> ApiResult<Account> {
        let mut params = json!({
            "entropy": entropy,
            "name": name.unwrap_or(""),
        });
        if let Some(block) = first_block {
            params["first_block_index"] = json!(block.to_string());
        }
        if let Some(fog_keys) = fog_keys {
            merge(&mut params, serde_json::to_value(fog_keys)?);
        }
        let result = self.call("import_account", params).await?;
        decode(&result, "account")
    }

    pub async fn get_account(&self, account_id: &str) -> ApiResult<Account> {
        let result = self
            .call("get_account", json!({ "account_id": account_id }))
            .await?;
        decode(&result, "account")
    }

    /// All accounts, in the server's listing order.
    pub async fn get_all_accounts(&self) -> ApiResult<Vec<Account>> {
        let result = self.call("get_all_accounts", json!({})).await?;
        let ids: Vec<String> = decode(&result, "account_ids")?;
        let mut map: HashMap<String, Account> = decode(&result, "account_map")?;
        ids.into_iter()
            .map(|id| {
                map.remove(&id).ok_or_else(|| {
                    WalletApiError::MalformedResponse(format!(
                        "account {id} is listed but not in the account map"
                    ))
                })
            })
            .collect()
    }

    pub async fn update_account_name(&self, account_id: &str, name: &str) -> ApiResult<Account> {
        let result = self
            .call(
                "update_account_name",
                json!({ "account_id": account_id, "name": name }),
            )
            .await?;
        decode(&result, "account")
    }

    pub async fn delete_account(&self, account_id: &str) -> ApiResult<()> {
        self.call("delete_account", json!({ "account_id": account_id }))
            .await?;
        Ok(())
    }

    pub async fn get_balance_for_account(&self, account_id: &str) -> ApiResult<Balance> {
        let result = self
            .call("get_balance_for_account", json!({ "account_id": account_id }))
            .await?;
        decode(&result, "balance")
    }

    pub async fn get_all_txos_by_account(&self, account_id: &str) -> ApiResult<Vec<Txo>> {
        let result = self
            .call("get_all_txos_by_account", json!({ "account_id": account_id }))
            .await?;
        let ids: Vec<String> = decode(&result, "txo_ids")?;
        let mut map: HashMap<String, Txo> = decode(&result, "txo_map")?;
        ids.into_iter()
            .map(|id| {
                map.remove(&id).ok_or_else(|| {
                    WalletApiError::MalformedResponse(format!(
                        "txo {id} is listed but not in the txo map"
                    ))
                })
            })
            .collect()
    }

    pub async fn export_account_secrets(&self, account_id: &str) -> ApiResult<AccountSecrets> {
        let result = self
            .call("export_account_secrets", json!({ "account_id": account_id }))
            .await?;
        decode(&result, "account_secrets")
    }

    pub async fn build_and_submit_transaction(
        &self,
        account_id: &str,
        amount: Amount,
        recipient: &str,
    ) -> ApiResult<TransactionLog> {
        let result = self
            .call(
                "build_and_submit_transaction",
                send_params(account_id, amount, recipient),
            )
            .await?;
        decode(&result, "transaction_log")
    }
}

/// Request parameters for a send. The amount goes in `value`, as a
/// decimal pMOB string.
pub(crate) fn send_params(account_id: &str, amount: Amount, recipient: &str) -> Value {
    json!({
        "account_id": account_id,
        "recipient_public_address": recipient,
        "value": amount.as_pmob().to_string(),
    })
}

fn decode<T: DeserializeOwned>(result: &Value, key: &str) -> ApiResult<T> {
    let inner = result
        .get(key)
        .cloned()
        .ok_or_else(|| WalletApiError::MalformedResponse(format!("missing {key:?} in result")))?;
    Ok(serde_json::from_value(inner)?)
}

fn merge(params: &mut Value, extra: Value) {
    if let (Some(params), Value::Object(extra)) = (params.as_object_mut(), extra) {
        params.extend(extra);
    }
}

/// The API sends u64 fields as decimal strings.
mod u64_str {
    use serde::de;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
