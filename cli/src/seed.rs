//! Root entropy, seed phrases, and account export files.
//!
//! An account's root secret is 32 bytes of entropy, interchangeable with a
//! 24-word BIP39 English phrase. Export files carry both, plus enough
//! metadata to restore the account at the right ledger position.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use bip39::{Language, Mnemonic};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::{Account, AccountSecrets};

/// Fog service parameters carried alongside an account key.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FogKeys {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fog_report_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fog_report_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fog_authority_spki: Option<String>,
}

impl FogKeys {
    fn is_empty(&self) -> bool {
        self.fog_report_url.is_none()
            && self.fog_report_id.is_none()
            && self.fog_authority_spki.is_none()
    }
}

/// Everything needed to import an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    /// Root entropy, hex encoded.
    pub entropy: String,
    pub first_block_index: Option<u64>,
    pub fog_keys: Option<FogKeys>,
}

impl ImportSpec {
    fn from_entropy(entropy: String) -> Self {
        ImportSpec {
            entropy,
            first_block_index: None,
            fog_keys: None,
        }
    }
}

/// Interpret a seed argument as hex entropy, a BIP39 phrase, or the path
/// of a previously exported account file, in that order.
pub fn parse_import_source(source: &str) -> Result<ImportSpec> {
    let source = source.trim();

    if let Ok(bytes) = hex::decode(source) {
        if bytes.len() == 32 {
            return Ok(ImportSpec::from_entropy(hex::encode(bytes)));
        }
    }

    if let Ok(mnemonic) = Mnemonic::parse_in(Language::English, source) {
        return Ok(ImportSpec::from_entropy(hex::encode(mnemonic.to_entropy())));
    }

    read_export_file(Path::new(source)).with_context(|| {
        format!(
            "{source:?} is not 32 bytes of hex entropy, a seed phrase, \
             or a readable export file"
        )
    })
}

#[derive(Deserialize)]
struct ExportFile {
    root_entropy: String,
    #[serde(default)]
    first_block_index: Option<String>,
    #[serde(default)]
    account_key: Option<Value>,
}

fn read_export_file(path: &Path) -> Result<ImportSpec> {
    let json = fs::read_to_string(path)?;
    let data: ExportFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse export file {}", path.display()))?;

    let first_block_index = match data.first_block_index {
        Some(s) => Some(
            s.parse()
                .with_context(|| format!("Bad first_block_index {s:?} in export file"))?,
        ),
        None => None,
    };

    let fog_keys = data
        .account_key
        .as_ref()
        .and_then(|key| serde_json::from_value::<FogKeys>(key.clone()).ok())
        .filter(|keys| !keys.is_empty());

    Ok(ImportSpec {
        entropy: data.root_entropy,
        first_block_index,
        fog_keys,
    })
}

/// Derive the BIP39 English phrase for hex entropy.
pub fn entropy_to_mnemonic(entropy: &str) -> Result<Mnemonic> {
    let bytes = hex::decode(entropy).context("Account entropy is not valid hex")?;
    Mnemonic::from_entropy_in(Language::English, &bytes)
        .context("Account entropy is not a valid seed")
}

/// Write an account's seed phrase and key material to `path`.
/// Refuses to replace an existing file.
pub fn write_export_file(account: &Account, secrets: &AccountSecrets, path: &Path) -> Result<()> {
    let mnemonic = entropy_to_mnemonic(&secrets.entropy)?;

    if path.exists() {
        bail!("File {} already exists.", path.display());
    }

    let export = json!({
        "seed_phrase": mnemonic.to_string(),
        "root_entropy": secrets.entropy,
        "account_id": account.account_id,
        "account_name": account.name,
        "account_key": secrets.account_key,
        "first_block_index": account.first_block_index,
    });

    let mut contents = serde_json::to_string_pretty(&export)?;
    contents.push('\n');
    fs::write(path, contents)?;
    Ok(())
}
