//! Tests for the MobileCoin CLI.
//!
//! Tests cover:
//! - MOB/picoMOB conversion and fee accounting
//! - Configuration parsing
//! - Seed parsing and export files
//! - Wallet API request shaping and response decoding

#[cfg(test)]
mod amount_tests {
    use crate::amount::{Amount, PMOB_PER_MOB, ParseAmountError, TRANSACTION_FEE};

    #[test]
    fn parses_whole_mob() {
        assert_eq!("1".parse::<Amount>().unwrap(), Amount(PMOB_PER_MOB));
        assert_eq!("250".parse::<Amount>().unwrap(), Amount(250 * PMOB_PER_MOB));
        assert_eq!("0".parse::<Amount>().unwrap(), Amount(0));
    }

    #[test]
    fn parses_fractional_mob() {
        assert_eq!("0.25".parse::<Amount>().unwrap(), Amount(250_000_000_000));
        assert_eq!(".5".parse::<Amount>().unwrap(), Amount(500_000_000_000));
        assert_eq!("2.".parse::<Amount>().unwrap(), Amount(2 * PMOB_PER_MOB));
        assert_eq!(
            "1.000000000001".parse::<Amount>().unwrap(),
            Amount(PMOB_PER_MOB + 1)
        );
    }

    #[test]
    fn ignores_surrounding_whitespace_and_plus() {
        assert_eq!(" 1.5 ".parse::<Amount>().unwrap(), Amount(1_500_000_000_000));
        assert_eq!("+1".parse::<Amount>().unwrap(), Amount(PMOB_PER_MOB));
    }

    #[test]
    fn rejects_bad_amounts() {
        assert_eq!("".parse::<Amount>(), Err(ParseAmountError::Empty));
        assert_eq!("-1".parse::<Amount>(), Err(ParseAmountError::Negative));
        assert_eq!(
            "0.0000000000001".parse::<Amount>(),
            Err(ParseAmountError::TooPrecise)
        );
        assert!(matches!(
            "1.2.3".parse::<Amount>(),
            Err(ParseAmountError::Invalid(_))
        ));
        assert!(matches!(
            "abc".parse::<Amount>(),
            Err(ParseAmountError::Invalid(_))
        ));
        assert!(matches!(
            ".".parse::<Amount>(),
            Err(ParseAmountError::Invalid(_))
        ));
        assert_eq!(
            "99999999999999999999".parse::<Amount>(),
            Err(ParseAmountError::Overflow)
        );
    }

    #[test]
    fn trailing_zeros_beyond_precision_are_fine() {
        assert_eq!(
            "1.0000000000010000".parse::<Amount>().unwrap(),
            Amount(PMOB_PER_MOB + 1)
        );
    }

    #[test]
    fn displays_at_least_four_decimals() {
        assert_eq!(Amount(PMOB_PER_MOB).to_string(), "1.0000");
        assert_eq!(Amount(10_000_000_000).to_string(), "0.0100");
        assert_eq!(Amount(0).to_string(), "0.0000");
    }

    #[test]
    fn displays_small_amounts_without_losing_digits() {
        assert_eq!(Amount(1).to_string(), "0.000000000001");
        assert_eq!(Amount(PMOB_PER_MOB + 1).to_string(), "1.000000000001");
        assert_eq!(Amount(123_450_000_000).to_string(), "0.12345");
    }

    #[test]
    fn fee_is_one_hundredth_mob() {
        assert_eq!(TRANSACTION_FEE, "0.01".parse().unwrap());
    }

    #[test]
    fn checked_arithmetic() {
        let one = Amount(PMOB_PER_MOB);
        assert_eq!(one.checked_add(one), Some(Amount(2 * PMOB_PER_MOB)));
        assert_eq!(one.checked_sub(one), Some(Amount(0)));
        assert_eq!(Amount(0).checked_sub(one), None);
        assert_eq!(Amount(u64::MAX).checked_add(Amount(1)), None);
    }

    #[test]
    fn pmob_strings_round_trip() {
        let amount = Amount::from_pmob_str("1234567890123").unwrap();
        assert_eq!(amount.as_pmob(), 1_234_567_890_123);
        assert!(Amount::from_pmob_str("1.5").is_err());
        assert!(Amount::from_pmob_str("-3").is_err());
    }
}

#[cfg(test)]
mod config_tests {
    use std::io::Write;
    use std::path::PathBuf;

    use crate::config::Config;

    #[test]
    fn parses_hyphenated_keys() {
        let config = Config::parse(
            r#"{
                "executable": "/opt/mobilecoin/full-service",
                "ledger-db": "/var/lib/mobilecoin/ledger",
                "wallet-db": "/var/lib/mobilecoin/wallet/wallet.db",
                "peer": ["mc://node1.test.mobilecoin.com/"],
                "tx-source-url": ["https://ledger.example/node1/"],
                "logfile": "/tmp/wallet-server.log"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.executable,
            PathBuf::from("/opt/mobilecoin/full-service")
        );
        assert_eq!(
            config.wallet_db,
            PathBuf::from("/var/lib/mobilecoin/wallet/wallet.db")
        );
        assert_eq!(config.peer.len(), 1);
        assert_eq!(config.tx_source_url.len(), 1);
        assert!(config.fog_ingest_enclave_css.is_none());
        assert!(config.api_url.is_none());
    }

    #[test]
    fn peer_lists_default_to_empty() {
        let config = Config::parse(
            r#"{
                "executable": "full-service",
                "ledger-db": "ledger",
                "wallet-db": "wallet.db"
            }"#,
        )
        .unwrap();
        assert!(config.peer.is_empty());
        assert!(config.tx_source_url.is_empty());
        assert!(config.logfile.is_none());
    }

    #[test]
    fn reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"executable": "fs", "ledger-db": "l", "wallet-db": "w", "api-url": "http://localhost:9999/wallet"}}"#
        )
        .unwrap();

        let config = Config::parse(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            config.api_url.as_deref(),
            Some("http://localhost:9999/wallet")
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Config::parse("{not json").is_err());
        assert!(Config::parse("/no/such/config/file.json").is_err());
    }

    // One test so the env var mutations cannot race each other.
    #[test]
    fn api_url_honors_the_environment() {
        use crate::config::{CONFIG_ENV_VAR, DEFAULT_API_URL};

        std::env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(Config::api_url().unwrap(), DEFAULT_API_URL);

        // A present but malformed config is an error, never a silent
        // fallback to the default endpoint.
        std::env::set_var(CONFIG_ENV_VAR, "{this is not json");
        assert!(Config::api_url().is_err());

        std::env::set_var(CONFIG_ENV_VAR, "/no/such/config/file.json");
        assert!(Config::api_url().is_err());

        std::env::set_var(
            CONFIG_ENV_VAR,
            r#"{"executable": "fs", "ledger-db": "l", "wallet-db": "w",
                "api-url": "http://wallet.example:9090/wallet"}"#,
        );
        assert_eq!(
            Config::api_url().unwrap(),
            "http://wallet.example:9090/wallet"
        );

        // A valid config without api-url still gets the default.
        std::env::set_var(
            CONFIG_ENV_VAR,
            r#"{"executable": "fs", "ledger-db": "l", "wallet-db": "w"}"#,
        );
        assert_eq!(Config::api_url().unwrap(), DEFAULT_API_URL);

        std::env::remove_var(CONFIG_ENV_VAR);
    }
}

#[cfg(test)]
mod seed_tests {
    use std::io::Write;

    use crate::client::{Account, AccountSecrets};
    use crate::seed::{entropy_to_mnemonic, parse_import_source, write_export_file};

    const ZERO_ENTROPY: &str =
        "0000000000000000000000000000000000000000000000000000000000000000";

    // BIP39 test vector for 32 zero bytes.
    const ZERO_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn parses_hex_entropy() {
        let spec = parse_import_source(ZERO_ENTROPY).unwrap();
        assert_eq!(spec.entropy, ZERO_ENTROPY);
        assert_eq!(spec.first_block_index, None);
        assert_eq!(spec.fog_keys, None);
    }

    #[test]
    fn hex_entropy_is_normalized_to_lowercase() {
        let spec = parse_import_source(&ZERO_ENTROPY.to_uppercase()).unwrap();
        assert_eq!(spec.entropy, ZERO_ENTROPY);
    }

    #[test]
    fn short_hex_is_not_entropy() {
        // 16 bytes of hex is valid hex but not a root secret.
        assert!(parse_import_source("00112233445566778899aabbccddeeff").is_err());
    }

    #[test]
    fn parses_seed_phrase() {
        let spec = parse_import_source(ZERO_PHRASE).unwrap();
        assert_eq!(spec.entropy, ZERO_ENTROPY);
    }

    #[test]
    fn entropy_round_trips_through_mnemonic() {
        let mnemonic = entropy_to_mnemonic(ZERO_ENTROPY).unwrap();
        assert_eq!(mnemonic.to_string(), ZERO_PHRASE);

        let spec = parse_import_source(&mnemonic.to_string()).unwrap();
        assert_eq!(spec.entropy, ZERO_ENTROPY);
    }

    #[test]
    fn reads_export_file_with_block_and_fog_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "root_entropy": "{ZERO_ENTROPY}",
                "first_block_index": "123456",
                "account_key": {{
                    "view_private_key": "0a20aa",
                    "fog_report_url": "fog://fog.test.mobilecoin.com",
                    "fog_report_id": ""
                }}
            }}"#
        )
        .unwrap();

        let spec = parse_import_source(file.path().to_str().unwrap()).unwrap();
        assert_eq!(spec.entropy, ZERO_ENTROPY);
        assert_eq!(spec.first_block_index, Some(123456));
        let fog_keys = spec.fog_keys.unwrap();
        assert_eq!(
            fog_keys.fog_report_url.as_deref(),
            Some("fog://fog.test.mobilecoin.com")
        );
        assert_eq!(fog_keys.fog_report_id.as_deref(), Some(""));
        assert_eq!(fog_keys.fog_authority_spki, None);
    }

    #[test]
    fn export_file_without_fog_keys_yields_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "root_entropy": "{ZERO_ENTROPY}",
                "account_key": {{ "view_private_key": "0a20aa" }}
            }}"#
        )
        .unwrap();

        let spec = parse_import_source(file.path().to_str().unwrap()).unwrap();
        assert_eq!(spec.fog_keys, None);
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(parse_import_source("definitely not a seed").is_err());
    }

    fn test_account() -> Account {
        Account {
            account_id: "deadbeef00000000deadbeef00000000".to_owned(),
            name: "savings".to_owned(),
            main_address: "6UEtkm1rieLhuz2wvELP".to_owned(),
            first_block_index: Some("42".to_owned()),
        }
    }

    #[test]
    fn written_export_file_imports_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        let account = test_account();
        let secrets = AccountSecrets {
            entropy: ZERO_ENTROPY.to_owned(),
            account_key: serde_json::json!({ "view_private_key": "0a20aa" }),
        };
        write_export_file(&account, &secrets, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let data: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(data["seed_phrase"], ZERO_PHRASE);
        assert_eq!(data["root_entropy"], ZERO_ENTROPY);
        assert_eq!(data["account_name"], "savings");
        assert_eq!(data["first_block_index"], "42");

        let spec = parse_import_source(path.to_str().unwrap()).unwrap();
        assert_eq!(spec.entropy, ZERO_ENTROPY);
        assert_eq!(spec.first_block_index, Some(42));
    }

    #[test]
    fn export_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, "precious").unwrap();

        let secrets = AccountSecrets {
            entropy: ZERO_ENTROPY.to_owned(),
            account_key: serde_json::json!({}),
        };
        assert!(write_export_file(&test_account(), &secrets, &path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "precious");
    }
}

#[cfg(test)]
mod client_tests {
    use serde_json::json;

    use crate::amount::Amount;
    use crate::client::{Account, Balance, TransactionLog, Txo, envelope, send_params};

    #[test]
    fn envelope_has_api_version_two() {
        let request = envelope("get_account", json!({ "account_id": "abc" }), 7);
        assert_eq!(
            request,
            json!({
                "jsonrpc": "2.0",
                "api_version": "2",
                "id": 7,
                "method": "get_account",
                "params": { "account_id": "abc" },
            })
        );
    }

    #[test]
    fn send_amount_goes_in_the_value_key() {
        let params = send_params("abc123", Amount(990_000_000_000), "6UEtkm");
        assert_eq!(
            params,
            json!({
                "account_id": "abc123",
                "recipient_public_address": "6UEtkm",
                "value": "990000000000",
            })
        );
    }

    #[test]
    fn decodes_account_with_missing_name() {
        let account: Account = serde_json::from_value(json!({
            "account_id": "abc123",
            "main_address": "6UEtkm",
        }))
        .unwrap();
        assert_eq!(account.name, "");
        assert_eq!(account.first_block_index, None);
    }

    #[test]
    fn decodes_balance_strings() {
        let balance: Balance = serde_json::from_value(json!({
            "unspent_pmob": "1500000000000",
            "pending_pmob": "0",
            "is_synced": true,
            "account_block_index": "120000",
            "local_block_index": "120000",
            "network_block_index": "120050",
        }))
        .unwrap();
        assert_eq!(balance.unspent_pmob, Amount(1_500_000_000_000));
        assert_eq!(balance.pending_pmob, Some(Amount(0)));
        assert!(balance.is_synced);
        assert!(!balance.is_offline());
        assert_eq!(balance.total_blocks(), 120_050);
    }

    #[test]
    fn offline_balance_falls_back_to_local_height() {
        let balance: Balance = serde_json::from_value(json!({
            "unspent_pmob": "0",
            "is_synced": false,
            "account_block_index": "99",
            "local_block_index": "100",
            "network_block_index": "0",
        }))
        .unwrap();
        assert!(balance.is_offline());
        assert_eq!(balance.total_blocks(), 100);
    }

    #[test]
    fn decodes_txo_with_either_id_key() {
        let txo: Txo = serde_json::from_value(json!({
            "txo_id_hex": "aa00",
            "value_pmob": "10",
            "received_block_index": "5",
            "spent_block_index": "9",
        }))
        .unwrap();
        assert_eq!(txo.txo_id, "aa00");
        assert!(txo.is_spent());

        let txo: Txo = serde_json::from_value(json!({
            "txo_id": "bb11",
            "value_pmob": "10",
        }))
        .unwrap();
        assert_eq!(txo.txo_id, "bb11");
        assert!(!txo.is_spent());
    }

    #[test]
    fn decodes_transaction_log() {
        let log: TransactionLog = serde_json::from_value(json!({
            "value_pmob": "990000000000",
            "fee_pmob": "10000000000",
        }))
        .unwrap();
        assert_eq!(log.value_pmob, Amount(990_000_000_000));
        assert_eq!(log.fee_pmob, Amount(10_000_000_000));
    }
}

#[cfg(test)]
mod command_tests {
    use crate::amount::{Amount, PMOB_PER_MOB, TRANSACTION_FEE};
    use crate::client::Account;
    use crate::commands::{resolve_account_in, short_id};
    use crate::commands::send::compute_send_amounts;

    fn account(id: &str) -> Account {
        Account {
            account_id: id.to_owned(),
            name: String::new(),
            main_address: "addr".to_owned(),
            first_block_index: None,
        }
    }

    #[test]
    fn unique_prefix_resolves() {
        let accounts = vec![account("abc123"), account("def456")];
        let found = resolve_account_in(accounts, "ab").unwrap();
        assert_eq!(found.account_id, "abc123");
    }

    #[test]
    fn full_id_resolves() {
        let accounts = vec![account("abc123"), account("abd999")];
        let found = resolve_account_in(accounts, "abc123").unwrap();
        assert_eq!(found.account_id, "abc123");
    }

    #[test]
    fn ambiguous_prefix_is_an_error() {
        let accounts = vec![account("abc123"), account("abd999")];
        let err = resolve_account_in(accounts, "ab").unwrap_err();
        assert!(err.to_string().contains("abc123"));
        assert!(err.to_string().contains("abd999"));
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        assert!(resolve_account_in(vec![account("abc123")], "zz").is_err());
    }

    #[test]
    fn short_id_is_six_chars() {
        assert_eq!(short_id(&account("abcdef123456")), "abcdef");
        assert_eq!(short_id(&account("ab")), "ab");
    }

    #[test]
    fn short_id_survives_multibyte_ids() {
        // Byte six lands inside the euro sign; a bad server response
        // should not be able to panic the display path.
        assert_eq!(short_id(&account("abcde€fgh")), "abcde€fgh");
        assert_eq!(short_id(&account("αβγδεζ")), "αβγ");
    }

    #[test]
    fn send_amount_plus_fee() {
        let unspent = Amount(10 * PMOB_PER_MOB);
        let (amount, total) = compute_send_amounts(unspent, "2.5").unwrap();
        assert_eq!(amount, Amount(2_500_000_000_000));
        assert_eq!(total, amount.checked_add(TRANSACTION_FEE).unwrap());
    }

    #[test]
    fn send_all_empties_the_account() {
        let unspent = Amount(10 * PMOB_PER_MOB);
        let (amount, total) = compute_send_amounts(unspent, "all").unwrap();
        assert_eq!(total, unspent);
        assert_eq!(amount, unspent.checked_sub(TRANSACTION_FEE).unwrap());
    }

    #[test]
    fn send_all_needs_at_least_the_fee() {
        assert!(compute_send_amounts(Amount(1), "all").is_err());
    }

    #[test]
    fn send_rejects_garbage_amounts() {
        let unspent = Amount(PMOB_PER_MOB);
        assert!(compute_send_amounts(unspent, "ten").is_err());
        assert!(compute_send_amounts(unspent, "-1").is_err());
    }
}
