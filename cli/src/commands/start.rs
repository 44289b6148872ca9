//! Start the local wallet server process.

use std::ffi::OsString;
use std::fs;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::config::Config;

pub fn run(offline: bool, bg: bool, verbose: bool) -> Result<()> {
    let config = Config::load()?;

    let mut args: Vec<OsString> = vec![
        "--ledger-db".into(),
        config.ledger_db.clone().into(),
        "--wallet-db".into(),
        config.wallet_db.clone().into(),
    ];
    if offline {
        args.push("--offline".into());
    } else {
        for peer in &config.peer {
            args.push("--peer".into());
            args.push(peer.into());
        }
        for url in &config.tx_source_url {
            args.push("--tx-source-url".into());
            args.push(url.into());
        }
    }
    if let Some(css) = &config.fog_ingest_enclave_css {
        args.push("--fog-ingest-enclave-css".into());
        args.push(css.clone().into());
    }

    if verbose {
        let rendered: Vec<String> = std::iter::once(config.executable.display().to_string())
            .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect();
        println!("{}", rendered.join(" ").dimmed());
    }

    let server_name = config
        .executable
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.executable.display().to_string());
    println!("Starting {server_name}...");

    // The server will not create its own storage directories.
    fs::create_dir_all(&config.ledger_db)
        .with_context(|| format!("Failed to create {}", config.ledger_db.display()))?;
    if let Some(parent) = config.wallet_db.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    if bg {
        let Some(logfile) = &config.logfile else {
            bail!("Starting in the background requires \"logfile\" in the configuration.");
        };
        let log = fs::File::create(logfile)
            .with_context(|| format!("Failed to open log file {}", logfile.display()))?;
        let log_err = log.try_clone()?;

        Command::new(&config.executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .spawn()
            .with_context(|| format!("Failed to start {server_name}"))?;

        println!("Started, view log at {}.", logfile.display());
        println!("Stop the server with \"mobcli stop\".");
    } else {
        let status = Command::new(&config.executable)
            .args(&args)
            .status()
            .with_context(|| format!("Failed to start {server_name}"))?;
        if !status.success() {
            bail!("{server_name} exited with {status}");
        }
    }

    Ok(())
}
