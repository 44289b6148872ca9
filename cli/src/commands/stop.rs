//! Stop the local wallet server process.

use std::process::Command;

use anyhow::{Context, Result};

use crate::config::Config;

pub fn run(verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let server_name = config
        .executable
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.executable.display().to_string());

    if verbose {
        println!("Stopping {server_name}...");
    }

    let status = Command::new("killall")
        .arg(&server_name)
        .status()
        .context("Failed to run killall")?;

    if !status.success() {
        println!("The wallet server was not running.");
    }
    Ok(())
}
