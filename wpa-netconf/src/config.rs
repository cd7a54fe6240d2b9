// Configuration file parser

//! Configuration file parsing and validation
//!
//! This module handles loading the tool's TOML configuration file and
//! validating its contents.

use crate::reconfigure::validate_interface_name;
use crate::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load configuration from TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

    let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate an ISO 3166-1 alpha-2 country code (e.g. `US`, `DE`)
pub fn validate_country_code(code: &str) -> Result<()> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        anyhow::bail!(
            "Invalid country code '{}' (expected two uppercase letters, e.g. US)",
            code
        );
    }
    Ok(())
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.general.wpa_config_file.as_os_str().is_empty() {
        anyhow::bail!("wpa_config_file cannot be empty");
    }

    if let Some(iface) = &config.general.interface {
        validate_interface_name(iface).context("Invalid interface")?;
    }

    validate_country_code(&config.general.default_country).context("Invalid default_country")?;

    if config.tools.wpa_passphrase.is_empty() {
        anyhow::bail!("tools.wpa_passphrase cannot be empty");
    }

    if config.tools.wpa_cli.is_empty() {
        anyhow::bail!("tools.wpa_cli cannot be empty");
    }

    Ok(())
}
