// Shared configuration types

//! Shared data structures
//!
//! Configuration structures deserialized from the tool's TOML file.

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// General configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    /// wpa_supplicant configuration file to manage
    #[serde(default = "default_wpa_config_file")]
    pub wpa_config_file: PathBuf,
    /// Wireless interface to reconfigure; `None` reconfigures all interfaces
    #[serde(default = "default_interface")]
    pub interface: Option<String>,
    /// Country written when a network is added to a file without one
    #[serde(default = "default_country")]
    pub default_country: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// External tool locations
#[derive(Debug, Deserialize, Clone)]
pub struct ToolsConfig {
    #[serde(default = "default_wpa_passphrase")]
    pub wpa_passphrase: String,
    #[serde(default = "default_wpa_cli")]
    pub wpa_cli: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            wpa_config_file: default_wpa_config_file(),
            interface: default_interface(),
            default_country: default_country(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            wpa_passphrase: default_wpa_passphrase(),
            wpa_cli: default_wpa_cli(),
        }
    }
}

// Default values for configuration
fn default_wpa_config_file() -> PathBuf {
    PathBuf::from("/etc/wpa_supplicant/wpa_supplicant.conf")
}

fn default_interface() -> Option<String> {
    Some("wlan0".to_string())
}

fn default_country() -> String {
    "US".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_wpa_passphrase() -> String {
    "wpa_passphrase".to_string()
}

fn default_wpa_cli() -> String {
    "wpa_cli".to_string()
}
