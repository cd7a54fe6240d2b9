// wpa_supplicant reconfiguration signal

//! Reconfiguration signal
//!
//! After the configuration file changes, `wpa_cli reconfigure` makes
//! `wpa_supplicant` re-read it. The call is synchronous and has no timeout.

use crate::error::{Result, WpaError};
use std::process::Command;

/// Reply `wpa_cli` prints when the daemon accepted the request
const SUCCESS_REPLY: &[u8] = b"OK\n";

/// Validates that an interface name is safe to pass to an external tool.
/// Only allows alphanumeric characters, hyphens, and underscores.
///
/// # Errors
///
/// Returns [`WpaError::InvalidInterface`] if the name is empty or contains
/// any other character.
pub fn validate_interface_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(WpaError::InvalidInterface {
            name: name.to_string(),
        })
    }
}

/// Build the argument list for `wpa_cli`
fn reconfigure_args(interface: Option<&str>) -> Vec<&str> {
    let mut args = Vec::with_capacity(3);
    if let Some(iface) = interface {
        args.extend(["-i", iface]);
    }
    args.push("reconfigure");
    args
}

/// Ask wpa_supplicant to re-read its configuration file.
///
/// `interface` limits the request to one interface; `None` reconfigures all.
/// Returns `Ok(true)` if the daemon replied `OK`, `Ok(false)` for any other
/// reply (e.g. `FAIL`).
///
/// # Errors
///
/// Returns an error if the interface name is invalid, the tool cannot be
/// started, or it exits with a failure status.
pub fn reconfigure(tool: &str, interface: Option<&str>) -> Result<bool> {
    if let Some(iface) = interface {
        validate_interface_name(iface)?;
    }

    log::info!(
        "Requesting wpa_supplicant reconfigure ({})",
        interface.unwrap_or("all interfaces")
    );

    let output = Command::new(tool)
        .args(reconfigure_args(interface))
        .output()
        .map_err(|source| WpaError::ToolSpawn {
            tool: tool.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WpaError::Reconfigure {
            tool: tool.to_string(),
            message: stderr.trim().to_string(),
        });
    }

    Ok(output.stdout == SUCCESS_REPLY)
}
