// Credential derivation via wpa_passphrase

//! Credential derivation
//!
//! Turns an SSID/passphrase pair into a `network={ ... }` fragment carrying
//! the derived PSK. The default implementation shells out to `wpa_passphrase`;
//! the [`CredentialDeriver`] trait lets callers and tests plug in their own.

use crate::error::{Result, WpaError};
use std::process::Command;

/// Produces an encrypted network record fragment for an SSID/passphrase pair.
pub trait CredentialDeriver {
    /// Derive the fragment. The output may contain `#` comment lines.
    fn derive(&self, ssid: &str, passphrase: &str) -> Result<String>;
}

/// Runs `wpa_passphrase <ssid> <passphrase>` synchronously.
///
/// No timeout is applied here; callers that need one must enforce it around
/// the call.
#[derive(Debug, Clone)]
pub struct WpaPassphrase {
    program: String,
}

impl WpaPassphrase {
    /// Use the given executable (name or path) instead of `wpa_passphrase`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Get the executable that will be invoked
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for WpaPassphrase {
    fn default() -> Self {
        Self::new("wpa_passphrase")
    }
}

impl CredentialDeriver for WpaPassphrase {
    fn derive(&self, ssid: &str, passphrase: &str) -> Result<String> {
        log::debug!("Deriving credentials for '{}' with {}", ssid, self.program);

        // Arguments go straight to execve, no shell is involved
        let output = Command::new(&self.program)
            .args([ssid, passphrase])
            .output()
            .map_err(|source| WpaError::ToolSpawn {
                tool: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            // wpa_passphrase reports argument errors on stdout
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(WpaError::Derivation {
                tool: self.program.clone(),
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
