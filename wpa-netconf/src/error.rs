// Error types for configuration store operations

//! Error types
//!
//! Every failure in this crate surfaces as a [`WpaError`]. Results that mean
//! "nothing needed to change" (record already present, SSID not found, no
//! country directive) are reported through `bool`/`Option` return values
//! instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, WpaError>;

/// Input violates a wpa_supplicant length constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// SSID length must be in 1..=32 bytes.
    #[error("SSID length must be in 1..32 (inclusive), got {len}")]
    SsidLength {
        /// Offending length in bytes.
        len: usize,
    },

    /// Passphrase length must be in 8..=63 bytes.
    #[error("Password length must be in 8..63 (inclusive), got {len}")]
    PasswordLength {
        /// Offending length in bytes.
        len: usize,
    },
}

/// Errors raised by configuration store operations and external tools.
#[derive(Debug, Error)]
pub enum WpaError {
    /// SSID or password rejected before any I/O took place.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The credential tool ran but reported failure.
    #[error("{tool} failed: {message}")]
    Derivation {
        /// Tool that was invoked.
        tool: String,
        /// Diagnostic text reported by the tool.
        message: String,
    },

    /// An external tool could not be started at all.
    #[error("failed to execute {tool}: {source}")]
    ToolSpawn {
        /// Tool that was invoked.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be read or written.
    #[error("configuration file {}: {source}", .path.display())]
    Storage {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A network record could not be delimited.
    #[error("malformed network record for ssid \"{ssid}\": {reason}")]
    MalformedRecord {
        /// SSID the record was looked up or built for.
        ssid: String,
        /// What was missing.
        reason: &'static str,
    },

    /// `wpa_cli reconfigure` exited with a failure status.
    #[error("{tool} reconfigure failed: {message}")]
    Reconfigure {
        /// Tool that was invoked.
        tool: String,
        /// Diagnostic text reported by the tool.
        message: String,
    },

    /// Interface name is unsafe to hand to an external tool.
    #[error("interface name contains invalid characters: '{name}'. Only alphanumeric, hyphens, and underscores are allowed")]
    InvalidInterface {
        /// Rejected interface name.
        name: String,
    },
}

impl WpaError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}
