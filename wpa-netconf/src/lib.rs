// wpa_supplicant network configuration manager
// Shared modules for the CLI and tests

#![warn(missing_docs)]

//! wpa_supplicant network configuration manager
//!
//! This library keeps a `wpa_supplicant.conf` style file up to date so an
//! embedded device can auto-join known wireless networks. All edits are plain
//! text search/splice operations: content the library does not understand
//! (other directives, comments, formatting) is carried through untouched.
//!
//! # Main Components
//!
//! - [`validate`]: SSID and password length checks
//! - [`deriver`]: Credential derivation via `wpa_passphrase`
//! - [`builder`]: Network record construction
//! - [`document`]: Text model of the configuration file (header + network records)
//! - [`store`]: Read-modify-write operations against the configuration file
//! - [`reconfigure`]: Ask `wpa_supplicant` to re-read its configuration
//! - [`request`]: `key=value` network request files
//! - [`config`]: Tool configuration file parsing and validation
//! - [`error`]: Error types shared by all of the above

pub mod builder;
pub mod config;
pub mod deriver;
pub mod document;
pub mod error;
pub mod reconfigure;
pub mod request;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{Result, ValidationError, WpaError};
