// Read-modify-write access to the wpa_supplicant configuration file

//! Configuration file store
//!
//! Every operation reads the whole file, works on a [`WpaDocument`] in memory
//! and, if anything changed, writes the whole file back. There is no cache,
//! lock or journal.
//!
//! # Concurrency
//!
//! Two processes mutating the same file race: both can read before either
//! writes, and the second write silently discards the first one's change
//! (last writer wins). A single administrative agent per device is assumed.
//! A failure between the read and the write leaves the file as it was before
//! the call, or partially written if the write itself fails.

use crate::document::{strip_comment_lines, ExistsOptions, WpaDocument};
use crate::error::{Result, WpaError};
use std::fs;
use std::path::{Path, PathBuf};

/// Operations on one wpa_supplicant configuration file
#[derive(Debug, Clone)]
pub struct WpaConfigStore {
    path: PathBuf,
}

impl WpaConfigStore {
    /// Create a store for the file at `path`. The file is not touched until
    /// an operation runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the configuration file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current file contents
    pub fn load(&self) -> Result<WpaDocument> {
        fs::read_to_string(&self.path)
            .map(WpaDocument::new)
            .map_err(|e| WpaError::storage(&self.path, e))
    }

    fn save(&self, document: &WpaDocument) -> Result<()> {
        fs::write(&self.path, document.as_str()).map_err(|e| WpaError::storage(&self.path, e))
    }

    /// Check if a network record is already present, ignoring differences
    /// selected by `options`
    pub fn exists(&self, record: &str, options: ExistsOptions) -> Result<bool> {
        Ok(self.load()?.contains_record(record, options))
    }

    /// Append a network record unless an equivalent one is already present.
    ///
    /// Returns `Ok(false)` without writing if the record exists (comments and
    /// blank lines ignored), `Ok(true)` if it was appended.
    pub fn append(&self, record: &str) -> Result<bool> {
        let mut document = self.load()?;
        if document.contains_record(record, ExistsOptions::default()) {
            log::debug!("Network already present in {}", self.path.display());
            return Ok(false);
        }

        document.append_record(&strip_comment_lines(record));
        self.save(&document)?;
        log::info!("Added network to {}", self.path.display());
        Ok(true)
    }

    /// Remove the first network record whose SSID is exactly `ssid`.
    ///
    /// Returns `Ok(false)` if no record matches. When several records share
    /// the SSID only the first is removed; call again or use
    /// [`WpaConfigStore::delete_all_by_ssid`] to remove the rest.
    pub fn delete_by_ssid(&self, ssid: &str) -> Result<bool> {
        let mut document = self.load()?;
        if !document.remove_network(ssid)? {
            log::debug!("No network '{}' in {}", ssid, self.path.display());
            return Ok(false);
        }

        self.save(&document)?;
        log::info!("Deleted network '{}' from {}", ssid, self.path.display());
        Ok(true)
    }

    /// Remove every network record whose SSID is exactly `ssid`, in a single
    /// read and write. Returns the number of records removed.
    pub fn delete_all_by_ssid(&self, ssid: &str) -> Result<usize> {
        let mut document = self.load()?;
        let removed = document.remove_all_networks(ssid)?;
        if removed > 0 {
            self.save(&document)?;
            log::info!(
                "Deleted {} network(s) '{}' from {}",
                removed,
                ssid,
                self.path.display()
            );
        }
        Ok(removed)
    }

    /// Number of records that mention `ssid="<ssid>"`
    pub fn ssid_count(&self, ssid: &str) -> Result<usize> {
        Ok(self.load()?.ssid_count(ssid))
    }

    /// Get the value of the `country=` directive, if present
    pub fn country(&self) -> Result<Option<String>> {
        Ok(self.load()?.country().map(str::to_string))
    }

    /// Set the `country=` directive, replacing an existing one in place
    pub fn upsert_country(&self, country: &str) -> Result<()> {
        let mut document = self.load()?;
        document.set_country(country);
        self.save(&document)?;
        log::info!("Set country={} in {}", country, self.path.display());
        Ok(())
    }
}
