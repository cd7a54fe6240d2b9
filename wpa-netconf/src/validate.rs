// SSID and password length validation

//! SSID and password validation
//!
//! Length limits follow wpa_supplicant: an SSID is 1 to 32 bytes, a WPA
//! passphrase is 8 to 63 bytes. Content is not restricted.

use crate::error::ValidationError;

/// Maximum SSID length per IEEE 802.11.
pub const MAX_SSID_LEN: usize = 32;

/// Minimum WPA passphrase length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum WPA passphrase length (64 would be a raw hex PSK).
pub const MAX_PASSWORD_LEN: usize = 63;

/// Check if an SSID has a valid length
pub fn is_valid_ssid(ssid: &str) -> bool {
    (1..=MAX_SSID_LEN).contains(&ssid.len())
}

/// Check if a WPA passphrase has a valid length
pub fn is_valid_password(password: &str) -> bool {
    (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.len())
}

/// Like [`is_valid_ssid`], but reports the violation.
pub fn check_ssid(ssid: &str) -> Result<(), ValidationError> {
    if is_valid_ssid(ssid) {
        Ok(())
    } else {
        Err(ValidationError::SsidLength { len: ssid.len() })
    }
}

/// Like [`is_valid_password`], but reports the violation.
pub fn check_password(password: &str) -> Result<(), ValidationError> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(ValidationError::PasswordLength {
            len: password.len(),
        })
    }
}
