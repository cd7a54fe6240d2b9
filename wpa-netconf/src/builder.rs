// Builds network={...} records for wpa_supplicant

//! Network record construction
//!
//! Builds the `network={ ... }` text for a single network. Nothing is written
//! to disk here; the result is handed to [`crate::store::WpaConfigStore::append`].

use crate::deriver::CredentialDeriver;
use crate::document::{strip_comment_lines, NETWORK_CLOSE, NETWORK_OPEN};
use crate::error::{Result, WpaError};
use crate::validate::{check_password, check_ssid};

/// Record for a network without a password
fn open_network(ssid: &str) -> String {
    format!(
        "{}\n\tssid=\"{}\"\n\tkey_mgmt=NONE\n{}\n",
        NETWORK_OPEN, ssid, NETWORK_CLOSE
    )
}

/// Insert `\tpriority=<priority>` before the last standalone `}` line
fn add_priority(record: &str, ssid: &str, priority: u32) -> Result<String> {
    let priority_line = format!("\tpriority={}", priority);
    let mut lines: Vec<&str> = record.lines().collect();
    let closing = lines
        .iter()
        .rposition(|line| line.trim() == NETWORK_CLOSE)
        .ok_or_else(|| WpaError::MalformedRecord {
            ssid: ssid.to_string(),
            reason: "no closing brace to place priority before",
        })?;

    lines.insert(closing, &priority_line);
    Ok(lines.join("\n") + "\n")
}

/// Build the configuration text for one network.
///
/// With a password the record comes from `deriver` (normally
/// `wpa_passphrase`); without one an open `key_mgmt=NONE` record is
/// generated. Comment lines are dropped and, if `priority` is set, a
/// `priority=` line is placed just before the closing brace.
///
/// # Errors
///
/// - [`WpaError::Validation`] if the SSID or password length is invalid
/// - any error reported by the deriver
/// - [`WpaError::MalformedRecord`] if a priority is requested but the derived
///   text has no closing brace
pub fn build_network_record<D>(
    deriver: &D,
    ssid: &str,
    password: Option<&str>,
    priority: Option<u32>,
) -> Result<String>
where
    D: CredentialDeriver + ?Sized,
{
    check_ssid(ssid)?;
    if let Some(password) = password {
        check_password(password)?;
    }

    let record = match password {
        Some(password) => deriver.derive(ssid, password)?,
        None => open_network(ssid),
    };
    let mut record = strip_comment_lines(&record);
    if !record.is_empty() && !record.ends_with('\n') {
        record.push('\n');
    }

    match priority {
        Some(priority) => add_priority(&record, ssid, priority),
        None => Ok(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Mimics `wpa_passphrase` output, including its plaintext comment
    struct StubDeriver {
        calls: Cell<usize>,
    }

    impl StubDeriver {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl CredentialDeriver for StubDeriver {
        fn derive(&self, ssid: &str, passphrase: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!(
                "network={{\n\tssid=\"{}\"\n\t#psk=\"{}\"\n\tpsk=0123abcd\n}}\n",
                ssid, passphrase
            ))
        }
    }

    struct FailingDeriver;

    impl CredentialDeriver for FailingDeriver {
        fn derive(&self, _ssid: &str, _passphrase: &str) -> Result<String> {
            Err(WpaError::Derivation {
                tool: "wpa_passphrase".to_string(),
                message: "Passphrase must be 8..63 characters".to_string(),
            })
        }
    }

    #[test]
    fn test_open_network() {
        let deriver = StubDeriver::new();
        let record = build_network_record(&deriver, "Open", None, None).unwrap();
        assert_eq!(record, "network={\n\tssid=\"Open\"\n\tkey_mgmt=NONE\n}\n");
        assert_eq!(record.lines().count(), 4);
        assert!(!record.contains("priority"));
        assert_eq!(deriver.calls.get(), 0);
    }

    #[test]
    fn test_password_network_uses_deriver() {
        let deriver = StubDeriver::new();
        let record = build_network_record(&deriver, "P", Some("12345678"), None).unwrap();
        assert_eq!(record, "network={\n\tssid=\"P\"\n\tpsk=0123abcd\n}\n");
        assert!(!record.contains("12345678"));
        assert_eq!(deriver.calls.get(), 1);
    }

    #[test]
    fn test_priority_before_closing_brace() {
        let deriver = StubDeriver::new();
        let record = build_network_record(&deriver, "P", Some("12345678"), Some(2)).unwrap();
        let lines: Vec<&str> = record.lines().collect();
        assert_eq!(lines.last(), Some(&"}"));
        assert_eq!(lines[lines.len() - 2], "\tpriority=2");
    }

    #[test]
    fn test_open_network_priority() {
        let deriver = StubDeriver::new();
        let record = build_network_record(&deriver, "Open", None, Some(3)).unwrap();
        assert_eq!(
            record,
            "network={\n\tssid=\"Open\"\n\tkey_mgmt=NONE\n\tpriority=3\n}\n"
        );
    }

    #[test]
    fn test_add_priority_uses_last_closing_brace() {
        let malformed = "network={\n\tssid=\"A\"\n}\n\tpsk=1\n  }\n";
        let record = add_priority(malformed, "A", 1).unwrap();
        assert_eq!(record, "network={\n\tssid=\"A\"\n}\n\tpsk=1\n\tpriority=1\n  }\n");
    }

    #[test]
    fn test_add_priority_without_closing_brace() {
        let err = add_priority("network={\n\tssid=\"A\"\n", "A", 1).unwrap_err();
        assert!(matches!(err, WpaError::MalformedRecord { .. }));
    }

    #[test]
    fn test_invalid_ssid_rejected_before_derivation() {
        let deriver = StubDeriver::new();
        let err = build_network_record(&deriver, "", Some("12345678"), None).unwrap_err();
        assert!(matches!(err, WpaError::Validation(crate::ValidationError::SsidLength { .. })));

        let long = "a".repeat(33);
        assert!(build_network_record(&deriver, &long, None, None).is_err());
        assert_eq!(deriver.calls.get(), 0);
    }

    #[test]
    fn test_invalid_password_rejected_before_derivation() {
        let deriver = StubDeriver::new();
        let err = build_network_record(&deriver, "P", Some("short"), None).unwrap_err();
        assert!(matches!(
            err,
            WpaError::Validation(crate::ValidationError::PasswordLength { len: 5 })
        ));
        assert_eq!(deriver.calls.get(), 0);
    }

    #[test]
    fn test_deriver_failure_propagates() {
        let err = build_network_record(&FailingDeriver, "P", Some("12345678"), None).unwrap_err();
        match err {
            WpaError::Derivation { message, .. } => assert!(message.contains("8..63")),
            other => panic!("expected derivation error, got {:?}", other),
        }
    }
}
