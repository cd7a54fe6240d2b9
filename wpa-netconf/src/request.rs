// key=value network request file parser

//! Network request files
//!
//! A request file lets someone without shell access queue a network, e.g. by
//! dropping it on the boot partition:
//!
//! ```text
//! # Priority is 1, 2 or 3 (or low/medium/high)
//! ssid=CampusNet
//! password=
//! priority=high
//! ```
//!
//! Comment lines and keys with empty values are ignored. Everything after the
//! first `=` is the value, kept byte-for-byte.

use anyhow::{Context, Result};
use std::collections::HashMap;

/// A network someone asked to have added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRequest {
    pub ssid: String,
    pub password: Option<String>,
    pub priority: Option<u32>,
}

/// Parse a priority given as a number or as `low`/`medium`/`high`
pub fn parse_priority(value: &str) -> Result<u32> {
    match value.trim().to_ascii_lowercase().as_str() {
        "l" | "low" => Ok(1),
        "m" | "medium" => Ok(2),
        "h" | "high" => Ok(3),
        other => other
            .parse()
            .with_context(|| format!("Invalid priority: {}", value)),
    }
}

/// Collect `key=value` pairs, skipping comments and empty values
fn parse_fields(text: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for line in text.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.trim().split_once('=') {
            if !key.is_empty() && !value.is_empty() {
                fields.insert(key.to_string(), value.to_string());
            }
        }
    }
    fields
}

impl NetworkRequest {
    /// Parse the contents of a request file.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no `ssid` or the priority is not a
    /// number or level name. Length limits are checked later, when the
    /// record is built.
    pub fn parse(text: &str) -> Result<Self> {
        let mut fields = parse_fields(text);

        let ssid = fields
            .remove("ssid")
            .context("Request file does not name an ssid")?;
        let priority = fields
            .remove("priority")
            .map(|p| parse_priority(&p))
            .transpose()?;

        Ok(Self {
            ssid,
            password: fields.remove("password"),
            priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "#No space after (=).\n\
        #Priority is an int value 1,2, or 3 (3 being prioritized the most).\n\
        #If no password/priority, leave empty or delete line.\n";

    #[test]
    fn test_parse_full_request() {
        let text = format!("{}ssid=CampusNet\npassword=hunter22\npriority=2\n", TEMPLATE);
        let request = NetworkRequest::parse(&text).unwrap();
        assert_eq!(
            request,
            NetworkRequest {
                ssid: "CampusNet".to_string(),
                password: Some("hunter22".to_string()),
                priority: Some(2),
            }
        );
    }

    #[test]
    fn test_parse_empty_values_are_absent() {
        let text = format!("{}ssid=Open\npassword=\npriority=\n", TEMPLATE);
        let request = NetworkRequest::parse(&text).unwrap();
        assert_eq!(request.ssid, "Open");
        assert_eq!(request.password, None);
        assert_eq!(request.priority, None);
    }

    #[test]
    fn test_parse_value_with_equals() {
        let request = NetworkRequest::parse("ssid=a=b\npassword=pass=word1\n").unwrap();
        assert_eq!(request.ssid, "a=b");
        assert_eq!(request.password.as_deref(), Some("pass=word1"));
    }

    #[test]
    fn test_parse_value_keeps_repeated_and_trailing_equals() {
        let request = NetworkRequest::parse("ssid=A\npassword=ab==cd1234\n").unwrap();
        assert_eq!(request.password.as_deref(), Some("ab==cd1234"));

        let request = NetworkRequest::parse("ssid=A\npassword=hunter22=\n").unwrap();
        assert_eq!(request.password.as_deref(), Some("hunter22="));

        let request = NetworkRequest::parse("ssid==Lab\n").unwrap();
        assert_eq!(request.ssid, "=Lab");
    }

    #[test]
    fn test_parse_missing_ssid() {
        assert!(NetworkRequest::parse(TEMPLATE).is_err());
        assert!(NetworkRequest::parse("ssid=\npassword=hunter22\n").is_err());
    }

    #[test]
    fn test_parse_invalid_priority() {
        assert!(NetworkRequest::parse("ssid=A\npriority=urgent\n").is_err());
    }

    #[test]
    fn test_parse_priority_levels() {
        assert_eq!(parse_priority("low").unwrap(), 1);
        assert_eq!(parse_priority("M").unwrap(), 2);
        assert_eq!(parse_priority("high").unwrap(), 3);
        assert_eq!(parse_priority(" 7 ").unwrap(), 7);
        assert!(parse_priority("-1").is_err());
    }
}
