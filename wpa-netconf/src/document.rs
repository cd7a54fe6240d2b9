// Text model of a wpa_supplicant configuration file

//! Configuration document model
//!
//! A configuration file is a Header (comments and global `key=value`
//! directives) followed by a Body of `network={ ... }` records separated by
//! blank lines. [`WpaDocument`] works on the raw text with search/splice
//! operations instead of parsing it, so anything it does not touch is written
//! back byte-for-byte.
//!
//! ```text
//! ctrl_interface=DIR=/var/run/wpa_supplicant GROUP=netdev
//! country=US
//!
//! network={
//!     ssid="HomeNet"
//!     psk=...
//! }
//! ```

use crate::error::{Result, WpaError};

/// Opening line of a network record
pub const NETWORK_OPEN: &str = "network={";

/// Closing line of a network record
pub const NETWORK_CLOSE: &str = "}";

/// Blank line followed by a record opening; marks where a record starts
const RECORD_MARKER: &str = "\n\nnetwork={";

const COUNTRY_KEY: &str = "country=";

/// True if the line's first non-whitespace character is `#`
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// True for empty and whitespace-only lines
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Remove comment lines, keeping the line endings of everything else
pub fn strip_comment_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !is_comment_line(line))
        .collect()
}

/// The exact `ssid="..."` directive searched for when locating a network
pub fn ssid_directive(ssid: &str) -> String {
    format!("ssid=\"{}\"", ssid)
}

/// Controls how text is normalised before an existence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistsOptions {
    /// Drop `#` comment lines from both sides
    pub ignore_comments: bool,
    /// Drop empty and whitespace-only lines from both sides
    pub ignore_blank_lines: bool,
}

impl Default for ExistsOptions {
    fn default() -> Self {
        Self {
            ignore_comments: true,
            ignore_blank_lines: true,
        }
    }
}

/// Normalise text for an existence check
/// Lines are rejoined with `\n`, so trailing newlines are not significant
pub fn normalize(text: &str, options: ExistsOptions) -> String {
    text.lines()
        .filter(|line| !(options.ignore_comments && is_comment_line(line)))
        .filter(|line| !(options.ignore_blank_lines && is_blank_line(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of the `}` on the first standalone closing line at or after `from`
fn closing_brace_after(text: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    for line in text[from..].split_inclusive('\n') {
        if line.trim() == NETWORK_CLOSE {
            let indent = line.len() - line.trim_start().len();
            return Some(offset + indent);
        }
        offset += line.len();
    }
    None
}

/// In-memory copy of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WpaDocument {
    text: String,
}

impl WpaDocument {
    /// Wrap existing file contents
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the current text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Check whether `record` already appears in the document.
    ///
    /// Both sides are normalised with `options` first, so a freshly derived
    /// record matches a stored one that differs only in comments or blank
    /// lines.
    pub fn contains_record(&self, record: &str, options: ExistsOptions) -> bool {
        normalize(&self.text, options).contains(&normalize(record, options))
    }

    /// Number of `ssid="<ssid>"` occurrences (case-sensitive)
    pub fn ssid_count(&self, ssid: &str) -> usize {
        self.text.matches(&ssid_directive(ssid)).count()
    }

    /// Value of the first `country=` line, if any
    pub fn country(&self) -> Option<&str> {
        self.text
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with(COUNTRY_KEY))
            .and_then(|line| line.split_once('='))
            .map(|(_, value)| value)
    }

    /// Split into (header, body) at the first line that opens a network record
    pub fn header_body(&self) -> (&str, &str) {
        let mut offset = 0;
        for line in self.text.split_inclusive('\n') {
            if line.trim().starts_with(NETWORK_OPEN) {
                return self.text.split_at(offset);
            }
            offset += line.len();
        }
        (&self.text, "")
    }

    /// Append a record at the end of the document.
    ///
    /// Non-empty documents are first padded so the record is preceded by
    /// exactly one blank line; the record itself is added as given.
    pub fn append_record(&mut self, record: &str) {
        if !self.text.is_empty() {
            if !self.text.ends_with('\n') {
                self.text.push('\n');
            }
            if !self.text.ends_with("\n\n") {
                self.text.push('\n');
            }
        }
        self.text.push_str(record);
    }

    /// Replace or add the `country=` directive in the header.
    ///
    /// Trailing blank lines are dropped from the header, the first existing
    /// `country=` line is rewritten (or a new one appended), and exactly one
    /// blank line separates the header from the untouched body.
    pub fn set_country(&mut self, value: &str) {
        let (header, body) = self.header_body();

        let mut lines: Vec<String> = header.split_inclusive('\n').map(String::from).collect();
        while lines.last().is_some_and(|line| is_blank_line(line)) {
            lines.pop();
        }

        let directive = format!("{}{}\n", COUNTRY_KEY, value);
        match lines
            .iter()
            .position(|line| line.trim().starts_with(COUNTRY_KEY))
        {
            Some(index) => lines[index] = directive,
            None => lines.push(directive),
        }

        // A header without a body may end mid-line
        for line in &mut lines {
            if !line.ends_with('\n') {
                line.push('\n');
            }
        }

        let mut text = lines.concat();
        text.push('\n');
        text.push_str(body);
        self.text = text;
    }

    /// Remove the lowest-offset record containing `ssid="<ssid>"`.
    ///
    /// The record spans from the nearest preceding blank line + `network={`
    /// through the next standalone `}` line. The blank line before the record
    /// goes with it, so neighbouring records keep a single separator. A
    /// record at the very start of the file (nothing but whitespace before
    /// it) is removed together with the blank lines that follow it.
    ///
    /// Returns `Ok(false)` if no record mentions the SSID.
    ///
    /// # Errors
    ///
    /// Returns [`WpaError::MalformedRecord`] if the SSID is found but no
    /// record boundary can be located around it.
    pub fn remove_network(&mut self, ssid: &str) -> Result<bool> {
        let Some(position) = self.text.find(&ssid_directive(ssid)) else {
            return Ok(false);
        };

        let malformed = |reason| WpaError::MalformedRecord {
            ssid: ssid.to_string(),
            reason,
        };

        let close = closing_brace_after(&self.text, position)
            .ok_or_else(|| malformed("no closing brace after ssid"))?;
        let mut end = close + NETWORK_CLOSE.len();

        let start = match self.text[..position].rfind(RECORD_MARKER) {
            Some(start) => {
                // The marker must open the record holding the ssid, not an earlier one
                let span = &self.text[start + 2..position];
                if span.lines().any(|line| line.trim() == NETWORK_CLOSE)
                    || span.matches(NETWORK_OPEN).count() > 1
                {
                    return Err(malformed("record is not preceded by a blank line"));
                }
                start
            }
            None => {
                let open = self.text[..position]
                    .rfind(NETWORK_OPEN)
                    .ok_or_else(|| malformed("no network={ before ssid"))?;
                if !is_blank_line(&self.text[..open]) {
                    return Err(malformed("no blank line before network={"));
                }
                let rest = &self.text[end..];
                end += rest.len() - rest.trim_start_matches(|c: char| c == '\n' || c == '\r').len();
                0
            }
        };

        log::debug!(
            "Removing network record for '{}' (bytes {}..{})",
            ssid,
            start,
            end
        );
        self.text.replace_range(start..end, "");
        Ok(true)
    }

    /// Remove every record for `ssid`, returning how many were removed
    pub fn remove_all_networks(&mut self, ssid: &str) -> Result<usize> {
        let mut removed = 0;
        while self.remove_network(ssid)? {
            removed += 1;
        }
        Ok(removed)
    }
}
