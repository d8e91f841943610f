//! Log record definitions
//!
//! Defines a single log line and its text codec.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::error::{Result, SlateError};

const FIELD_SEPARATOR: char = '\t';

/// A single record in the log
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Timestamp (unix millis) assigned when the mutation happened
    pub timestamp: u64,

    /// The key this record applies to
    pub key: String,

    /// The stored value, `None` for a tombstone
    pub value: Option<Value>,
}

impl Record {
    /// Create a live record
    pub fn live(timestamp: u64, key: impl Into<String>, value: Value) -> Self {
        Self {
            timestamp,
            key: key.into(),
            value: Some(value),
        }
    }

    /// Create a tombstone record
    pub fn tombstone(timestamp: u64, key: impl Into<String>) -> Self {
        Self {
            timestamp,
            key: key.into(),
            value: None,
        }
    }

    /// Returns true if this record marks a deletion
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }

    /// Encode as one newline-terminated log line
    ///
    /// Live: `timestamp\tkey\tjson\n`, tombstone: `timestamp\tkey\n`
    pub fn encode(&self) -> Result<String> {
        validate_key(&self.key)?;

        let line = match &self.value {
            Some(value) => format!(
                "{}{sep}{}{sep}{}\n",
                self.timestamp,
                self.key,
                serde_json::to_string(value)?,
                sep = FIELD_SEPARATOR
            ),
            None => format!("{}{}{}\n", self.timestamp, FIELD_SEPARATOR, self.key),
        };

        Ok(line)
    }

    /// Decode one log line (without its trailing newline)
    ///
    /// `line_no` is 1-based and only used for error reporting.
    pub fn decode(line: &str, line_no: usize) -> Result<Self> {
        let parse_error = |reason: String| SlateError::Parse {
            line: line_no,
            content: line.to_string(),
            reason,
        };

        let mut fields = line.splitn(3, FIELD_SEPARATOR);
        let timestamp = fields.next().unwrap_or_default();
        let key = fields.next().unwrap_or_default();
        // splitn keeps the remainder whole, tabs inside the payload included
        let payload = fields.next().unwrap_or_default().trim();

        if timestamp.is_empty() || key.is_empty() {
            return Err(parse_error("missing timestamp or key".to_string()));
        }

        let timestamp = timestamp
            .parse::<u64>()
            .map_err(|e| parse_error(format!("bad timestamp {:?}: {}", timestamp, e)))?;

        let value = if payload.is_empty() {
            None
        } else {
            let value = serde_json::from_str(payload)
                .map_err(|e| parse_error(format!("bad value: {}", e)))?;
            Some(value)
        };

        Ok(Self {
            timestamp,
            key: key.to_string(),
            value,
        })
    }
}

/// Reject keys the line grammar cannot carry
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(&['\t', '\n', '\r'][..]) {
        return Err(SlateError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Current wall-clock time in milliseconds since the unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
