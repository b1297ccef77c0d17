//! File-hash indicators submitted for lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash family of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorType {
    Md5,
    Sha1,
    Sha256,
}

impl IndicatorType {
    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            IndicatorType::Md5 => 16,
            IndicatorType::Sha1 => 20,
            IndicatorType::Sha256 => 32,
        }
    }

    /// Detect the hash family from a hex string. Returns None if `value` is
    /// not hex or has no matching digest length.
    pub fn detect(value: &str) -> Option<Self> {
        let bytes = hex::decode(value).ok()?;
        [IndicatorType::Md5, IndicatorType::Sha1, IndicatorType::Sha256]
            .into_iter()
            .find(|t| t.digest_len() == bytes.len())
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndicatorType::Md5 => "MD5",
            IndicatorType::Sha1 => "SHA1",
            IndicatorType::Sha256 => "SHA256",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("'{0}' is not an MD5, SHA1 or SHA256 hex digest")]
    NotAHash(String),
}

/// A single hash to look up. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Indicator {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: IndicatorType,
}

impl Indicator {
    pub fn new(value: impl Into<String>, kind: IndicatorType) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Parse a raw hash string, trimming whitespace and lowercasing it.
    pub fn parse(raw: &str) -> Result<Self, IndicatorError> {
        let value = raw.trim().to_ascii_lowercase();
        match IndicatorType::detect(&value) {
            Some(kind) => Ok(Self { value, kind }),
            None => Err(IndicatorError::NotAHash(raw.trim().to_string())),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}
