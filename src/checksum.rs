//! Fingerprints of record type metadata
//!
//! A fingerprint is the SHA256 of the container's JSON form. Two record types,
//! or one type before and after reconfiguration, share a fingerprint exactly
//! when all four slots are equal.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::file_data::FileData;

/// SHA256 fingerprint of a [`FileData`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute from a metadata container
    pub fn of(data: &FileData) -> Self {
        // Struct fields serialize in declaration order
        let canonical = serde_json::to_vec(data).unwrap_or_default();
        Self::from_bytes(&canonical)
    }

    /// Hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `data` still matches this fingerprint
    pub fn verify(&self, data: &FileData) -> bool {
        *self == Self::of(data)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}
