//! Content Hash Value Object
//!
//! A validated, immutable hash of file content. Local and remote sites both
//! report checksums in this format so they can be compared directly.

use std::fmt;

use sha2::{Digest, Sha256};

/// Content hash value object
///
/// Wraps a SHA-256 hash string with the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Create a ContentHash from a hex digest (with or without prefix)
    pub fn new(raw_hash: &str) -> Self {
        let raw_hash = raw_hash.trim();
        if raw_hash.starts_with(Self::PREFIX) {
            Self(raw_hash.to_ascii_lowercase())
        } else {
            Self(format!("{}{}", Self::PREFIX, raw_hash.to_ascii_lowercase()))
        }
    }

    /// Compute the SHA-256 of raw bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        Self(format!("{}{:x}", Self::PREFIX, digest))
    }

    /// Get the full hash string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// A remote `sha256sum` that printed nothing yields an empty digest
    pub fn is_empty(&self) -> bool {
        self.hex().is_empty()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
