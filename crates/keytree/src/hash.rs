//! Digest configuration for cache key derivation.

use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Digest algorithm used to derive cache keys from path prefixes.
///
/// SHA-1 is the default so keys stay compatible with existing cache
/// layouts. Keys are derived from trusted path strings, not
/// attacker-controlled content, but SHA-256 is available where a
/// stronger digest is wanted; swapping the mechanism changes every
/// key, so pick one per tree and keep it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashMechanism {
    /// SHA-1, 40 hex characters per key (default)
    #[default]
    Sha1,
    /// SHA-256, 64 hex characters per key
    Sha256,
}

impl HashMechanism {
    /// Hex-encoded digest of `input`.
    #[must_use]
    pub fn digest_hex(self, input: &str) -> String {
        match self {
            Self::Sha1 => hex::encode(Sha1::digest(input.as_bytes())),
            Self::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
        }
    }

    /// Length in hex characters of keys produced by this mechanism.
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 => 64,
        }
    }
}
