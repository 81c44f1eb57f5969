//! Content hashing for deterministic rendering verification.
//!
//! Produces a SHA-256 hash of canvas pixels or encoded bytes, so identical
//! requests can be checked for bit-exact output.

use sha2::{Digest, Sha256};

use crate::canvas::Canvas;

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Compute the content hash of a canvas.
pub fn hash_canvas(canvas: &Canvas) -> ContentHash {
    let mut hasher = Sha256::new();
    // Dimensions go in first so same-length buffers of different shapes differ.
    hasher.update(canvas.width.to_le_bytes());
    hasher.update(canvas.height.to_le_bytes());
    hasher.update(&canvas.data);
    finish(hasher)
}

/// Compute the content hash of an encoded byte buffer (e.g. a PNG).
pub fn hash_bytes(data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    finish(hasher)
}

fn finish(hasher: Sha256) -> ContentHash {
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    ContentHash::from_bytes(bytes)
}
