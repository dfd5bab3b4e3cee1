//! Hash functions used by the generators.
//!
//! - BLAKE3 (default mode, 256-bit) for Instance-Codes, Meta n-grams and `metahash`
//! - xxHash32 (seed 0) for Text and Data features
//! - Multihash rendering of BLAKE3 digests (`1e20` prefix)

use xxhash_rust::xxh32::xxh32 as xxh32_seeded;

/// Multihash prefix for a 32-byte BLAKE3 digest (code 0x1e, length 0x20).
pub const BLAKE3_MULTIHASH_PREFIX: &str = "1e20";

/// Computes BLAKE3 hash in default mode with 256-bit output.
///
/// # Example
/// ```
/// use iscc_core::blake3_hash;
///
/// let hash = blake3_hash(&[]);
/// assert_eq!(
///     hex::encode(hash),
///     "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
/// );
/// ```
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Incremental BLAKE3 hasher for streamed input.
#[derive(Debug, Clone)]
pub struct Blake3Hasher {
    inner: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new BLAKE3 hasher.
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Updates the hasher with additional data.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Returns the 32-byte output for the data seen so far.
    pub fn finalize(&self) -> [u8; 32] {
        *self.inner.finalize().as_bytes()
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes xxHash32 with seed 0.
pub fn xxh32(data: &[u8]) -> u32 {
    xxh32_seeded(data, 0)
}

/// Renders a BLAKE3 digest as a hex multihash (`1e20` + 64 hex chars).
pub fn multihash_blake3(digest: &[u8; 32]) -> String {
    format!("{BLAKE3_MULTIHASH_PREFIX}{}", hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_anchors() {
        assert_eq!(
            hex::encode(blake3_hash(&[0x00])),
            "2d3adedff11b61f14c886e35afa036736dcd87a74d27b5c1510225d0f592e213"
        );
        assert_eq!(
            hex::encode(blake3_hash(&[0xFF])),
            "99d44d377bc5936d8cb7f5df90713d84c7587739b4724d3d2f9af1ee0e4c8efd"
        );
    }

    #[test]
    fn test_incremental_hasher() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"Hello, ");
        hasher.update(b"World!");
        assert_eq!(hasher.finalize(), blake3_hash(b"Hello, World!"));
    }

    #[test]
    fn test_xxh32_anchors() {
        assert_eq!(xxh32(b""), 0x02cc_5d05);
        assert_eq!(xxh32(b"a"), 0x550d_7456);
    }

    #[test]
    fn test_multihash_blake3() {
        let mh = multihash_blake3(&blake3_hash(b""));
        assert_eq!(
            mh,
            "1e20af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
        assert_eq!(mh.len(), 68);
    }
}
