//! ISCC Core - Header codec, unit types, and similarity primitives.
//!
//! This crate provides:
//! - The ISCC header/digest codec (varnibble header, base32 units, composite decomposition)
//! - Type enums for the header fields (MainType, SubType, Version)
//! - Similarity primitives (SimHash, 256-bit MinHash, sliding windows)
//! - Hashing helpers (BLAKE3, xxh32, BLAKE3 multihash)
//! - Text normalization utilities consumed by the Meta and Text generators

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod codec;
pub mod error;
pub mod hash;
pub mod minhash;
pub mod simhash;
pub mod text;
pub mod types;

pub use codec::{decode, decompose, encode, split_units, Header, Unit, WireDecode, WireEncode};
pub use error::{IsccError, IsccResult};
pub use hash::{blake3_hash, multihash_blake3, xxh32};
pub use minhash::minhash256;
pub use simhash::{simhash, sliding_window, sliding_window_bytes};
pub use types::{MainType, SubType, Version};

/// Scheme prefix of a canonical ISCC string.
pub const ISCC_PREFIX: &str = "ISCC:";

/// Supported digest bit lengths for ISCC units, indexed by LengthIndex.
pub const SUPPORTED_BIT_LENGTHS: [u32; 8] = [32, 64, 96, 128, 160, 192, 224, 256];

/// Default digest bit length used by the generators.
pub const DEFAULT_BITS: u32 = 64;

/// Returns `Ok(())` if `bits` is one of [`SUPPORTED_BIT_LENGTHS`].
pub fn check_bits(bits: u32) -> IsccResult<()> {
    if SUPPORTED_BIT_LENGTHS.contains(&bits) {
        Ok(())
    } else {
        Err(IsccError::InvalidArgument(format!(
            "bits must be one of {SUPPORTED_BIT_LENGTHS:?}, got {bits}"
        )))
    }
}

/// Prepends the `ISCC:` scheme prefix to a bare base32 code.
pub fn with_prefix(code: &str) -> String {
    format!("{ISCC_PREFIX}{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bits_table() {
        for bits in SUPPORTED_BIT_LENGTHS {
            assert!(check_bits(bits).is_ok(), "{bits} should be accepted");
        }
        for bits in [0, 16, 48, 288, 512] {
            assert!(
                matches!(check_bits(bits), Err(IsccError::InvalidArgument(_))),
                "{bits} should be rejected"
            );
        }
    }

    #[test]
    fn test_with_prefix() {
        assert_eq!(with_prefix("AAAQAAAAAAAAAAAA"), "ISCC:AAAQAAAAAAAAAAAA");
    }
}
