//! Audio-Code generation from Chromaprint feature vectors.
//!
//! The 32-byte digest is built from 4-byte SimHashes over big-endian
//! feature digests:
//! - 1 over the whole vector
//! - 4 over consecutive quarters
//! - 3 over thirds of the sorted vector

use iscc_core::{check_bits, simhash, IsccResult, MainType, SubType};
use tracing::debug;

use crate::encode_unit;
use crate::types::AudioCode;

/// Generates an Audio-Code from a signed Chromaprint vector.
///
/// An empty vector yields an all-zero digest.
pub fn gen_audio_code(cv: &[i32], bits: u32) -> IsccResult<AudioCode> {
    check_bits(bits)?;
    let digest = if cv.is_empty() {
        vec![0u8; 32]
    } else {
        let features: Vec<[u8; 4]> = cv.iter().map(|v| v.to_be_bytes()).collect();
        let mut sorted = cv.to_vec();
        sorted.sort_unstable();
        let sorted: Vec<[u8; 4]> = sorted.iter().map(|v| v.to_be_bytes()).collect();

        let mut digest = simhash(&features)?;
        for part in split_even(&features, 4) {
            digest.extend(part_hash(part)?);
        }
        for part in split_even(&sorted, 3) {
            digest.extend(part_hash(part)?);
        }
        digest
    };

    let iscc = encode_unit(MainType::Content, SubType::Audio, bits, &digest)?;
    debug!(iscc = %iscc, features = cv.len(), "Generated Audio-Code");
    Ok(AudioCode { iscc })
}

fn part_hash(part: &[[u8; 4]]) -> IsccResult<Vec<u8>> {
    if part.is_empty() {
        Ok(vec![0u8; 4])
    } else {
        simhash(part)
    }
}

/// Splits `items` into `n` consecutive parts whose sizes differ by at most
/// one, larger parts first. Parts may be empty.
pub(crate) fn split_even<T>(items: &[T], n: usize) -> Vec<&[T]> {
    let (base, extra) = (items.len() / n, items.len() % n);
    let mut parts = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let end = start + base + usize::from(i < extra);
        parts.push(&items[start..end]);
        start = end;
    }
    parts
}
