//! SimHash and n-gram windows.
//!
//! SimHash sets each output bit by majority vote over the same bit of all
//! input digests. A bit is set when at least half of the digests have it set.

use crate::error::{IsccError, IsccResult};

/// Output length in bytes for an empty digest list.
pub const EMPTY_SIMHASH_LEN: usize = 32;

/// Computes the SimHash of equal-length digests.
///
/// The output has the same length as the inputs; empty input yields
/// [`EMPTY_SIMHASH_LEN`] zero bytes.
pub fn simhash<D: AsRef<[u8]>>(digests: &[D]) -> IsccResult<Vec<u8>> {
    let Some(first) = digests.first() else {
        return Ok(vec![0u8; EMPTY_SIMHASH_LEN]);
    };
    let len = first.as_ref().len();
    if let Some((index, digest)) = digests
        .iter()
        .enumerate()
        .find(|(_, d)| d.as_ref().len() != len)
    {
        return Err(IsccError::InvalidArgument(format!(
            "All digests must have equal length: expected {len} bytes, got {} at index {index}",
            digest.as_ref().len()
        )));
    }

    let mut counts = vec![0usize; len * 8];
    for digest in digests {
        for (i, byte) in digest.as_ref().iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) != 0 {
                    counts[i * 8 + bit] += 1;
                }
            }
        }
    }

    let n = digests.len();
    let mut out = vec![0u8; len];
    for (i, &count) in counts.iter().enumerate() {
        if count * 2 >= n {
            out[i / 8] |= 0x80 >> (i % 8);
        }
    }
    Ok(out)
}

fn check_width(width: usize) -> IsccResult<()> {
    if width < 2 {
        return Err(IsccError::InvalidArgument(format!(
            "Sliding window width must be at least 2, got {width}"
        )));
    }
    Ok(())
}

/// Returns overlapping character n-grams of `width` characters.
///
/// Input shorter than `width` (including the empty string) yields the whole
/// input as the only window.
pub fn sliding_window(text: &str, width: usize) -> IsccResult<Vec<&str>> {
    check_width(width)?;
    let starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    if starts.len() <= width {
        return Ok(vec![text]);
    }
    Ok((0..=starts.len() - width)
        .map(|i| {
            let end = starts.get(i + width).copied().unwrap_or(text.len());
            &text[starts[i]..end]
        })
        .collect())
}

/// Returns overlapping byte n-grams of `width` bytes.
///
/// Input shorter than `width` yields the whole input as the only window.
pub fn sliding_window_bytes(data: &[u8], width: usize) -> IsccResult<Vec<&[u8]>> {
    check_width(width)?;
    if data.len() <= width {
        return Ok(vec![data]);
    }
    Ok(data.windows(width).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simhash_majority() {
        assert_eq!(simhash(&[[0x80u8], [0x80], [0x00]]).unwrap(), vec![0x80]);
        assert_eq!(simhash(&[[0x0Fu8], [0xF0], [0xFF]]).unwrap(), vec![0xFF]);
        assert_eq!(simhash(&[[0x01u8], [0x00], [0x00]]).unwrap(), vec![0x00]);
    }

    #[test]
    fn test_simhash_tie_sets_bit() {
        assert_eq!(simhash(&[[0x80u8], [0x00]]).unwrap(), vec![0x80]);
    }

    #[test]
    fn test_simhash_single_is_identity() {
        let digest = [0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(simhash(&[digest]).unwrap(), digest.to_vec());
    }

    #[test]
    fn test_simhash_empty() {
        let empty: [&[u8]; 0] = [];
        assert_eq!(simhash(&empty).unwrap(), vec![0u8; 32]);
    }

    #[test]
    fn test_simhash_unequal_lengths() {
        let digests: Vec<&[u8]> = vec![&[1, 2], &[1, 2, 3]];
        let err = simhash(&digests).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_sliding_window_chars() {
        assert_eq!(sliding_window("abcd", 3).unwrap(), vec!["abc", "bcd"]);
        assert_eq!(sliding_window("äöüß", 2).unwrap(), vec!["äö", "öü", "üß"]);
        assert_eq!(sliding_window("ab", 3).unwrap(), vec!["ab"]);
        assert_eq!(sliding_window("abc", 3).unwrap(), vec!["abc"]);
        assert_eq!(sliding_window("", 3).unwrap(), vec![""]);
    }

    #[test]
    fn test_sliding_window_bytes() {
        let data = [1u8, 2, 3, 4, 5];
        let windows = sliding_window_bytes(&data, 4).unwrap();
        assert_eq!(windows, vec![&data[0..4], &data[1..5]]);
        assert_eq!(sliding_window_bytes(&data[..2], 4).unwrap(), vec![&data[..2]]);
    }

    #[test]
    fn test_sliding_window_rejects_narrow() {
        assert!(sliding_window("abc", 1).is_err());
        assert!(sliding_window_bytes(b"abc", 0).is_err());
    }
}
