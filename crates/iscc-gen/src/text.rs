//! Text-Code generation.

use iscc_core::text::text_collapse;
use iscc_core::{check_bits, minhash256, sliding_window, xxh32, IsccResult, MainType, SubType};
use tracing::debug;

use crate::encode_unit;
use crate::types::TextCode;

/// Character n-gram width for text features.
const NGRAM_WIDTH: usize = 13;

/// Generates a Text-Code from plain text.
///
/// The text is collapsed, split into 13-character n-grams, each hashed with
/// xxh32, and the features are MinHashed.
pub fn gen_text_code(text: &str, bits: u32) -> IsccResult<TextCode> {
    check_bits(bits)?;
    let collapsed = text_collapse(text);
    let features: Vec<u32> = sliding_window(&collapsed, NGRAM_WIDTH)?
        .into_iter()
        .map(|ngram| xxh32(ngram.as_bytes()))
        .collect();
    let iscc = encode_unit(MainType::Content, SubType::TEXT, bits, &minhash256(&features))?;
    let characters = collapsed.chars().count();
    debug!(iscc = %iscc, characters, features = features.len(), "Generated Text-Code");
    Ok(TextCode { iscc, characters })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_empty() {
        let result = gen_text_code("", 64).unwrap();
        assert_eq!(result.iscc, "ISCC:EAASL4F2WZY7KBXB");
        assert_eq!(result.characters, 0);
    }

    #[test]
    fn test_text_hello_world() {
        let result = gen_text_code("Hello World", 64).unwrap();
        assert_eq!(result.iscc, "ISCC:EAASKDNZNYGUUF5A");
        assert_eq!(result.characters, 10);
    }

    #[test]
    fn test_text_normalization_invariance() {
        let a = gen_text_code("Hello World", 64).unwrap();
        let b = gen_text_code("  hello,\n WORLD!  ", 64).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_bit_lengths() {
        let short = gen_text_code("Hello World", 64).unwrap();
        let long = gen_text_code("Hello World", 256).unwrap();
        assert_eq!(long.iscc.len(), "ISCC:".len() + 55);
        // Both share the first 8 digest bytes
        let a = iscc_core::decode(&short.iscc).unwrap();
        let b = iscc_core::decode(&long.iscc).unwrap();
        assert_eq!(a.digest(), &b.digest()[..8]);
        assert!(gen_text_code("Hello", 100).is_err());
    }
}
