//! Edge case tests across the workspace.
//!
//! # Test Categories
//! - Bit length validation
//! - Empty and minimal inputs
//! - Chunking boundaries
//! - Text normalization limits

use iscc_cdc::{cdc_chunks, ChunkingParams, params::MAX_AVG_CHUNK_SIZE};
use iscc_core::text::{text_collapse, text_trim};
use iscc_core::{simhash, sliding_window, IsccError};
use iscc_gen::meta::MAX_NAME_BYTES;
use iscc_gen::{
    gen_audio_code, gen_data_code, gen_image_code, gen_instance_code, gen_iscc_code,
    gen_meta_code, gen_text_code, gen_video_code,
};
use iscc_tests::vectors::*;

// ============================================================================
// Bit Lengths
// ============================================================================

/// Every generator rejects non-standard bit lengths with InvalidArgument.
#[test]
fn test_generators_reject_bad_bits() {
    for bits in [0, 8, 48, 100, 288, 512] {
        let errors = [
            gen_meta_code("x", None, None, bits).unwrap_err(),
            gen_text_code("x", bits).unwrap_err(),
            gen_image_code(&[0u8; 1024], bits).unwrap_err(),
            gen_audio_code(&[1], bits).unwrap_err(),
            gen_video_code(&[vec![0i32; 380]], bits).unwrap_err(),
            gen_data_code(b"x", bits).unwrap_err(),
            gen_instance_code(b"x", bits).unwrap_err(),
        ];
        for err in errors {
            assert!(matches!(err, IsccError::InvalidArgument(_)), "bits {bits}: {err}");
        }
    }
}

/// 32-bit units are valid on their own but too short for composites.
#[test]
fn test_32_bit_units() {
    let data = gen_data_code(b"abc", 32).unwrap();
    let instance = gen_instance_code(b"abc", 32).unwrap();
    assert!(gen_iscc_code(&[&data.iscc, &instance.iscc], false).is_err());
}

// ============================================================================
// Empty Inputs
// ============================================================================

#[test]
fn test_empty_inputs() {
    // Text and Data of empty input share the MinHash of xxh32("").
    let text = gen_text_code("", 64).unwrap();
    let data = gen_data_code(b"", 64).unwrap();
    assert_eq!(&text.iscc[7..], &data.iscc[7..]);
    assert_eq!(data.iscc, DATA_EMPTY);

    assert_eq!(gen_audio_code(&[], 64).unwrap().iscc, "ISCC:EIAQAAAAAAAAAAAA");
    let empty_frames: [Vec<i32>; 0] = [];
    assert!(gen_video_code(&empty_frames, 64).is_err());
    assert!(gen_meta_code("", None, None, 64).is_err());
    assert!(gen_meta_code("   \n\t ", None, None, 64).is_err());
}

/// SimHash of no digests is 32 zero bytes; mismatched lengths fail.
#[test]
fn test_simhash_edges() {
    let none: [&[u8]; 0] = [];
    assert_eq!(simhash(&none).unwrap(), vec![0u8; 32]);
    assert!(simhash(&[&[1u8, 2][..], &[1u8][..]]).is_err());
}

/// Sliding windows shorter than the width yield the whole input once.
#[test]
fn test_sliding_window_short_input() {
    assert_eq!(sliding_window("ab", 3).unwrap(), vec!["ab"]);
    assert_eq!(sliding_window("", 3).unwrap(), vec![""]);
    assert!(sliding_window("abc", 1).is_err());
}

// ============================================================================
// Chunking
// ============================================================================

/// Chunks always cover the input exactly.
#[test]
fn test_chunks_cover_input() {
    let data = iscc_tests::fixtures::lcg_data(33_333);
    for avg in [1, 64, 1024, 4096] {
        let chunks = cdc_chunks(&data, false, avg).unwrap();
        assert_eq!(chunks.concat(), data, "avg {avg}");
        let params = ChunkingParams::from_avg_size(avg).unwrap();
        assert!(chunks.iter().all(|c| c.len() <= params.max_size.max(1)));
    }
}

#[test]
fn test_chunking_average_limits() {
    assert!(cdc_chunks(b"abc", false, 0).is_err());
    assert!(cdc_chunks(b"abc", false, MAX_AVG_CHUNK_SIZE + 1).is_err());
    assert_eq!(cdc_chunks(b"", false, 1024).unwrap(), vec![&b""[..]]);
}

// ============================================================================
// Text Limits
// ============================================================================

/// Names are trimmed to the byte limit on a character boundary.
#[test]
fn test_meta_name_trimmed() {
    let name = "ä".repeat(100);
    let result = gen_meta_code(&name, None, None, 64).unwrap();
    assert!(result.name.len() <= MAX_NAME_BYTES);
    assert_eq!(result.name, "ä".repeat(MAX_NAME_BYTES / 2));
}

#[test]
fn test_text_helpers() {
    assert_eq!(text_trim("aé", 2), "a");
    assert_eq!(text_collapse(" Hello,  World! "), "helloworld");
}
