//! End-to-end generator tests.
//!
//! # Test Categories
//! - Conformance vectors through the public API
//! - Full ISCC-CODE workflow from content to composite
//! - Serialized result shapes

use iscc_core::{decode, decompose, MainType, SubType};
use iscc_gen::{
    conformance_report, conformance_selftest, gen_audio_code, gen_data_code, gen_image_code, gen_instance_code, gen_iscc_code,
    gen_meta_code, gen_mixed_code, gen_text_code, gen_video_code,
};
use iscc_tests::fixtures::{lcg_data, product_image, ramp_frame, wave_frame};
use iscc_tests::vectors::*;

// ============================================================================
// Conformance Vectors
// ============================================================================

#[test]
fn test_published_unit_vectors() {
    assert_eq!(
        gen_meta_code("Die Unendliche Geschichte", None, None, 64).unwrap().iscc,
        META_HELLO
    );
    assert_eq!(gen_text_code("Hello World", 64).unwrap().iscc, TEXT_HELLO_WORLD);
    assert_eq!(gen_data_code(b"\xff\x00", 64).unwrap().iscc, DATA_FF00);
    assert_eq!(gen_data_code(b"", 64).unwrap().iscc, DATA_EMPTY);

    let instance = gen_instance_code(b"", 64).unwrap();
    assert_eq!(instance.iscc, INSTANCE_EMPTY);
    assert_eq!(instance.datahash, DATAHASH_EMPTY);
}

/// The built-in conformance run covers the published codes above.
#[test]
fn test_conformance_selftest() {
    assert!(conformance_selftest());

    let report = conformance_report();
    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert!(report.total() >= 13);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["passed"], report.passed);
    assert_eq!(json["failures"].as_array().unwrap().len(), 0);
}

#[test]
fn test_composite_vectors() {
    let full = gen_iscc_code(&[META_HELLO, TEXT_HELLO_WORLD, DATA_FF00, INSTANCE_EMPTY], false)
        .unwrap();
    assert_eq!(full.iscc, ISCC_FULL);
    assert_eq!(
        gen_iscc_code(&[DATA_FF00, INSTANCE_EMPTY], false).unwrap().iscc,
        ISCC_SUM
    );
}

// ============================================================================
// Full Workflow
// ============================================================================

/// Builds every unit for an image asset and assembles them.
#[test]
fn test_image_asset_workflow() {
    let file = lcg_data(12_000);
    let meta = gen_meta_code("Sunset", Some("Over the sea"), None, 64).unwrap();
    let image = gen_image_code(&product_image(), 64).unwrap();
    let data = gen_data_code(&file, 64).unwrap();
    let instance = gen_instance_code(&file, 64).unwrap();

    let code = gen_iscc_code(&[&meta.iscc, &image.iscc, &data.iscc, &instance.iscc], false)
        .unwrap();
    let unit = decode(&code.iscc).unwrap();
    assert_eq!(unit.maintype(), MainType::Iscc);
    assert_eq!(unit.subtype(), SubType::Image);
    assert_eq!(unit.bit_length(), 256);

    let parts: Vec<String> = decompose(&code.iscc)
        .unwrap()
        .into_iter()
        .map(|c| format!("ISCC:{c}"))
        .collect();
    assert_eq!(parts, vec![meta.iscc, image.iscc, data.iscc, instance.iscc]);
}

/// Wider units are truncated to 64 bits inside a composite.
#[test]
fn test_composite_truncates_wide_units() {
    let file = lcg_data(5_000);
    let narrow = gen_iscc_code(
        &[
            gen_data_code(&file, 64).unwrap().iscc,
            gen_instance_code(&file, 64).unwrap().iscc,
        ],
        false,
    )
    .unwrap();
    let wide_units = gen_iscc_code(
        &[
            gen_data_code(&file, 256).unwrap().iscc,
            gen_instance_code(&file, 256).unwrap().iscc,
        ],
        false,
    )
    .unwrap();
    assert_eq!(narrow, wide_units);
}

/// Mixed-Codes are Content-Codes and combine like any other.
#[test]
fn test_mixed_code_in_composite() {
    let video = gen_video_code(&[ramp_frame(), wave_frame()], 64).unwrap();
    let audio = gen_audio_code(&[1, -2, 3, -4, 5], 64).unwrap();
    let mixed = gen_mixed_code(&[&video.iscc, &audio.iscc], 64).unwrap();
    assert_eq!(decode(&mixed.iscc).unwrap().subtype(), SubType::Mixed);

    let code = gen_iscc_code(&[mixed.iscc.as_str(), DATA_FF00, INSTANCE_EMPTY], false).unwrap();
    assert_eq!(decode(&code.iscc).unwrap().subtype(), SubType::Mixed);
}

// ============================================================================
// Serialized Results
// ============================================================================

#[test]
fn test_result_json_shapes() {
    let meta = gen_meta_code("Hello", None, None, 64).unwrap();
    let json = serde_json::to_value(&meta).unwrap();
    assert_eq!(json["name"], "Hello");
    assert!(json.get("description").is_none());
    assert!(json["metahash"].as_str().unwrap().starts_with("1e20"));

    let instance = gen_instance_code(b"", 64).unwrap();
    let json = serde_json::to_value(&instance).unwrap();
    assert_eq!(json["iscc"], INSTANCE_EMPTY);
    assert_eq!(json["filesize"], 0);
    assert_eq!(json["datahash"], DATAHASH_EMPTY);
}
