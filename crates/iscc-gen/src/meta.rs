//! Meta-Code generation.
//!
//! The digest is a SimHash over BLAKE3-hashed 3-character n-grams of the
//! collapsed name. When a description or metadata payload is present, its
//! SimHash is interleaved with the name SimHash in 4-byte slices.

use base64::{engine::general_purpose::STANDARD, Engine};
use iscc_core::text::{text_clean, text_collapse, text_remove_newlines, text_trim};
use iscc_core::{
    blake3_hash, check_bits, multihash_blake3, simhash, sliding_window, sliding_window_bytes,
    IsccError, IsccResult, MainType, SubType,
};
use serde_json::Value;
use tracing::debug;

use crate::encode_unit;
use crate::types::MetaCode;

/// Maximum UTF-8 size of the normalized name.
pub const MAX_NAME_BYTES: usize = 128;
/// Maximum UTF-8 size of the normalized description.
pub const MAX_DESCRIPTION_BYTES: usize = 4096;

const TEXT_NGRAM_WIDTH: usize = 3;
const BYTES_NGRAM_WIDTH: usize = 4;

/// Generates a Meta-Code from a name and optional description or metadata.
///
/// `meta` is either a `data:` URL with a base64 payload or a JSON string.
/// JSON is re-serialized with sorted keys and returned as a data URL. When a
/// non-empty metadata payload is present it replaces the description in the
/// digest and in `metahash`.
pub fn gen_meta_code(
    name: &str,
    description: Option<&str>,
    meta: Option<&str>,
    bits: u32,
) -> IsccResult<MetaCode> {
    check_bits(bits)?;

    let name = text_trim(&text_remove_newlines(&text_clean(name)), MAX_NAME_BYTES);
    if name.is_empty() {
        return Err(IsccError::InvalidArgument(
            "Name is empty after normalization".into(),
        ));
    }
    let description = text_trim(&text_clean(description.unwrap_or("")), MAX_DESCRIPTION_BYTES);

    let payload = meta.map(resolve_meta).transpose()?.flatten();
    let name_hash = ngram_simhash(&text_collapse(&name))?;

    let (digest, metahash, meta_url) = match payload {
        Some((bytes, url)) => {
            let windows = sliding_window_bytes(&bytes, BYTES_NGRAM_WIDTH)?;
            let hashes: Vec<[u8; 32]> = windows.iter().map(|w| blake3_hash(w)).collect();
            let digest = interleave(&name_hash, &simhash(&hashes)?);
            (digest, multihash_blake3(&blake3_hash(&bytes)), Some(url))
        }
        None => {
            let digest = if description.is_empty() {
                name_hash
            } else {
                interleave(&name_hash, &ngram_simhash(&text_collapse(&description))?)
            };
            let text = format!("{name} {description}");
            let metahash = multihash_blake3(&blake3_hash(text.trim().as_bytes()));
            (digest, metahash, None)
        }
    };

    let iscc = encode_unit(MainType::Meta, SubType::None, bits, &digest)?;
    debug!(iscc = %iscc, has_meta = meta_url.is_some(), "Generated Meta-Code");

    Ok(MetaCode {
        iscc,
        name,
        description: (!description.is_empty()).then_some(description),
        meta: meta_url,
        metahash,
    })
}

/// SimHash of BLAKE3 digests over 3-character n-grams.
fn ngram_simhash(collapsed: &str) -> IsccResult<Vec<u8>> {
    let hashes: Vec<[u8; 32]> = sliding_window(collapsed, TEXT_NGRAM_WIDTH)?
        .into_iter()
        .map(|ngram| blake3_hash(ngram.as_bytes()))
        .collect();
    simhash(&hashes)
}

/// Interleaves the first 16 bytes of two digests in 4-byte slices.
fn interleave(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.chunks(4)
        .zip(b.chunks(4))
        .take(4)
        .flat_map(|(x, y)| x.iter().chain(y.iter()).copied())
        .collect()
}

/// Resolves metadata into its payload bytes and data URL.
///
/// A data URL with an empty payload resolves to `None`.
fn resolve_meta(meta: &str) -> IsccResult<Option<(Vec<u8>, String)>> {
    if meta.starts_with("data:") {
        let (_, encoded) = meta.split_once(',').ok_or_else(|| {
            IsccError::InvalidArgument("Data URL is missing the ',' separator".into())
        })?;
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| IsccError::InvalidArgument(format!("Invalid base64 in data URL: {e}")))?;
        return Ok((!bytes.is_empty()).then(|| (bytes, meta.to_string())));
    }

    let value: Value = serde_json::from_str(meta)
        .map_err(|e| IsccError::InvalidArgument(format!("Invalid JSON metadata: {e}")))?;
    let bytes = serde_json::to_vec(&value)
        .map_err(|e| IsccError::InvalidArgument(format!("JSON serialization failed: {e}")))?;
    let media_type = if value.get("@context").is_some() {
        "application/ld+json"
    } else {
        "application/json"
    };
    let url = format!("data:{media_type};base64,{}", STANDARD.encode(&bytes));
    Ok(Some((bytes, url)))
}
