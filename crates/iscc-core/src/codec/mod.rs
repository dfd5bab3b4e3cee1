//! ISCC header and digest codec.
//!
//! An ISCC unit is packed as `[varnibble header][digest]` and rendered as
//! RFC 4648 base32 without padding:
//!
//! - **Header**: MainType, SubType, Version and a length field, each a
//!   varnibble, zero-padded to a byte boundary
//! - **Length field**: LengthIndex for single units, optional-unit flags for
//!   composite ISCC-CODEs
//! - **Composite body**: 64-bit digest prefixes in canonical MainType order,
//!   or two 128-bit prefixes (Data, Instance) in wide mode

pub mod bits;
mod header;
mod unit;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bytes::{Buf, Bytes};
use data_encoding::BASE32_NOPAD;

pub use header::{
    decode_length, decode_units, encode_length, encode_units, Header, FLAG_CONTENT, FLAG_META,
    FLAG_SEMANTIC,
};
pub use unit::{Unit, WireDecode, WireEncode};

use crate::error::{IsccError, IsccResult};
use crate::types::{MainType, SubType, Version};
use crate::ISCC_PREFIX;

/// Encodes bytes as RFC 4648 base32 without padding.
pub fn encode_base32(data: &[u8]) -> String {
    BASE32_NOPAD.encode(data)
}

/// Decodes unpadded RFC 4648 base32, ignoring case.
pub fn decode_base32(code: &str) -> IsccResult<Vec<u8>> {
    BASE32_NOPAD
        .decode(code.to_ascii_uppercase().as_bytes())
        .map_err(|e| IsccError::InvalidArgument(format!("Invalid base32: {e}")))
}

/// Encodes bytes as base64url without padding.
pub fn encode_base64(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Strips an optional `ISCC:` prefix and `-` separators.
pub fn clean_code(code: &str) -> String {
    let trimmed = code.trim();
    let body = match trimmed.get(..ISCC_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(ISCC_PREFIX) => &trimmed[ISCC_PREFIX.len()..],
        _ => trimmed,
    };
    body.chars().filter(|&c| c != '-').collect()
}

/// Encodes a single ISCC unit as a base32 string without the `ISCC:` prefix.
///
/// Only the first `bits / 8` bytes of `digest` are used. Composite codes
/// are rejected here; they are assembled from their units. ISCC-IDs are
/// rejected as well since their length field does not follow the 32-bit
/// table.
pub fn encode(
    maintype: MainType,
    subtype: SubType,
    version: Version,
    bits: u32,
    digest: &[u8],
) -> IsccResult<String> {
    if maintype == MainType::Iscc {
        return Err(IsccError::InvalidArgument(
            "Composite ISCC-CODEs must be assembled from their units".into(),
        ));
    }
    if maintype == MainType::Id {
        return Err(IsccError::InvalidArgument(
            "ISCC-IDs cannot be encoded as content units".into(),
        ));
    }
    Ok(Unit::new(maintype, subtype, version, bits, digest)?.to_code())
}

/// Decodes an ISCC string into a [`Unit`].
///
/// The digest must have exactly the length announced by the header.
pub fn decode(code: &str) -> IsccResult<Unit> {
    let raw = decode_base32(&clean_code(code))?;
    Unit::from_wire(&raw)
}

/// Decomposes a composite ISCC-CODE into its unit codes.
pub fn decompose(code: &str) -> IsccResult<Vec<String>> {
    let unit = decode(code)?;
    if unit.maintype() != MainType::Iscc {
        return Err(IsccError::InvalidArgument(format!(
            "Expected a composite ISCC-CODE, got {}",
            unit.maintype()
        )));
    }
    Ok(decompose_unit(&unit)?.iter().map(Unit::to_code).collect())
}

/// Splits a sequence of concatenated units and composite codes into units.
///
/// Composite codes in the sequence are expanded in place.
pub fn split_units(code: &str) -> IsccResult<Vec<String>> {
    let mut buf = Bytes::from(decode_base32(&clean_code(code))?);
    let mut codes = Vec::new();
    while buf.has_remaining() {
        let unit = Unit::decode(&mut buf)?;
        if unit.maintype() == MainType::Iscc {
            codes.extend(decompose_unit(&unit)?.iter().map(Unit::to_code));
        } else {
            codes.push(unit.to_code());
        }
    }
    Ok(codes)
}

/// Reconstructs the units packed into a composite ISCC-CODE.
///
/// A wide code holds exactly one 128-bit Data and one 128-bit Instance
/// unit, so its unit flags must be zero.
pub fn decompose_unit(unit: &Unit) -> IsccResult<Vec<Unit>> {
    let body = unit.digest();
    if unit.subtype() == SubType::Wide {
        if unit.length() != 0 {
            return Err(IsccError::InvalidArgument(format!(
                "Wide ISCC-CODE must not carry unit flags, got {}",
                unit.length()
            )));
        }
        return Ok(vec![
            Unit::new(MainType::Data, SubType::None, unit.version(), 128, &body[..16])?,
            Unit::new(MainType::Instance, SubType::None, unit.version(), 128, &body[16..32])?,
        ]);
    }

    let optional = decode_units(unit.length())?;
    let expected = (optional.len() + 2) * 8;
    if body.len() < expected {
        return Err(IsccError::InvalidArgument(format!(
            "Truncated ISCC-CODE body: expected {expected} bytes, got {}",
            body.len()
        )));
    }

    let mut units = Vec::with_capacity(optional.len() + 2);
    for (i, &maintype) in optional.iter().enumerate() {
        let subtype = if maintype == MainType::Meta {
            SubType::None
        } else {
            unit.subtype()
        };
        units.push(Unit::new(
            maintype,
            subtype,
            unit.version(),
            64,
            &body[i * 8..(i + 1) * 8],
        )?);
    }
    let tail = &body[body.len() - 16..];
    units.push(Unit::new(MainType::Data, SubType::None, unit.version(), 64, &tail[..8])?);
    units.push(Unit::new(MainType::Instance, SubType::None, unit.version(), 64, &tail[8..])?);
    Ok(units)
}
