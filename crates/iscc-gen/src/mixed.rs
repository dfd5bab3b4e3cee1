//! Mixed-Code generation from several Content-Codes.

use iscc_core::{check_bits, decode, simhash, IsccError, IsccResult, MainType, SubType};
use tracing::debug;

use crate::encode_unit;
use crate::types::MixedCode;

/// Generates a Mixed-Code from at least two Content-Codes.
///
/// Each code contributes its first header byte followed by its digest,
/// truncated or zero-padded to `bits / 8` bytes. The contributions are
/// combined with SimHash.
pub fn gen_mixed_code<S: AsRef<str>>(codes: &[S], bits: u32) -> IsccResult<MixedCode> {
    check_bits(bits)?;
    if codes.len() < 2 {
        return Err(IsccError::InvalidArgument(format!(
            "At least 2 Content-Codes are required, got {}",
            codes.len()
        )));
    }

    let nbytes = (bits / 8) as usize;
    let mut entries = Vec::with_capacity(codes.len());
    for code in codes {
        let unit = decode(code.as_ref())?;
        if unit.maintype() != MainType::Content {
            return Err(IsccError::InvalidArgument(format!(
                "Only Content-Codes can be mixed, got {}",
                unit.maintype()
            )));
        }
        let mut entry = Vec::with_capacity(nbytes);
        entry.push(unit.to_bytes()[0]);
        let digest = unit.digest();
        entry.extend_from_slice(&digest[..digest.len().min(nbytes - 1)]);
        entry.resize(nbytes, 0);
        entries.push(entry);
    }

    let iscc = encode_unit(MainType::Content, SubType::Mixed, bits, &simhash(&entries)?)?;
    debug!(iscc = %iscc, parts = codes.len(), "Generated Mixed-Code");
    Ok(MixedCode {
        iscc,
        parts: codes.iter().map(|c| c.as_ref().to_string()).collect(),
    })
}
