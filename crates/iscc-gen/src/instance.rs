//! Instance-Code generation: a BLAKE3 checksum of the exact bytes.

use iscc_core::{blake3_hash, multihash_blake3, IsccResult, MainType, SubType};
use tracing::debug;

use crate::encode_unit;
use crate::types::InstanceCode;

/// Generates an Instance-Code from a complete byte buffer.
pub fn gen_instance_code(data: &[u8], bits: u32) -> IsccResult<InstanceCode> {
    let digest = blake3_hash(data);
    let iscc = encode_unit(MainType::Instance, SubType::None, bits, &digest)?;
    debug!(iscc = %iscc, size = data.len(), "Generated Instance-Code");
    Ok(InstanceCode {
        iscc,
        datahash: multihash_blake3(&digest),
        filesize: data.len() as u64,
    })
}
