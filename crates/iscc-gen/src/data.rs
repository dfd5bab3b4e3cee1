//! Data-Code generation from raw bytes.

use iscc_cdc::{cdc_chunks, params::DEFAULT_AVG_CHUNK_SIZE};
use iscc_core::{check_bits, minhash256, xxh32, IsccResult, MainType, SubType};
use tracing::debug;

use crate::encode_unit;
use crate::types::DataCode;

/// Generates a Data-Code from a complete byte buffer.
///
/// The data is split into content-defined chunks, each chunk is hashed with
/// xxHash32 and the hashes are combined with MinHash. Empty data is a single
/// empty chunk.
pub fn gen_data_code(data: &[u8], bits: u32) -> IsccResult<DataCode> {
    check_bits(bits)?;
    let features: Vec<u32> = cdc_chunks(data, false, DEFAULT_AVG_CHUNK_SIZE)?
        .into_iter()
        .map(xxh32)
        .collect();

    let iscc = encode_unit(MainType::Data, SubType::None, bits, &minhash256(&features))?;
    debug!(iscc = %iscc, size = data.len(), chunks = features.len(), "Generated Data-Code");
    Ok(DataCode { iscc })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcg_data(len: usize) -> Vec<u8> {
        let mut state = 0x12345678u64;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                (state >> 33) as u8
            })
            .collect()
    }

    #[test]
    fn test_data_published_vector() {
        assert_eq!(gen_data_code(b"\xff\x00", 64).unwrap().iscc, "ISCC:GAAXL2XYM5BQIAZ3");
    }

    #[test]
    fn test_data_empty() {
        assert_eq!(gen_data_code(b"", 64).unwrap().iscc, "ISCC:GAASL4F2WZY7KBXB");
    }

    #[test]
    fn test_data_small_inputs() {
        let cases: [(&[u8], &str); 5] = [
            (b"\x00\x01", "ISCC:GAAQQEGHWWBXIU46"),
            (b"\x00\xff", "ISCC:GAA6HU36AKYQT3HD"),
            (b"\x01\x02", "ISCC:GAA7X4ZFA6AC63TF"),
            (b"ab", "ISCC:GAAVDFH5UNIEOZYM"),
            (b"\x00\x00", "ISCC:GAAR5ZWLWGNNP4H2"),
        ];
        for (data, expected) in cases {
            assert_eq!(gen_data_code(data, 64).unwrap().iscc, expected);
        }
    }

    #[test]
    fn test_data_multi_chunk() {
        let data = lcg_data(20_000);
        assert_eq!(gen_data_code(&data, 64).unwrap().iscc, "ISCC:GAA2CO25FT3OFMC3");
        assert_eq!(
            gen_data_code(&data, 256).unwrap().iscc,
            "ISCC:GAD2CO25FT3OFMC3ZU6TTYV32PQ7LOEJRPCHFTNPN25Y3GBCNSJ6KZI"
        );
    }

    #[test]
    fn test_data_rejects_bits() {
        assert!(gen_data_code(b"abc", 65).unwrap_err().is_invalid_argument());
    }
}
