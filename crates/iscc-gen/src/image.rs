//! Image-Code generation from 32x32 grayscale pixels.
//!
//! A 2-D DCT is applied to the pixel matrix (rows, then columns). Four
//! overlapping 8x8 blocks of low-frequency coefficients are compared against
//! their median; each coefficient above the median yields a 1 bit.

use iscc_core::{check_bits, IsccError, IsccResult, MainType, SubType};
use tracing::debug;

use crate::dct::dct;
use crate::encode_unit;
use crate::types::ImageCode;

/// Side length of the normalized input image.
pub const IMAGE_SIDE: usize = 32;
/// Required number of pixels.
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Block origins as (column, row) offsets into the coefficient matrix.
const BLOCK_ORIGINS: [(usize, usize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
const BLOCK_SIDE: usize = 8;

/// Generates an Image-Code from 1024 grayscale pixels in row-major order.
pub fn gen_image_code(pixels: &[u8], bits: u32) -> IsccResult<ImageCode> {
    check_bits(bits)?;
    if pixels.len() != IMAGE_PIXELS {
        return Err(IsccError::InvalidArgument(format!(
            "Expected {IMAGE_PIXELS} pixels, got {}",
            pixels.len()
        )));
    }

    let matrix = dct_2d(pixels)?;
    let nbits = bits as usize;
    let mut digest = vec![0u8; nbits / 8];
    let mut pos = 0;
    'blocks: for (col, row) in BLOCK_ORIGINS {
        let block: Vec<f64> = matrix[row..row + BLOCK_SIDE]
            .iter()
            .flat_map(|r| r[col..col + BLOCK_SIDE].iter().copied())
            .collect();
        let threshold = median(&block);
        for value in block {
            if pos == nbits {
                break 'blocks;
            }
            if value > threshold {
                digest[pos / 8] |= 0x80 >> (pos % 8);
            }
            pos += 1;
        }
    }

    let iscc = encode_unit(MainType::Content, SubType::Image, bits, &digest)?;
    debug!(iscc = %iscc, "Generated Image-Code");
    Ok(ImageCode { iscc })
}

/// Row-wise then column-wise DCT, returned as rows.
fn dct_2d(pixels: &[u8]) -> IsccResult<Vec<Vec<f64>>> {
    let rows = pixels
        .chunks(IMAGE_SIDE)
        .map(|row| dct(&row.iter().map(|&p| f64::from(p)).collect::<Vec<_>>()))
        .collect::<IsccResult<Vec<_>>>()?;
    let columns = transpose(&rows)
        .iter()
        .map(|col| dct(col))
        .collect::<IsccResult<Vec<_>>>()?;
    Ok(transpose(&columns))
}

fn transpose(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let width = matrix.first().map_or(0, Vec::len);
    (0..width)
        .map(|c| matrix.iter().map(|row| row[c]).collect())
        .collect()
}

/// Median with the two middle values averaged for even lengths.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
