//! Video-Code generation from MPEG-7 frame signatures.

use std::collections::BTreeSet;

use iscc_core::{check_bits, IsccError, IsccResult, MainType, SubType};
use tracing::debug;

use crate::encode_unit;
use crate::types::VideoCode;
use crate::wtahash::{wtahash, WTA_INPUT_LEN};

/// Generates a Video-Code from per-frame signatures.
///
/// Duplicate frames are counted once. The unique frames are summed column
/// by column and the sum is WTA-hashed. All frames must have the same
/// length of at least 380 values.
pub fn gen_video_code<F: AsRef<[i32]>>(frames: &[F], bits: u32) -> IsccResult<VideoCode> {
    check_bits(bits)?;
    let Some(first) = frames.first() else {
        return Err(IsccError::InvalidArgument(
            "At least one frame signature is required".into(),
        ));
    };
    let width = first.as_ref().len();
    if width < WTA_INPUT_LEN {
        return Err(IsccError::InvalidArgument(format!(
            "Frame signatures need at least {WTA_INPUT_LEN} values, got {width}"
        )));
    }
    if let Some(index) = frames.iter().position(|f| f.as_ref().len() != width) {
        return Err(IsccError::InvalidArgument(format!(
            "Frame {index} has {} values, expected {width}",
            frames[index].as_ref().len()
        )));
    }

    let unique: BTreeSet<&[i32]> = frames.iter().map(|f| f.as_ref()).collect();
    let mut sums = vec![0i64; width];
    for frame in &unique {
        for (sum, &value) in sums.iter_mut().zip(frame.iter()) {
            *sum += i64::from(value);
        }
    }

    let iscc = encode_unit(
        MainType::Content,
        SubType::Video,
        bits,
        &wtahash(&sums, bits as usize),
    )?;
    debug!(iscc = %iscc, frames = frames.len(), unique = unique.len(), "Generated Video-Code");
    Ok(VideoCode { iscc })
}
