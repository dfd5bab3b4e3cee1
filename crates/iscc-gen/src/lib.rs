//! ISCC Gen - Code generators built on the ISCC core primitives.
//!
//! This crate provides:
//! - Modality generators: Meta, Text, Image, Audio, Video, Mixed, Data, Instance
//! - Streaming `DataHasher` / `InstanceHasher` with an explicit state machine
//! - The composite ISCC-CODE assembler and a one-pass ISCC-SUM over `io::Read`
//! - `GenConfig` with the generator defaults
//! - A conformance self-check over the published reference codes
//!
//! Every generator validates `bits` against the standard length table and
//! returns a result struct carrying the `ISCC:`-prefixed code.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod audio;
pub mod composite;
pub mod config;
pub mod conformance;
pub mod data;
mod dct;
pub mod image;
pub mod instance;
pub mod meta;
pub mod mixed;
pub mod streaming;
pub mod text;
pub mod types;
pub mod video;
mod wtahash;

pub use audio::gen_audio_code;
pub use composite::{gen_iscc_code, gen_sum_code};
pub use config::GenConfig;
pub use conformance::{conformance_report, conformance_selftest, ConformanceReport};
pub use data::gen_data_code;
pub use image::gen_image_code;
pub use instance::gen_instance_code;
pub use meta::gen_meta_code;
pub use mixed::gen_mixed_code;
pub use streaming::{DataHasher, HasherState, InstanceHasher};
pub use text::gen_text_code;
pub use types::{
    AudioCode, DataCode, ImageCode, InstanceCode, IsccCode, MetaCode, MixedCode, SumCode,
    TextCode, VideoCode,
};
pub use video::gen_video_code;

use iscc_core::{check_bits, encode, with_prefix, IsccResult, MainType, SubType, Version};

/// Validates `bits` and encodes a V0 unit as an `ISCC:`-prefixed string.
pub(crate) fn encode_unit(
    maintype: MainType,
    subtype: SubType,
    bits: u32,
    digest: &[u8],
) -> IsccResult<String> {
    check_bits(bits)?;
    Ok(with_prefix(&encode(maintype, subtype, Version::V0, bits, digest)?))
}
