//! ISCC CDC - Content-defined chunking for Data-Codes.
//!
//! Splits byte streams at content-dependent boundaries with a gear rolling
//! hash, so that an insertion or deletion only changes the chunks around the
//! edit. The Data-Code hashes each chunk and MinHashes the chunk features.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod fastcdc;
mod gear;

pub use fastcdc::{cdc_chunks, cut_offset, CdcChunker, ChunkBoundary, ChunkingParams};
pub use gear::{gear, GearTable, GEAR_TABLE};

/// Chunk size parameters.
pub mod params {
    /// Average chunk size used by the Data-Code: 1 KiB
    pub const DEFAULT_AVG_CHUNK_SIZE: usize = 1024;

    /// Largest accepted average chunk size: 256 MiB
    pub const MAX_AVG_CHUNK_SIZE: usize = 1 << 28;
}
