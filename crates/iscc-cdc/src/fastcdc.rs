//! Gear-hash content-defined chunking.
//!
//! A cut point is searched in two phases after the minimum chunk size: up
//! to the center size with the strict mask `mask_s`, then up to the maximum
//! size with the relaxed mask `mask_l`. The rolling hash is
//! `pattern = (pattern >> 1) + GEAR[byte]` over `u32`.

use iscc_core::{IsccError, IsccResult};

use crate::gear::gear;
use crate::params::{DEFAULT_AVG_CHUNK_SIZE, MAX_AVG_CHUNK_SIZE};

/// Parameters for the chunking algorithm, derived from an average size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingParams {
    /// Minimum chunk size in bytes
    pub min_size: usize,
    /// Maximum chunk size in bytes
    pub max_size: usize,
    /// Offset where the strict mask gives way to the relaxed one
    pub center_size: usize,
    /// Mask for positions before `center_size`
    pub mask_s: u32,
    /// Mask for positions at/after `center_size`
    pub mask_l: u32,
}

impl ChunkingParams {
    /// Derives parameters from a target average chunk size.
    ///
    /// `avg_size` must be in `1..=MAX_AVG_CHUNK_SIZE`.
    pub fn from_avg_size(avg_size: usize) -> IsccResult<Self> {
        if avg_size == 0 || avg_size > MAX_AVG_CHUNK_SIZE {
            return Err(IsccError::InvalidArgument(format!(
                "Average chunk size must be in 1..={MAX_AVG_CHUNK_SIZE}, got {avg_size}"
            )));
        }
        Ok(Self::derive(avg_size))
    }

    fn derive(avg_size: usize) -> Self {
        let min_size = avg_size / 4;
        let bits = (avg_size as f64).log2().round() as u32;
        Self {
            min_size,
            max_size: avg_size * 8,
            center_size: avg_size.saturating_sub(min_size + min_size.div_ceil(2)),
            mask_s: (1 << (bits + 1)) - 1,
            mask_l: (1 << bits.saturating_sub(1)) - 1,
        }
    }
}

impl Default for ChunkingParams {
    fn default() -> Self {
        Self::derive(DEFAULT_AVG_CHUNK_SIZE)
    }
}

/// Represents a chunk boundary with start and end offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBoundary {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl ChunkBoundary {
    /// Returns the size of this chunk.
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Returns the length of the first chunk of `buffer`.
///
/// A buffer no longer than `min_size` is one chunk. When a cut triggers at
/// byte index `i` the chunk ends at `i + 1`; without a trigger it ends at
/// `max_size` or the end of the buffer. A non-empty buffer always yields a
/// chunk of at least one byte, even with a zero `max_size`.
pub fn cut_offset(buffer: &[u8], params: &ChunkingParams) -> usize {
    let size = buffer.len();
    let mut pattern = 0u32;
    let mut i = params.min_size.min(size);

    let center = params.center_size.min(size);
    while i < center {
        pattern = (pattern >> 1).wrapping_add(gear(buffer[i]));
        if pattern & params.mask_s == 0 {
            return i + 1;
        }
        i += 1;
    }

    let end = params.max_size.min(size);
    while i < end {
        pattern = (pattern >> 1).wrapping_add(gear(buffer[i]));
        if pattern & params.mask_l == 0 {
            return i + 1;
        }
        i += 1;
    }
    i.max(size.min(1))
}

/// Iterator over the chunk boundaries of a byte slice.
///
/// Empty input yields a single empty boundary. With `align` set, cut points
/// are rounded down to a multiple of 4 bytes (UTF-32 text).
#[derive(Debug, Clone)]
pub struct CdcChunker<'a> {
    data: &'a [u8],
    params: ChunkingParams,
    align: bool,
    position: usize,
    done: bool,
}

impl<'a> CdcChunker<'a> {
    /// Creates a new chunker with default parameters.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_params(data, ChunkingParams::default(), false)
    }

    /// Creates a new chunker with custom parameters.
    pub fn with_params(data: &'a [u8], params: ChunkingParams, align: bool) -> Self {
        Self {
            data,
            params,
            align,
            position: 0,
            done: false,
        }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the remaining bytes to be chunked.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl<'a> Iterator for CdcChunker<'a> {
    type Item = ChunkBoundary;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.data.is_empty() {
            self.done = true;
            return Some(ChunkBoundary { start: 0, end: 0 });
        }

        let start = self.position;
        let remaining = &self.data[start..];
        let mut cut = cut_offset(remaining, &self.params);
        if self.align {
            cut -= cut % 4;
            if cut == 0 {
                cut = remaining.len().min(4);
            }
        }

        self.position = start + cut;
        if self.position >= self.data.len() {
            self.done = true;
        }
        Some(ChunkBoundary {
            start,
            end: self.position,
        })
    }
}

/// Splits `data` into content-defined chunks.
///
/// The concatenation of the returned slices equals `data`. Empty input
/// yields one empty chunk.
///
/// # Example
/// ```
/// use iscc_cdc::cdc_chunks;
///
/// let data = vec![7u8; 10_000];
/// let chunks = cdc_chunks(&data, false, 1024).unwrap();
///
/// assert!(chunks.iter().all(|c| c.len() <= 8192));
/// assert_eq!(chunks.concat(), data);
/// ```
pub fn cdc_chunks(data: &[u8], align: bool, avg_chunk_size: usize) -> IsccResult<Vec<&[u8]>> {
    let params = ChunkingParams::from_avg_size(avg_chunk_size)?;
    Ok(CdcChunker::with_params(data, params, align)
        .map(|b| &data[b.start..b.end])
        .collect())
}
