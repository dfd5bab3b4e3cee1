//! Streaming Data-Code and Instance-Code hashers.
//!
//! Both hashers move from [`HasherState::Active`] to
//! [`HasherState::Finalized`] on the first successful `finalize`. After that,
//! `update` and `finalize` fail with `InvalidState` and the produced code
//! stays available through `code()`. A `finalize` rejected for its bit
//! length leaves the hasher active.

use std::io;

use iscc_cdc::{CdcChunker, ChunkingParams};
use iscc_core::hash::Blake3Hasher;
use iscc_core::{
    check_bits, minhash256, multihash_blake3, xxh32, IsccError, IsccResult, MainType, SubType,
};
use tracing::{debug, trace};

use crate::encode_unit;
use crate::types::{DataCode, InstanceCode};

/// Lifecycle state of a streaming hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasherState {
    /// Accepting input
    Active,
    /// A code has been produced; no further input is accepted
    Finalized,
}

fn ensure_active(state: HasherState, op: &str) -> IsccResult<()> {
    match state {
        HasherState::Active => Ok(()),
        HasherState::Finalized => Err(IsccError::InvalidState(format!(
            "Cannot {op}: hasher is already finalized"
        ))),
    }
}

/// Incremental Data-Code hasher.
///
/// Completed CDC chunks are hashed as soon as they are known; only the
/// trailing, possibly incomplete chunk is buffered. The result equals
/// [`gen_data_code`](crate::gen_data_code) over the concatenated input,
/// independent of how the input was split across updates.
#[derive(Debug)]
pub struct DataHasher {
    params: ChunkingParams,
    features: Vec<u32>,
    tail: Vec<u8>,
    state: HasherState,
    code: Option<DataCode>,
}

impl DataHasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            params: ChunkingParams::default(),
            features: Vec::new(),
            tail: Vec::new(),
            state: HasherState::Active,
            code: None,
        }
    }

    /// Feeds more data.
    pub fn update(&mut self, data: &[u8]) -> IsccResult<()> {
        ensure_active(self.state, "update")?;
        if data.is_empty() {
            return Ok(());
        }
        self.tail.extend_from_slice(data);

        let mut keep_from = 0;
        let mut chunks = CdcChunker::with_params(&self.tail, self.params, false).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_none() {
                keep_from = chunk.start;
                break;
            }
            self.features.push(xxh32(&self.tail[chunk.start..chunk.end]));
        }
        self.tail.drain(..keep_from);
        trace!(
            features = self.features.len(),
            buffered = self.tail.len(),
            "Data hasher update"
        );
        Ok(())
    }

    /// Produces the Data-Code for all data seen so far.
    pub fn finalize(&mut self, bits: u32) -> IsccResult<DataCode> {
        ensure_active(self.state, "finalize")?;
        check_bits(bits)?;

        let last = if !self.tail.is_empty() {
            Some(xxh32(&self.tail))
        } else if self.features.is_empty() {
            Some(xxh32(b""))
        } else {
            None
        };
        self.features.extend(last);

        let iscc = match encode_unit(MainType::Data, SubType::None, bits, &minhash256(&self.features)) {
            Ok(iscc) => iscc,
            Err(e) => {
                if last.is_some() {
                    self.features.pop();
                }
                return Err(e);
            }
        };
        debug!(iscc = %iscc, chunks = self.features.len(), "Finalized Data-Code");

        let code = DataCode { iscc };
        self.tail.clear();
        self.state = HasherState::Finalized;
        self.code = Some(code.clone());
        Ok(code)
    }

    /// Returns the current state.
    pub fn state(&self) -> HasherState {
        self.state
    }

    /// Returns true once a code has been produced.
    pub fn is_finalized(&self) -> bool {
        self.state == HasherState::Finalized
    }

    /// Returns the produced code, if finalized.
    pub fn code(&self) -> Option<&DataCode> {
        self.code.as_ref()
    }
}

impl Default for DataHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for DataHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Incremental Instance-Code hasher.
#[derive(Debug)]
pub struct InstanceHasher {
    hasher: Blake3Hasher,
    filesize: u64,
    state: HasherState,
    code: Option<InstanceCode>,
}

impl InstanceHasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            hasher: Blake3Hasher::new(),
            filesize: 0,
            state: HasherState::Active,
            code: None,
        }
    }

    /// Feeds more data.
    pub fn update(&mut self, data: &[u8]) -> IsccResult<()> {
        ensure_active(self.state, "update")?;
        self.hasher.update(data);
        self.filesize += data.len() as u64;
        Ok(())
    }

    /// Produces the Instance-Code for all data seen so far.
    pub fn finalize(&mut self, bits: u32) -> IsccResult<InstanceCode> {
        ensure_active(self.state, "finalize")?;
        let digest = self.hasher.finalize();
        let iscc = encode_unit(MainType::Instance, SubType::None, bits, &digest)?;
        debug!(iscc = %iscc, filesize = self.filesize, "Finalized Instance-Code");

        let code = InstanceCode {
            iscc,
            datahash: multihash_blake3(&digest),
            filesize: self.filesize,
        };
        self.state = HasherState::Finalized;
        self.code = Some(code.clone());
        Ok(code)
    }

    /// Returns the number of bytes hashed.
    pub fn filesize(&self) -> u64 {
        self.filesize
    }

    /// Returns the current state.
    pub fn state(&self) -> HasherState {
        self.state
    }

    /// Returns true once a code has been produced.
    pub fn is_finalized(&self) -> bool {
        self.state == HasherState::Finalized
    }

    /// Returns the produced code, if finalized.
    pub fn code(&self) -> Option<&InstanceCode> {
        self.code.as_ref()
    }
}

impl Default for InstanceHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for InstanceHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
