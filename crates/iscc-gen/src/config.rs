//! Generator configuration.

use iscc_core::{check_bits, IsccError, IsccResult, DEFAULT_BITS};

/// Default read buffer for streamed input: 2 MiB.
pub const DEFAULT_BUFFER_SIZE: usize = 2 * 1024 * 1024;

/// Settings shared by the generators and the streaming entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenConfig {
    /// Digest bit length for generated units
    pub bits: u32,
    /// Produce 256-bit wide ISCC-SUM codes when possible
    pub wide: bool,
    /// Read buffer size in bytes for `io::Read` input
    pub buffer_size: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            wide: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl GenConfig {
    /// Creates a configuration with the given bit length.
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            ..Default::default()
        }
    }

    /// Sets wide mode.
    pub fn with_wide(mut self, wide: bool) -> Self {
        self.wide = wide;
        self
    }

    /// Sets the read buffer size.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Checks the bit length and buffer size.
    pub fn validate(&self) -> IsccResult<()> {
        check_bits(self.bits)?;
        if self.buffer_size == 0 {
            return Err(IsccError::InvalidArgument(
                "buffer_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
