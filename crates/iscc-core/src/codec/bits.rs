//! Bit-level reader and writer for ISCC headers.
//!
//! Header fields are packed MSB-first as variable-length nibbles
//! ("varnibbles"):
//!
//! | Prefix  | Total bits | Value range |
//! |---------|------------|-------------|
//! | `0`     | 4          | 0 - 7       |
//! | `10`    | 8          | 8 - 71      |
//! | `110`   | 12         | 72 - 583    |
//! | `1110`  | 16         | 584 - 4679  |

use crate::error::{IsccError, IsccResult};

/// Largest value representable as a varnibble.
pub const VARNIBBLE_MAX: u32 = 4679;

/// MSB-first bit writer backed by a byte vector.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 1 << (7 - (self.bit_len % 8));
        }
        self.bit_len += 1;
    }

    /// Appends the `count` low bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u32, count: u32) {
        debug_assert!(count <= 32);
        for i in (0..count).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    /// Appends `value` as a varnibble.
    pub fn push_varnibble(&mut self, value: u32) -> IsccResult<()> {
        match value {
            0..=7 => self.push_bits(value, 4),
            8..=71 => {
                self.push_bits(0b10, 2);
                self.push_bits(value - 8, 6);
            }
            72..=583 => {
                self.push_bits(0b110, 3);
                self.push_bits(value - 72, 9);
            }
            584..=VARNIBBLE_MAX => {
                self.push_bits(0b1110, 4);
                self.push_bits(value - 584, 12);
            }
            _ => {
                return Err(IsccError::InvalidArgument(format!(
                    "Varnibble value out of range (0-{VARNIBBLE_MAX}): {value}"
                )))
            }
        }
        Ok(())
    }

    /// Pads with zero bits up to the next byte boundary.
    pub fn pad_to_byte(&mut self) {
        // The last byte is already zero-filled past `bit_len`.
        self.bit_len = self.bytes.len() * 8;
    }

    /// Returns the number of bits written.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Appends whole bytes. The writer must be byte aligned.
    pub fn push_bytes(&mut self, data: &[u8]) {
        debug_assert_eq!(self.bit_len % 8, 0, "push_bytes on unaligned writer");
        self.bytes.extend_from_slice(data);
        self.bit_len = self.bytes.len() * 8;
    }

    /// Consumes the writer, returning the zero-padded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// MSB-first bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current bit position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bits.
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Returns true if the position is on a byte boundary.
    pub fn is_byte_aligned(&self) -> bool {
        self.pos % 8 == 0
    }

    /// Reads a single bit.
    pub fn read_bit(&mut self) -> IsccResult<bool> {
        if self.pos >= self.data.len() * 8 {
            return Err(IsccError::InvalidArgument("Truncated ISCC header".into()));
        }
        let bit = (self.data[self.pos / 8] >> (7 - (self.pos % 8))) & 1 == 1;
        self.pos += 1;
        Ok(bit)
    }

    /// Reads `count` bits as an unsigned integer, most significant first.
    pub fn read_bits(&mut self, count: u32) -> IsccResult<u32> {
        debug_assert!(count <= 32);
        if self.remaining_bits() < count as usize {
            return Err(IsccError::InvalidArgument("Truncated ISCC header".into()));
        }
        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Reads one varnibble.
    pub fn read_varnibble(&mut self) -> IsccResult<u32> {
        if !self.read_bit()? {
            return self.read_bits(3);
        }
        if !self.read_bit()? {
            return Ok(self.read_bits(6)? + 8);
        }
        if !self.read_bit()? {
            return Ok(self.read_bits(9)? + 72);
        }
        if !self.read_bit()? {
            return Ok(self.read_bits(12)? + 584);
        }
        Err(IsccError::InvalidArgument(
            "Invalid varnibble prefix in ISCC header".into(),
        ))
    }

    /// Skips zero padding up to the next byte boundary.
    ///
    /// Fails if any padding bit is set.
    pub fn skip_padding(&mut self) -> IsccResult<()> {
        while !self.is_byte_aligned() {
            if self.read_bit()? {
                return Err(IsccError::InvalidArgument(
                    "Non-zero padding in ISCC header".into(),
                ));
            }
        }
        Ok(())
    }

    /// Returns the unread bytes. The reader must be byte aligned.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        debug_assert!(self.is_byte_aligned(), "remaining_bytes on unaligned reader");
        &self.data[self.pos / 8..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varnibble_bits(value: u32) -> (Vec<u8>, usize) {
        let mut writer = BitWriter::new();
        writer.push_varnibble(value).unwrap();
        let len = writer.bit_len();
        (writer.into_bytes(), len)
    }

    #[test]
    fn test_varnibble_roundtrip() {
        for value in [0, 1, 7, 8, 71, 72, 583, 584, 4679] {
            let (bytes, len) = varnibble_bits(value);
            let mut reader = BitReader::new(&bytes);
            assert_eq!(reader.read_varnibble().unwrap(), value, "value {value}");
            assert_eq!(reader.position(), len, "consumed bits for {value}");
        }
    }

    #[test]
    fn test_varnibble_bit_lengths() {
        assert_eq!(varnibble_bits(0).1, 4);
        assert_eq!(varnibble_bits(7).1, 4);
        assert_eq!(varnibble_bits(8).1, 8);
        assert_eq!(varnibble_bits(71).1, 8);
        assert_eq!(varnibble_bits(72).1, 12);
        assert_eq!(varnibble_bits(583).1, 12);
        assert_eq!(varnibble_bits(584).1, 16);
        assert_eq!(varnibble_bits(4679).1, 16);
    }

    #[test]
    fn test_varnibble_bit_patterns() {
        // 0111
        assert_eq!(varnibble_bits(7).0, vec![0b0111_0000]);
        // 10 000000
        assert_eq!(varnibble_bits(8).0, vec![0b1000_0000]);
        // 110 000000000
        assert_eq!(varnibble_bits(72).0, vec![0b1100_0000, 0b0000_0000]);
    }

    #[test]
    fn test_varnibble_out_of_range() {
        let mut writer = BitWriter::new();
        assert!(writer.push_varnibble(4680).is_err());
        assert_eq!(writer.bit_len(), 0);
    }

    #[test]
    fn test_read_invalid_prefix() {
        let mut reader = BitReader::new(&[0xF0, 0x00]);
        assert!(reader.read_varnibble().is_err());
    }

    #[test]
    fn test_read_truncated() {
        let mut reader = BitReader::new(&[0x80]);
        assert_eq!(reader.read_varnibble().unwrap(), 8);
        assert!(reader.read_varnibble().is_err());

        // 110 prefix with only 5 data bits available
        let mut reader = BitReader::new(&[0b1100_0000]);
        assert!(reader.read_varnibble().is_err());
    }

    #[test]
    fn test_padding() {
        let mut writer = BitWriter::new();
        writer.push_bits(0b1010, 4);
        writer.pad_to_byte();
        assert_eq!(writer.bit_len(), 8);
        writer.push_bytes(&[0xAB]);
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0xA0, 0xAB]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1010);
        reader.skip_padding().unwrap();
        assert_eq!(reader.remaining_bytes(), &[0xAB]);
    }

    #[test]
    fn test_nonzero_padding_rejected() {
        let mut reader = BitReader::new(&[0b0000_0001]);
        reader.read_bits(4).unwrap();
        assert!(reader.skip_padding().is_err());
    }
}
