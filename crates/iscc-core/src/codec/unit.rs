//! The `Unit` value type and its wire encoding.

use std::fmt;
use std::str::FromStr;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::codec::bits::{BitReader, BitWriter};
use crate::codec::header::Header;
use crate::codec::{decode, encode_base32};
use crate::error::{IsccError, IsccResult};
use crate::types::{MainType, SubType, Version};

/// Types that write themselves as packed ISCC bytes.
pub trait WireEncode {
    /// Appends the packed representation to `buf`.
    fn encode(&self, buf: &mut BytesMut);

    /// Returns the packed representation.
    fn to_wire(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.freeze()
    }
}

/// Types that read themselves from packed ISCC bytes.
pub trait WireDecode: Sized {
    /// Decodes one value from the front of `buf`, advancing past it.
    fn decode(buf: &mut Bytes) -> IsccResult<Self>;

    /// Decodes from a byte slice that must contain exactly one value.
    fn from_wire(bytes: &[u8]) -> IsccResult<Self> {
        let mut buf = Bytes::copy_from_slice(bytes);
        let value = Self::decode(&mut buf)?;
        if buf.has_remaining() {
            return Err(IsccError::InvalidArgument(format!(
                "Digest length mismatch: {} trailing bytes",
                buf.remaining()
            )));
        }
        Ok(value)
    }
}

/// A decoded ISCC unit: header plus digest.
///
/// Fields are private; a `Unit` is always consistent with its header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    header: Header,
    raw: Bytes,
    header_len: usize,
}

impl Unit {
    /// Creates a unit from a header and a digest of exactly the header's length.
    pub fn from_header(header: Header, digest: &[u8]) -> IsccResult<Self> {
        if digest.len() != header.digest_len() {
            return Err(IsccError::InvalidArgument(format!(
                "Digest length mismatch: expected {} bytes, got {}",
                header.digest_len(),
                digest.len()
            )));
        }
        let mut writer = BitWriter::new();
        header.write(&mut writer)?;
        let header_len = writer.bit_len() / 8;
        writer.push_bytes(digest);
        Ok(Self {
            header,
            raw: Bytes::from(writer.into_bytes()),
            header_len,
        })
    }

    /// Creates a unit from header fields, a bit length and a digest.
    ///
    /// Only the first `bits / 8` bytes of `digest` are used.
    pub fn new(
        maintype: MainType,
        subtype: SubType,
        version: Version,
        bits: u32,
        digest: &[u8],
    ) -> IsccResult<Self> {
        let header = Header::with_bits(maintype, subtype, version, bits)?;
        let nbytes = header.digest_len();
        if digest.len() < nbytes {
            return Err(IsccError::InvalidArgument(format!(
                "Digest too short for {bits} bits: expected at least {nbytes} bytes, got {}",
                digest.len()
            )));
        }
        Self::from_header(header, &digest[..nbytes])
    }

    /// Returns the header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the MainType.
    pub fn maintype(&self) -> MainType {
        self.header.maintype()
    }

    /// Returns the SubType.
    pub fn subtype(&self) -> SubType {
        self.header.subtype()
    }

    /// Returns the Version.
    pub fn version(&self) -> Version {
        self.header.version()
    }

    /// Returns the raw header length field.
    pub fn length(&self) -> u32 {
        self.header.length()
    }

    /// Returns the digest length in bits.
    pub fn bit_length(&self) -> u32 {
        self.header.digest_bits()
    }

    /// Returns the digest bytes.
    pub fn digest(&self) -> &[u8] {
        &self.raw[self.header_len..]
    }

    /// Returns the packed header followed by the digest.
    pub fn to_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the base32 code without the `ISCC:` prefix.
    pub fn to_code(&self) -> String {
        encode_base32(&self.raw)
    }
}

impl WireEncode for Unit {
    fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.raw);
    }
}

impl WireDecode for Unit {
    fn decode(buf: &mut Bytes) -> IsccResult<Self> {
        let mut reader = BitReader::new(buf.chunk());
        let header = Header::read(&mut reader)?;
        let header_len = reader.position() / 8;
        let available = reader.remaining_bytes().len();
        if available < header.digest_len() {
            return Err(IsccError::InvalidArgument(format!(
                "Truncated digest: expected {} bytes, got {available}",
                header.digest_len()
            )));
        }
        let raw = buf.split_to(header_len + header.digest_len());
        Ok(Self {
            header,
            raw,
            header_len,
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}

impl FromStr for Unit {
    type Err = IsccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
