//! ISCC header: MainType, SubType, Version and length field.

use crate::codec::bits::{BitReader, BitWriter};
use crate::error::{IsccError, IsccResult};
use crate::types::{MainType, SubType, Version};

/// Composite flag bit for a Content unit.
pub const FLAG_CONTENT: u32 = 0b001;
/// Composite flag bit for a Semantic unit.
pub const FLAG_SEMANTIC: u32 = 0b010;
/// Composite flag bit for a Meta unit.
pub const FLAG_META: u32 = 0b100;

/// Converts a digest bit length into the header length field for `maintype`.
///
/// - Unit MainTypes: `bits / 32 - 1` for bits in 32..=256, multiple of 32
/// - `Iscc`: the value is already the optional-unit flags (0..=7)
/// - `Id`: rejected; ISCC-ID length fields are only ever decoded
pub fn encode_length(maintype: MainType, bits: u32) -> IsccResult<u32> {
    match maintype {
        MainType::Iscc => {
            if bits <= 7 {
                Ok(bits)
            } else {
                Err(IsccError::InvalidArgument(format!(
                    "Invalid composite unit flags: {bits}"
                )))
            }
        }
        MainType::Id => Err(IsccError::InvalidArgument(format!(
            "ISCC-IDs cannot be encoded from a bit length ({bits})"
        ))),
        _ => {
            if (32..=256).contains(&bits) && bits % 32 == 0 {
                Ok(bits / 32 - 1)
            } else {
                Err(IsccError::InvalidArgument(format!(
                    "Invalid bit length for {maintype}: {bits} (must be a multiple of 32 in 32-256)"
                )))
            }
        }
    }
}

/// Converts a header length field back into the digest bit length.
///
/// ISCC-ID length fields map to `length * 8 + 64` bits (64..=96).
pub fn decode_length(maintype: MainType, length: u32, subtype: SubType) -> IsccResult<u32> {
    match maintype {
        MainType::Iscc => {
            if length > 7 {
                return Err(IsccError::InvalidArgument(format!(
                    "Invalid composite unit flags: {length}"
                )));
            }
            if subtype == SubType::Wide {
                Ok(256)
            } else {
                Ok(length.count_ones() * 64 + 128)
            }
        }
        MainType::Id => {
            if length <= 4 {
                Ok(length * 8 + 64)
            } else {
                Err(IsccError::InvalidArgument(format!(
                    "Invalid ISCC-ID length index: {length}"
                )))
            }
        }
        _ => {
            if length <= 7 {
                Ok((length + 1) * 32)
            } else {
                Err(IsccError::InvalidArgument(format!(
                    "Invalid length index for {maintype}: {length}"
                )))
            }
        }
    }
}

/// Computes composite flags from the optional unit MainTypes present.
///
/// Data and Instance are mandatory and contribute no flag; any other
/// MainType is rejected.
pub fn encode_units(main_types: &[MainType]) -> IsccResult<u32> {
    let mut flags = 0;
    for mt in main_types {
        flags |= match mt {
            MainType::Content => FLAG_CONTENT,
            MainType::Semantic => FLAG_SEMANTIC,
            MainType::Meta => FLAG_META,
            MainType::Data | MainType::Instance => 0,
            other => {
                return Err(IsccError::InvalidArgument(format!(
                    "{other} cannot be part of an ISCC-CODE"
                )))
            }
        };
    }
    Ok(flags)
}

/// Expands composite flags into optional unit MainTypes in canonical order.
pub fn decode_units(flags: u32) -> IsccResult<Vec<MainType>> {
    if flags > 7 {
        return Err(IsccError::InvalidArgument(format!(
            "Invalid composite unit flags: {flags}"
        )));
    }
    let mut units = Vec::with_capacity(3);
    if flags & FLAG_META != 0 {
        units.push(MainType::Meta);
    }
    if flags & FLAG_SEMANTIC != 0 {
        units.push(MainType::Semantic);
    }
    if flags & FLAG_CONTENT != 0 {
        units.push(MainType::Content);
    }
    Ok(units)
}

/// A validated ISCC header.
///
/// The length field is checked against its MainType on construction, so
/// [`Header::digest_bits`] never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    maintype: MainType,
    subtype: SubType,
    version: Version,
    length: u32,
    digest_bits: u32,
}

impl Header {
    /// Creates a header from its raw length field.
    pub fn new(
        maintype: MainType,
        subtype: SubType,
        version: Version,
        length: u32,
    ) -> IsccResult<Self> {
        let digest_bits = decode_length(maintype, length, subtype)?;
        Ok(Self {
            maintype,
            subtype,
            version,
            length,
            digest_bits,
        })
    }

    /// Creates a header from a digest bit length.
    pub fn with_bits(
        maintype: MainType,
        subtype: SubType,
        version: Version,
        bits: u32,
    ) -> IsccResult<Self> {
        Self::new(maintype, subtype, version, encode_length(maintype, bits)?)
    }

    /// Returns the MainType.
    pub fn maintype(&self) -> MainType {
        self.maintype
    }

    /// Returns the SubType.
    pub fn subtype(&self) -> SubType {
        self.subtype
    }

    /// Returns the Version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the raw length field (LengthIndex or composite flags).
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the digest length in bits implied by this header.
    pub fn digest_bits(&self) -> u32 {
        self.digest_bits
    }

    /// Returns the digest length in bytes implied by this header.
    pub fn digest_len(&self) -> usize {
        (self.digest_bits / 8) as usize
    }

    /// Writes the four varnibble fields and zero padding.
    pub fn write(&self, writer: &mut BitWriter) -> IsccResult<()> {
        writer.push_varnibble(u32::from(self.maintype.as_u8()))?;
        writer.push_varnibble(u32::from(self.subtype.as_u8()))?;
        writer.push_varnibble(u32::from(self.version.as_u8()))?;
        writer.push_varnibble(self.length)?;
        writer.pad_to_byte();
        Ok(())
    }

    /// Reads a header and skips its padding, leaving the reader byte aligned.
    pub fn read(reader: &mut BitReader<'_>) -> IsccResult<Self> {
        let maintype = MainType::try_from(reader.read_varnibble()?)?;
        let subtype = SubType::try_from(reader.read_varnibble()?)?;
        let version = Version::try_from(reader.read_varnibble()?)?;
        let length = reader.read_varnibble()?;
        reader.skip_padding()?;
        Self::new(maintype, subtype, version, length)
    }
}
