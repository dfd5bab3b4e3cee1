//! Composite ISCC-CODE assembly.
//!
//! An ISCC-CODE packs 64-bit digest prefixes of its units behind a single
//! header whose length field carries the optional-unit flags. Data and
//! Instance are always present; Meta, Semantic and Content are optional.
//! The wide form packs 128-bit Data and Instance digests instead.

use std::io::{self, Read};

use iscc_core::codec::encode_units;
use iscc_core::{
    decode, with_prefix, Header, IsccError, IsccResult, MainType, SubType, Unit, Version,
};
use tracing::{debug, trace};

use crate::config::GenConfig;
use crate::streaming::{DataHasher, InstanceHasher};
use crate::types::{IsccCode, SumCode};

/// Minimum digest size of a unit that can be combined.
const MIN_UNIT_BITS: u32 = 64;
/// Minimum Data/Instance digest size for the wide form.
const WIDE_UNIT_BITS: u32 = 128;

/// Combines unit codes into a composite ISCC-CODE.
///
/// Units may be given in any order. They are sorted into canonical order
/// (Meta, Semantic, Content, Data, Instance) before packing.
pub fn gen_iscc_code<S: AsRef<str>>(codes: &[S], wide: bool) -> IsccResult<IsccCode> {
    if codes.len() < 2 {
        return Err(IsccError::InvalidArgument(format!(
            "At least 2 unit codes are required, got {}",
            codes.len()
        )));
    }

    let mut units = codes
        .iter()
        .map(|code| decode(code.as_ref()))
        .collect::<IsccResult<Vec<Unit>>>()?;
    for unit in &units {
        if !unit.maintype().is_composable() {
            return Err(IsccError::InvalidArgument(format!(
                "{} cannot be part of an ISCC-CODE",
                unit.maintype()
            )));
        }
        if unit.bit_length() < MIN_UNIT_BITS {
            return Err(IsccError::InvalidArgument(format!(
                "{} unit has {} bits, at least {MIN_UNIT_BITS} are required",
                unit.maintype(),
                unit.bit_length()
            )));
        }
    }
    units.sort_by_key(Unit::maintype);

    if let Some(pair) = units.windows(2).find(|w| w[0].maintype() == w[1].maintype()) {
        return Err(IsccError::InvalidArgument(format!(
            "Duplicate {} unit",
            pair[0].maintype()
        )));
    }
    let main_types: Vec<MainType> = units.iter().map(Unit::maintype).collect();
    if main_types[main_types.len() - 2..] != [MainType::Data, MainType::Instance] {
        return Err(IsccError::InvalidArgument(
            "Data-Code and Instance-Code are mandatory".into(),
        ));
    }

    let is_wide = wide
        && units.len() == 2
        && units.iter().all(|u| u.bit_length() >= WIDE_UNIT_BITS);
    let subtype = composite_subtype(&units, is_wide)?;
    let flags = encode_units(&main_types)?;

    let prefix_len = if is_wide { 16 } else { 8 };
    let body: Vec<u8> = units
        .iter()
        .flat_map(|u| u.digest()[..prefix_len].iter().copied())
        .collect();

    let header = Header::new(MainType::Iscc, subtype, Version::V0, flags)?;
    let iscc = with_prefix(&Unit::from_header(header, &body)?.to_code());
    debug!(iscc = %iscc, units = units.len(), wide = is_wide, "Assembled ISCC-CODE");
    Ok(IsccCode { iscc })
}

fn composite_subtype(units: &[Unit], wide: bool) -> IsccResult<SubType> {
    if wide {
        return Ok(SubType::Wide);
    }
    let mut content_subtypes = units
        .iter()
        .filter(|u| matches!(u.maintype(), MainType::Semantic | MainType::Content))
        .map(Unit::subtype);
    match content_subtypes.next() {
        Some(first) => {
            if let Some(other) = content_subtypes.find(|&st| st != first) {
                return Err(IsccError::InvalidArgument(format!(
                    "Semantic and Content units must share a SubType, got {first} and {other}"
                )));
            }
            Ok(first)
        }
        None if units.len() == 2 => Ok(SubType::Sum),
        None => Ok(SubType::IsccNone),
    }
}

/// Computes Data-Code, Instance-Code and their ISCC-CODE in one pass.
///
/// The reader is consumed in blocks of `config.buffer_size` bytes. In wide
/// mode the units are generated with at least 128 bits so the wide form
/// applies.
pub fn gen_sum_code<R: Read>(mut reader: R, config: &GenConfig) -> IsccResult<SumCode> {
    config.validate()?;
    let bits = if config.wide {
        config.bits.max(WIDE_UNIT_BITS)
    } else {
        config.bits
    };

    let mut data_hasher = DataHasher::new();
    let mut instance_hasher = InstanceHasher::new();
    let mut buf = vec![0u8; config.buffer_size];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        trace!(bytes = n, "Read block");
        data_hasher.update(&buf[..n])?;
        instance_hasher.update(&buf[..n])?;
    }

    let data = data_hasher.finalize(bits)?;
    let instance = instance_hasher.finalize(bits)?;
    let code = gen_iscc_code(&[&data.iscc, &instance.iscc], config.wide)?;
    debug!(iscc = %code.iscc, filesize = instance.filesize, "Generated ISCC-SUM");
    Ok(SumCode {
        iscc: code.iscc,
        datahash: instance.datahash,
        filesize: instance.filesize,
        units: vec![data.iscc, instance.iscc],
    })
}
