//! Reference vectors.
//!
//! Most values are published conformance codes. Entries marked as regression
//! values have no published counterpart and pin the current output.

/// Meta-Code for name "Die Unendliche Geschichte" at 64 bits.
pub const META_HELLO: &str = "ISCC:AAAZXZ6OU74YAZIM";
/// Text-Code for "Hello World" at 64 bits.
pub const TEXT_HELLO_WORLD: &str = "ISCC:EAASKDNZNYGUUF5A";
/// Data-Code for bytes `ff 00` at 64 bits.
pub const DATA_FF00: &str = "ISCC:GAAXL2XYM5BQIAZ3";
/// Data-Code for empty input at 64 bits.
///
/// Regression value; the digest equals that of the published empty Text-Code.
pub const DATA_EMPTY: &str = "ISCC:GAASL4F2WZY7KBXB";
/// Instance-Code for empty input at 64 bits.
pub const INSTANCE_EMPTY: &str = "ISCC:IAA26E2JXH27TING";
/// BLAKE3 multihash of empty input.
pub const DATAHASH_EMPTY: &str =
    "1e20af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";
/// ISCC-CODE of [`META_HELLO`], [`TEXT_HELLO_WORLD`], [`DATA_FF00`] and [`INSTANCE_EMPTY`].
///
/// Regression value.
pub const ISCC_FULL: &str = "ISCC:KACZXZ6OU74YAZIMEUG3S3QNJIL2A5PK7BTUGBADHOXRGSNZ6X42DJQ";
/// ISCC-SUM of [`DATA_FF00`] and [`INSTANCE_EMPTY`].
///
/// Regression value.
pub const ISCC_SUM: &str = "ISCC:KUAHL2XYM5BQIAZ3V4JUTOPV7GQ2M";
