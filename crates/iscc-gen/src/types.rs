//! Generator result types.
//!
//! Each `iscc` field holds the `ISCC:`-prefixed code string.

use serde::Serialize;

/// Result of [`gen_meta_code`](crate::gen_meta_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaCode {
    /// The Meta-Code
    pub iscc: String,
    /// Normalized name
    pub name: String,
    /// Normalized description, if non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Metadata as a data URL, if supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// BLAKE3 multihash of the hashed metadata payload
    pub metahash: String,
}

/// Result of [`gen_text_code`](crate::gen_text_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextCode {
    /// The Text-Code
    pub iscc: String,
    /// Number of characters after collapsing
    pub characters: usize,
}

/// Result of [`gen_image_code`](crate::gen_image_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageCode {
    /// The Image-Code
    pub iscc: String,
}

/// Result of [`gen_audio_code`](crate::gen_audio_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioCode {
    /// The Audio-Code
    pub iscc: String,
}

/// Result of [`gen_video_code`](crate::gen_video_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoCode {
    /// The Video-Code
    pub iscc: String,
}

/// Result of [`gen_mixed_code`](crate::gen_mixed_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixedCode {
    /// The Mixed-Code
    pub iscc: String,
    /// Input Content-Codes as given
    pub parts: Vec<String>,
}

/// Result of [`gen_data_code`](crate::gen_data_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataCode {
    /// The Data-Code
    pub iscc: String,
}

/// Result of [`gen_instance_code`](crate::gen_instance_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceCode {
    /// The Instance-Code
    pub iscc: String,
    /// BLAKE3 multihash of the data (`1e20...`)
    pub datahash: String,
    /// Data size in bytes
    pub filesize: u64,
}

/// Result of [`gen_iscc_code`](crate::gen_iscc_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsccCode {
    /// The composite ISCC-CODE
    pub iscc: String,
}

/// Result of [`gen_sum_code`](crate::gen_sum_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumCode {
    /// The composite ISCC-CODE of Data and Instance
    pub iscc: String,
    /// BLAKE3 multihash of the data
    pub datahash: String,
    /// Data size in bytes
    pub filesize: u64,
    /// The Data-Code and Instance-Code that were combined
    pub units: Vec<String>,
}
