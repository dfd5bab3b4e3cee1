//! Header field enumerations.
//!
//! Defines the three enumerated ISCC header fields:
//! - `MainType` - code category (Meta, Content, Data, Instance, ...)
//! - `SubType` - modality or composite flavour, interpreted per MainType
//! - `Version` - algorithm generation (only V0 is defined)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IsccError, IsccResult};

/// Macro to define a `u8`-backed header enum with conversions.
macro_rules! define_header_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// All variants in ascending numeric order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the numeric header value.
            pub const fn as_u8(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = IsccError;

            fn try_from(value: u8) -> IsccResult<Self> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(IsccError::InvalidArgument(format!(
                        concat!("Invalid ", stringify!($name), ": {}"),
                        value
                    ))),
                }
            }
        }

        impl TryFrom<u32> for $name {
            type Error = IsccError;

            fn try_from(value: u32) -> IsccResult<Self> {
                u8::try_from(value)
                    .map_err(|_| {
                        IsccError::InvalidArgument(format!(
                            concat!("Invalid ", stringify!($name), ": {}"),
                            value
                        ))
                    })
                    .and_then(<Self as TryFrom<u8>>::try_from)
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value as u8
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self)
            }
        }
    };
}

define_header_enum!(
    /// ISCC MainType: the category of an ISCC unit or code.
    MainType {
        /// Meta-Code (metadata similarity)
        Meta = 0,
        /// Semantic-Code
        Semantic = 1,
        /// Content-Code (text, image, audio, video, mixed)
        Content = 2,
        /// Data-Code (raw byte similarity)
        Data = 3,
        /// Instance-Code (exact byte identity)
        Instance = 4,
        /// Composite ISCC-CODE
        Iscc = 5,
        /// ISCC-ID
        Id = 6,
        /// ISCC Flake
        Flake = 7,
    }
);

define_header_enum!(
    /// ISCC SubType.
    ///
    /// One enum covers every context; the meaning of a value depends on the
    /// MainType it accompanies. Value 0 is "Text" for Content/Semantic units.
    SubType {
        /// No specific subtype / Text content
        None = 0,
        /// Image content
        Image = 1,
        /// Audio content
        Audio = 2,
        /// Video content
        Video = 3,
        /// Mixed content
        Mixed = 4,
        /// Composite with only Data and Instance units
        Sum = 5,
        /// Composite without a Content or Semantic unit
        IsccNone = 6,
        /// Composite with 128-bit Data and Instance digests
        Wide = 7,
    }
);

define_header_enum!(
    /// ISCC algorithm version.
    Version {
        /// Version 0
        V0 = 0,
    }
);

impl SubType {
    /// Alias for [`SubType::None`] in Content and Semantic context.
    pub const TEXT: SubType = SubType::None;
}

impl MainType {
    /// Returns true for MainTypes that can be packed into an ISCC-CODE.
    pub const fn is_composable(self) -> bool {
        matches!(
            self,
            MainType::Meta
                | MainType::Semantic
                | MainType::Content
                | MainType::Data
                | MainType::Instance
        )
    }
}
