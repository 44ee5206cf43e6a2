use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DimensionError;

/// Storage type of a single sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelType {
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    #[default]
    Uint8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    Uint16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    Uint32,
    /// IEEE single precision
    Float,
    /// IEEE double precision
    Double,
    /// Single precision complex pair
    Complex,
    /// Double precision complex pair
    #[serde(rename = "double-complex")]
    DoubleComplex,
    /// Single bit
    Bit,
}

impl PixelType {
    /// Name as written in schema documents
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelType::Int8 => "int8",
            PixelType::Uint8 => "uint8",
            PixelType::Int16 => "int16",
            PixelType::Uint16 => "uint16",
            PixelType::Int32 => "int32",
            PixelType::Uint32 => "uint32",
            PixelType::Float => "float",
            PixelType::Double => "double",
            PixelType::Complex => "complex",
            PixelType::DoubleComplex => "double-complex",
            PixelType::Bit => "bit",
        }
    }

    /// Significant bits per sample
    pub fn bits(&self) -> u32 {
        match self {
            PixelType::Bit => 1,
            PixelType::Int8 | PixelType::Uint8 => 8,
            PixelType::Int16 | PixelType::Uint16 => 16,
            PixelType::Int32 | PixelType::Uint32 | PixelType::Float => 32,
            PixelType::Double | PixelType::Complex => 64,
            PixelType::DoubleComplex => 128,
        }
    }

    /// Storage bytes per sample (a bit sample occupies one byte)
    pub fn bytes_per_pixel(&self) -> u32 {
        (self.bits() + 7) / 8
    }

    /// True for signed integer and floating point types
    pub fn is_signed(&self) -> bool {
        !matches!(
            self,
            PixelType::Uint8 | PixelType::Uint16 | PixelType::Uint32 | PixelType::Bit
        )
    }

    /// True for floating point types
    pub fn is_floating_point(&self) -> bool {
        matches!(
            self,
            PixelType::Float | PixelType::Double | PixelType::Complex | PixelType::DoubleComplex
        )
    }
}

impl FromStr for PixelType {
    type Err = DimensionError;

    /// Case-insensitive, so legacy spellings such as `Uint16` are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int8" => Ok(PixelType::Int8),
            "uint8" => Ok(PixelType::Uint8),
            "int16" => Ok(PixelType::Int16),
            "uint16" => Ok(PixelType::Uint16),
            "int32" => Ok(PixelType::Int32),
            "uint32" => Ok(PixelType::Uint32),
            "float" => Ok(PixelType::Float),
            "double" => Ok(PixelType::Double),
            "complex" => Ok(PixelType::Complex),
            "double-complex" => Ok(PixelType::DoubleComplex),
            "bit" => Ok(PixelType::Bit),
            _ => Err(DimensionError::UnknownPixelType(s.to_string())),
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
