use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use log::warn;
use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::dimension::{is_valid_dimension_order, DimensionError, PixelType};
use crate::translate::PartialFieldError;

/// Date layout used inside descriptors
pub const DESCRIPTOR_DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// ISO 8601 layout used everywhere else
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const EXTENSION: &str = ".fake";

/// A synthetic dataset described entirely by its file name.
///
/// `name&sizeX=512&sizeY=256&pixelType=uint16.fake` describes a 512x256
/// 16-bit series named `name`. Unlisted keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticDescriptor {
    /// Series name
    pub name: String,
    /// Width
    pub size_x: u32,
    /// Height
    pub size_y: u32,
    /// Focal planes
    pub size_z: u32,
    /// Total channel samples, a multiple of `rgb`
    pub size_c: u32,
    /// Time points
    pub size_t: u32,
    /// Sample type
    pub pixel_type: PixelType,
    /// Dimension order, a permutation of `XYZCT`
    pub dimension_order: String,
    /// Samples per pixel
    pub rgb: u32,
    /// Lookup-table pixels
    pub indexed: bool,
    /// Byte order
    pub little_endian: bool,
    /// RGB samples stored contiguously
    pub interleaved: bool,
    /// Number of identical series
    pub series: u32,
    /// Pixel width in µm
    pub physical_size_x: Option<f64>,
    /// Pixel height in µm
    pub physical_size_y: Option<f64>,
    /// Focal step in µm
    pub physical_size_z: Option<f64>,
    /// Seconds between time points
    pub time_increment: Option<f64>,
    /// ISO 8601 acquisition timestamp
    pub acquisition_date: Option<String>,
}

impl Default for SyntheticDescriptor {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            size_x: 512,
            size_y: 512,
            size_z: 1,
            size_c: 1,
            size_t: 1,
            pixel_type: PixelType::Uint8,
            dimension_order: "XYZCT".to_string(),
            rgb: 1,
            indexed: false,
            little_endian: true,
            interleaved: false,
            series: 1,
            physical_size_x: None,
            physical_size_y: None,
            physical_size_z: None,
            time_increment: None,
            acquisition_date: None,
        }
    }
}

fn invalid(key: &str, value: &str) -> FormatError {
    FormatError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn number<T: FromStr>(key: &str, value: &str) -> Result<T, FormatError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn positive_count(key: &str, value: &str) -> Result<u32, FormatError> {
    match number::<u32>(key, value)? {
        0 => Err(invalid(key, value)),
        n => Ok(n),
    }
}

fn flag(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

impl SyntheticDescriptor {
    /// Parse a descriptor, logging skipped optional values
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut warnings = Vec::new();
        let descriptor = Self::parse_with_warnings(text, &mut warnings)?;
        for warning in &warnings {
            warn!("{}", warning);
        }
        Ok(descriptor)
    }

    /// Parse a descriptor.
    ///
    /// Directories and the `.fake` extension are ignored. Invalid sizes,
    /// flags and types fail; invalid calibrations and dates are reported
    /// through `warnings` and left unset, as are unknown keys.
    pub fn parse_with_warnings(
        text: &str,
        warnings: &mut Vec<PartialFieldError>,
    ) -> Result<Self, FormatError> {
        let file = text.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(text);
        let stem = if file.to_ascii_lowercase().ends_with(EXTENSION) {
            &file[..file.len() - EXTENSION.len()]
        } else {
            file
        };

        let mut tokens = stem.split('&');
        let mut descriptor = Self::default();
        if let Some(name) = tokens.next().filter(|n| !n.is_empty()) {
            descriptor.name = name.to_string();
        }
        let object = descriptor.name.clone();

        for token in tokens.filter(|t| !t.is_empty()) {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| FormatError::MalformedToken(token.to_string()))?;
            let skip = |warnings: &mut Vec<PartialFieldError>, reason: &str| {
                warnings.push(PartialFieldError::new(&object, key, value, reason));
            };

            match key {
                "sizeX" => descriptor.size_x = positive_count(key, value)?,
                "sizeY" => descriptor.size_y = positive_count(key, value)?,
                "sizeZ" => descriptor.size_z = positive_count(key, value)?,
                "sizeC" => descriptor.size_c = positive_count(key, value)?,
                "sizeT" => descriptor.size_t = positive_count(key, value)?,
                "rgb" => descriptor.rgb = positive_count(key, value)?,
                "series" => descriptor.series = positive_count(key, value)?,
                "pixelType" => {
                    descriptor.pixel_type = value.parse().map_err(|_| invalid(key, value))?
                }
                "dimOrder" => {
                    let order = value.to_ascii_uppercase();
                    if !is_valid_dimension_order(&order) {
                        return Err(invalid(key, value));
                    }
                    descriptor.dimension_order = order;
                }
                "indexed" => descriptor.indexed = flag(key, value)?,
                "little" => descriptor.little_endian = flag(key, value)?,
                "interleaved" => descriptor.interleaved = flag(key, value)?,
                "physicalSizeX" | "physicalSizeY" | "physicalSizeZ" => {
                    match value.parse::<f64>() {
                        Ok(v) if v.is_finite() && v > 0.0 => {
                            let slot = match key {
                                "physicalSizeX" => &mut descriptor.physical_size_x,
                                "physicalSizeY" => &mut descriptor.physical_size_y,
                                _ => &mut descriptor.physical_size_z,
                            };
                            *slot = Some(v);
                        }
                        _ => skip(warnings, "must be a positive number"),
                    }
                }
                "timeIncrement" => match value.parse::<f64>() {
                    Ok(v) if v.is_finite() && v >= 0.0 => descriptor.time_increment = Some(v),
                    _ => skip(warnings, "must be a non-negative number"),
                },
                "acquisitionDate" => {
                    match NaiveDateTime::parse_from_str(value, DESCRIPTOR_DATE_FORMAT) {
                        Ok(date) => {
                            descriptor.acquisition_date =
                                Some(date.format(ISO_DATE_FORMAT).to_string())
                        }
                        Err(_) => skip(warnings, "not a yyyy-MM-dd_HH-mm-ss date"),
                    }
                }
                _ => skip(warnings, "unknown key"),
            }
        }

        if descriptor.size_c % descriptor.rgb != 0 {
            return Err(DimensionError::ChannelMismatch {
                total: descriptor.size_c,
                samples_per_pixel: descriptor.rgb,
            }
            .into());
        }
        Ok(descriptor)
    }

    /// Write the descriptor back, listing only non-default keys
    pub fn to_descriptor_string(&self) -> String {
        let defaults = Self::default();
        let mut out = self.name.clone();
        let mut push = |key: &str, value: String| {
            out.push('&');
            out.push_str(key);
            out.push('=');
            out.push_str(&value);
        };

        let counts = [
            ("sizeX", self.size_x, defaults.size_x),
            ("sizeY", self.size_y, defaults.size_y),
            ("sizeZ", self.size_z, defaults.size_z),
            ("sizeC", self.size_c, defaults.size_c),
            ("sizeT", self.size_t, defaults.size_t),
        ];
        for (key, value, default) in counts {
            if value != default {
                push(key, value.to_string());
            }
        }
        if self.pixel_type != defaults.pixel_type {
            push("pixelType", self.pixel_type.to_string());
        }
        if self.dimension_order != defaults.dimension_order {
            push("dimOrder", self.dimension_order.clone());
        }
        if self.rgb != defaults.rgb {
            push("rgb", self.rgb.to_string());
        }
        let flags = [
            ("indexed", self.indexed, defaults.indexed),
            ("little", self.little_endian, defaults.little_endian),
            ("interleaved", self.interleaved, defaults.interleaved),
        ];
        for (key, value, default) in flags {
            if value != default {
                push(key, value.to_string());
            }
        }
        if self.series != defaults.series {
            push("series", self.series.to_string());
        }
        let calibrations = [
            ("physicalSizeX", self.physical_size_x),
            ("physicalSizeY", self.physical_size_y),
            ("physicalSizeZ", self.physical_size_z),
            ("timeIncrement", self.time_increment),
        ];
        for (key, value) in calibrations {
            if let Some(value) = value {
                push(key, value.to_string());
            }
        }
        if let Some(date) = &self.acquisition_date {
            match NaiveDateTime::parse_from_str(date, ISO_DATE_FORMAT) {
                Ok(parsed) => push(
                    "acquisitionDate",
                    parsed.format(DESCRIPTOR_DATE_FORMAT).to_string(),
                ),
                Err(_) => warn!("Not writing unparseable acquisition date '{}'", date),
            }
        }

        out.push_str(EXTENSION);
        out
    }
}

impl FromStr for SyntheticDescriptor {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SyntheticDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_descriptor_string())
    }
}
