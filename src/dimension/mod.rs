//! # Dimension Model
//!
//! The canonical axis-based description of an image series, used as the hub
//! every metadata dialect translates through.
//!
//! A series is five ordered axes (X, Y, Z, channel and time), each with a
//! length, an optional physical calibration and an optional unit, plus the
//! pixel storage description (pixel type, endianness, RGB/indexed/interleaved
//! flags).
//!
//! ## Invariants
//!
//! - every axis length is greater than zero
//! - the dimension order is a permutation of `XYZCT`
//! - the channel axis length is a multiple of the samples per pixel, so
//!   `effective_channel_count() * samples_per_pixel == size(Channel)`
//! - an absent calibration reads as `1.0` in every calculation

mod axis;
mod canonical;
mod error;
mod image;
mod order;
mod pixel_type;

#[cfg(test)]
mod tests;

pub use axis::{Axis, AxisType};
pub use canonical::CanonicalMetadata;
pub use error::DimensionError;
pub use image::CanonicalImageMetadata;
pub use order::{canonicalize_dimension_order, is_valid_dimension_order, ome_dimension_order, DEFAULT_DIMENSION_ORDER};
pub use pixel_type::PixelType;
