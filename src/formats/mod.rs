//! # Formats
//!
//! The format registry identifies files by name and builds default image
//! names; the translation engine consults it only for naming.
//!
//! This module also hosts the synthetic descriptor format: a dataset
//! described entirely by a `.fake` file name, used to drive conversions and
//! tests without any pixel data.
//!
//! ```rust
//! use omebridge::formats::{FormatRegistry, SyntheticDescriptor};
//!
//! let registry = FormatRegistry::standard();
//! assert_eq!(registry.identify("cells.ome.tiff").unwrap().name, "OME-TIFF");
//! assert_eq!(registry.default_image_name("/data/cells.ome.tiff", 1, 3), "cells #2");
//!
//! let fake: SyntheticDescriptor = "test&sizeZ=5&pixelType=uint16.fake".parse()?;
//! assert_eq!((fake.size_x, fake.size_z), (512, 5));
//! # Ok::<(), omebridge::formats::FormatError>(())
//! ```

mod error;
mod registry;
mod synthetic;


pub use error::FormatError;
pub use registry::{FormatInfo, FormatRegistry};
pub use synthetic::{SyntheticDescriptor, DESCRIPTOR_DATE_FORMAT, ISO_DATE_FORMAT};
