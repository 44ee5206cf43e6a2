use serde::{Deserialize, Serialize};

use crate::dimension::{PixelType, DEFAULT_DIMENSION_ORDER};

/// A measured value with an optional unit symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric value
    pub value: f64,
    /// Unit symbol (`µm`, `s`, `nm`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Quantity {
    /// A quantity in the given unit
    pub fn new(value: f64, unit: Option<&str>) -> Self {
        Self {
            value,
            unit: unit.map(str::to_string),
        }
    }
}

/// Typed root of a latest-schema document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OmeRoot {
    /// Software that wrote the document
    pub creator: Option<String>,

    /// Instruments referenced by images
    pub instruments: Vec<Instrument>,

    /// One image per series
    pub images: Vec<Image>,

    /// Comment annotations from `StructuredAnnotations`
    pub annotations: Vec<CommentAnnotation>,
}

impl OmeRoot {
    /// Create an empty root
    pub fn new() -> Self {
        Self::default()
    }

    /// Image by identifier
    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.id == id)
    }

    /// Detector by identifier, searching every instrument
    pub fn detector(&self, id: &str) -> Option<&Detector> {
        self.instruments
            .iter()
            .flat_map(|i| i.detectors.iter())
            .find(|d| d.id == id)
    }
}

/// One image series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Identifier, e.g. `Image:0`
    pub id: String,

    /// Display name
    pub name: Option<String>,

    /// ISO 8601 acquisition timestamp
    pub acquisition_date: Option<String>,

    /// Free text description
    pub description: Option<String>,

    /// Identifier of the instrument used
    pub instrument_ref: Option<String>,

    /// Objective used for this image
    pub objective_settings: Option<ObjectiveSettings>,

    /// Pixel geometry and storage
    pub pixels: Pixels,
}

/// Pixel geometry and storage of an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pixels {
    /// Identifier, e.g. `Pixels:0`
    pub id: String,
    /// Dimension order, always starting with `XY`
    pub dimension_order: String,
    /// Sample storage type
    pub pixel_type: PixelType,
    /// Bits used per sample
    pub significant_bits: Option<u32>,
    /// Byte order of multi-byte samples
    pub big_endian: Option<bool>,
    /// RGB samples stored contiguously
    pub interleaved: Option<bool>,
    /// Width in pixels
    pub size_x: u32,
    /// Height in pixels
    pub size_y: u32,
    /// Number of focal planes
    pub size_z: u32,
    /// Total samples along the channel axis
    pub size_c: u32,
    /// Number of time points
    pub size_t: u32,
    /// Pixel width
    pub physical_size_x: Option<Quantity>,
    /// Pixel height
    pub physical_size_y: Option<Quantity>,
    /// Focal step
    pub physical_size_z: Option<Quantity>,
    /// Time between time points
    pub time_increment: Option<Quantity>,
    /// Channels in order
    pub channels: Vec<Channel>,
    /// Per-plane timing
    pub planes: Vec<Plane>,
}

impl Default for Pixels {
    fn default() -> Self {
        Self {
            id: String::new(),
            dimension_order: default_ome_order(),
            pixel_type: PixelType::default(),
            significant_bits: None,
            big_endian: None,
            interleaved: None,
            size_x: 1,
            size_y: 1,
            size_z: 1,
            size_c: 1,
            size_t: 1,
            physical_size_x: None,
            physical_size_y: None,
            physical_size_z: None,
            time_increment: None,
            channels: Vec::new(),
            planes: Vec::new(),
        }
    }
}

impl Pixels {
    /// Samples per pixel of the first channel, 1 when unknown
    pub fn samples_per_pixel(&self) -> u32 {
        self.channels
            .first()
            .and_then(|c| c.samples_per_pixel)
            .unwrap_or(1)
    }
}

/// One channel of an image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Identifier, e.g. `Channel:0:1`
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Samples stored per pixel
    pub samples_per_pixel: Option<u32>,
    /// Signed packed RGBA
    pub color: Option<i32>,
    /// Excitation wavelength
    pub excitation_wavelength: Option<Quantity>,
    /// Emission wavelength
    pub emission_wavelength: Option<Quantity>,
    /// Detector used for this channel
    pub detector_settings: Option<DetectorSettings>,
}

/// Timing of one plane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Focal index
    pub the_z: u32,
    /// Channel index
    pub the_c: u32,
    /// Time index
    pub the_t: u32,
    /// Time since acquisition start
    pub delta_t: Option<Quantity>,
    /// Exposure
    pub exposure_time: Option<Quantity>,
}

/// Acquisition hardware
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Identifier, e.g. `Instrument:0`
    pub id: String,
    /// Model of the microscope stand
    pub microscope_model: Option<String>,
    /// Detectors
    pub detectors: Vec<Detector>,
    /// Objectives
    pub objectives: Vec<Objective>,
}

/// A detector of an instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    /// Identifier
    pub id: String,
    /// Model name
    pub model: Option<String>,
    /// Detector technology (`CCD`, `PMT`, ...)
    pub detector_type: Option<String>,
    /// Gain
    pub gain: Option<f64>,
}

/// An objective of an instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Identifier
    pub id: String,
    /// Model name
    pub model: Option<String>,
    /// Magnification
    pub nominal_magnification: Option<f64>,
    /// Numerical aperture
    pub lens_na: Option<f64>,
}

/// Reference from a channel to its detector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Identifier of the referenced detector
    pub id: String,
    /// Gain
    pub gain: Option<f64>,
}

/// Reference from an image to its objective
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveSettings {
    /// Identifier of the referenced objective
    pub id: String,
}

/// Free text annotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentAnnotation {
    /// Identifier
    pub id: String,
    /// Comment text
    pub value: String,
}

/// Dimension order used when a source does not specify one
fn default_ome_order() -> String {
    crate::dimension::ome_dimension_order(DEFAULT_DIMENSION_ORDER)
}
