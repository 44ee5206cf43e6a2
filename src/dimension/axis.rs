use serde::{Deserialize, Serialize};

/// The five canonical axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisType {
    /// Image width
    X,
    /// Image height
    Y,
    /// Focal plane
    Z,
    /// Channel (total samples, including RGB components)
    Channel,
    /// Time point
    Time,
}

impl AxisType {
    /// All axes in `XYZCT` order
    pub const ALL: [AxisType; 5] = [
        AxisType::X,
        AxisType::Y,
        AxisType::Z,
        AxisType::Channel,
        AxisType::Time,
    ];

    /// Letter used in dimension order strings
    pub fn letter(&self) -> char {
        match self {
            AxisType::X => 'X',
            AxisType::Y => 'Y',
            AxisType::Z => 'Z',
            AxisType::Channel => 'C',
            AxisType::Time => 'T',
        }
    }

    /// Inverse of [`AxisType::letter`], case-insensitive
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(AxisType::X),
            'Y' => Some(AxisType::Y),
            'Z' => Some(AxisType::Z),
            'C' => Some(AxisType::Channel),
            'T' => Some(AxisType::Time),
            _ => None,
        }
    }

    /// True for the two spatial plane axes
    pub fn is_planar(&self) -> bool {
        matches!(self, AxisType::X | AxisType::Y)
    }
}

/// One axis of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Which axis this is
    pub axis_type: AxisType,
    /// Number of samples along the axis
    pub length: u32,
    /// Physical step between samples, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration: Option<f64>,
    /// Unit of the calibration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Axis {
    /// An uncalibrated axis
    pub fn new(axis_type: AxisType, length: u32) -> Self {
        Self {
            axis_type,
            length,
            calibration: None,
            unit: None,
        }
    }

    /// Builder-style calibration setter
    pub fn with_calibration(mut self, calibration: f64, unit: Option<&str>) -> Self {
        self.calibration = Some(calibration);
        self.unit = unit.map(str::to_string);
        self
    }

    /// Calibration, defaulting to 1.0 when absent
    pub fn calibration_or_default(&self) -> f64 {
        self.calibration.unwrap_or(1.0)
    }
}
