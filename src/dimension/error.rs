use super::AxisType;

/// Errors raised when a series description violates the dimension invariants
#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    /// Axis length must be positive
    #[error("Axis {axis:?} has invalid length {length}")]
    InvalidAxisLength {
        /// Offending axis
        axis: AxisType,
        /// Offending length
        length: u32,
    },

    /// The axis set is not a permutation of XYZCT
    #[error("Invalid dimension order: {0}")]
    InvalidDimensionOrder(String),

    /// Channel length is not a whole number of samples
    #[error("Channel length {total} is not a multiple of {samples_per_pixel} samples per pixel")]
    ChannelMismatch {
        /// Total channel axis length
        total: u32,
        /// Samples per pixel
        samples_per_pixel: u32,
    },

    /// Pixel type name is not recognized
    #[error("Unknown pixel type: {0}")]
    UnknownPixelType(String),
}
