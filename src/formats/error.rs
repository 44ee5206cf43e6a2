use crate::dimension::DimensionError;

/// Errors raised while reading a synthetic descriptor
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// A mandatory value cannot be used
    #[error("Invalid value '{value}' for descriptor key {key}")]
    InvalidValue {
        /// Descriptor key
        key: String,
        /// Offending value
        value: String,
    },

    /// A `&`-separated token without `=`
    #[error("Malformed descriptor token '{0}'")]
    MalformedToken(String),

    /// The sizes do not describe a valid series
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}
