use serde::{Deserialize, Serialize};

use super::{CanonicalImageMetadata, DimensionError};

/// Dataset-level canonical metadata: the translation hub between dialects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMetadata {
    /// Name of the file or descriptor the metadata came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// Human-readable format name of the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// One entry per image series
    pub series: Vec<CanonicalImageMetadata>,
}

impl CanonicalMetadata {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every series
    pub fn validate(&self) -> Result<(), DimensionError> {
        self.series.iter().try_for_each(CanonicalImageMetadata::validate)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
