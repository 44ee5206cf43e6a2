//! # Metadata Documents
//!
//! A [`MetadataDocument`] is a parsed schema document together with the
//! release it follows. It is created on parse, upgraded in place by the
//! [`MigrationChain`](crate::migration::MigrationChain) and discarded once it
//! has been translated into its destination.

use std::path::Path;

use crate::schema::{detect_version, SchemaVersion, VersionError};
use crate::xml::{parse_document, to_xml_string, XmlElement, XmlError};

/// A versioned metadata node tree
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDocument {
    /// Release the tree currently conforms to
    pub version: SchemaVersion,
    /// Root `OME` element
    pub root: XmlElement,
}

impl Default for MetadataDocument {
    fn default() -> Self {
        Self {
            version: SchemaVersion::LATEST,
            root: XmlElement::new("OME")
                .with_attribute("xmlns", SchemaVersion::LATEST.namespace()),
        }
    }
}

impl MetadataDocument {
    /// Wrap an already parsed root, detecting its version
    pub fn from_root(root: XmlElement) -> Result<Self, VersionError> {
        let version = detect_version(&root)?;
        Ok(Self { version, root })
    }

    /// Parse raw text
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        Self::from_root(parse_document(text)?)
    }

    /// Read and parse a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VersionError> {
        let text = std::fs::read_to_string(path).map_err(XmlError::from)?;
        Self::parse(&text)
    }

    /// True when no migration is needed
    pub fn is_latest(&self) -> bool {
        self.version.is_latest()
    }

    /// Serialize with two-space indentation
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        to_xml_string(&self.root, 2)
    }
}
