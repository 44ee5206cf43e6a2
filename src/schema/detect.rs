use log::debug;

use super::{SchemaVersion, VersionError};
use crate::xml::{parse_document, XmlElement};

/// Root attributes consulted for the schema namespace, in priority order
pub const NAMESPACE_ATTRIBUTES: [&str; 3] = ["xmlns", "xmlns:ome", "xmlns:OME"];

/// The namespace declared on `root`, following [`NAMESPACE_ATTRIBUTES`] priority
pub fn namespace_of(root: &XmlElement) -> Option<&str> {
    NAMESPACE_ATTRIBUTES
        .iter()
        .find_map(|attr| root.attribute(attr).filter(|ns| !ns.is_empty()))
}

/// Determine the schema version of a parsed document
pub fn detect_version(root: &XmlElement) -> Result<SchemaVersion, VersionError> {
    let namespace = namespace_of(root)
        .ok_or_else(|| VersionError::MissingNamespace(root.qualified_name()))?;

    let version = SchemaVersion::from_namespace(namespace).map_err(|token| {
        VersionError::UnknownVersion {
            token,
            namespace: namespace.to_string(),
        }
    })?;
    debug!("Detected schema version {} from namespace {}", version, namespace);
    Ok(version)
}

/// Parse raw text and determine its schema version
pub fn detect_version_str(text: &str) -> Result<SchemaVersion, VersionError> {
    let root = parse_document(text)?;
    detect_version(&root)
}

/// Lightweight check that `text` is a well-formed OME document of `version`.
///
/// Full XSD conformance is not checked.
pub fn validate(text: &str, version: SchemaVersion) -> bool {
    let root = match parse_document(text) {
        Ok(root) => root,
        Err(e) => {
            debug!("Validation parse failure: {}", e);
            return false;
        }
    };
    root.local_name == "OME" && matches!(detect_version(&root), Ok(v) if v == version)
}
