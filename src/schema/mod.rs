//! # Schema Versions
//!
//! The OME metadata schema has gone through a dozen incompatible releases.
//! This module names them, maps them to and from their XML namespaces and
//! detects which release a parsed document claims to follow.
//!
//! ## Detection
//!
//! The root element's namespace is read from `xmlns`, then `xmlns:ome`, then
//! `xmlns:OME`. A namespace ending in the legacy `ome.xsd` file marker is the
//! 2003 "FC" release; any other namespace contributes its last path segment
//! as the version token (`.../Schemas/OME/2016-06` is `2016-06`).
//!
//! A root with no namespace declaration at all is rejected with
//! [`VersionError::MissingNamespace`] rather than assumed to be current.

mod detect;
mod error;
mod version;

#[cfg(test)]
mod tests;

pub use detect::{detect_version, detect_version_str, namespace_of, validate, NAMESPACE_ATTRIBUTES};
pub use error::VersionError;
pub use version::{SchemaVersion, LEGACY_NAMESPACE_MARKER, OME_NAMESPACE_BASE};
