use std::fmt;

use super::Capability;
use crate::dimension::DimensionError;
use crate::formats::FormatError;
use crate::ome::OmeError;
use crate::schema::SchemaVersion;

/// A value a translator met but could not carry over.
///
/// Non-fatal: the field is skipped and translation continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{object}: skipped {field}='{value}' ({reason})")]
pub struct PartialFieldError {
    /// Identifier or name of the node holding the field
    pub object: String,
    /// Field name as written in the source
    pub field: String,
    /// Rejected value
    pub value: String,
    /// Why the value was rejected
    pub reason: String,
}

impl PartialFieldError {
    /// Build a warning record
    pub fn new(object: &str, field: &str, value: &str, reason: &str) -> Self {
        Self {
            object: object.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while translating metadata
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// Neither a direct nor a canonical route exists
    #[error("No translator from {from} to {to}")]
    NoTranslator {
        /// Source capability
        from: Capability,
        /// Destination capability
        to: Capability,
    },

    /// A translator was handed an object of the wrong kind
    #[error("Translator expected {expected} but received {found}")]
    TypeMismatch {
        /// Capability the translator handles
        expected: Capability,
        /// Capability actually passed
        found: Capability,
    },

    /// A raw document must be migrated before it can be translated
    #[error("Document is at schema {found}; translation requires {required}")]
    StaleSchema {
        /// Version of the document
        found: SchemaVersion,
        /// Version translators read
        required: SchemaVersion,
    },

    /// A mandatory identifying field is absent
    #[error("{object} is missing mandatory field {field}")]
    MissingField {
        /// Owning object
        object: String,
        /// Missing field
        field: String,
    },

    /// Strict mode: fields were skipped
    #[error("{} field(s) could not be translated", .0.len())]
    PartialFields(Vec<PartialFieldError>),

    /// Typed model could not be read
    #[error(transparent)]
    Ome(#[from] OmeError),

    /// Geometry violates the dimension invariants
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// Descriptor could not be read
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Which canonical translator a kind lacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalDirection {
    /// kind -> canonical
    ToCanonical,
    /// canonical -> kind
    FromCanonical,
}

impl fmt::Display for CanonicalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalDirection::ToCanonical => f.write_str("to"),
            CanonicalDirection::FromCanonical => f.write_str("from"),
        }
    }
}

/// Errors raised while building a registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A kind could not reach, or be reached from, the canonical model
    #[error("{kind} has no translator {direction} the canonical model")]
    MissingCanonicalTranslator {
        /// Kind lacking the translator
        kind: Capability,
        /// Missing direction
        direction: CanonicalDirection,
    },
}
