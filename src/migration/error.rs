use crate::schema::{SchemaVersion, VersionError};
use crate::xml::XmlError;

/// Errors raised while upgrading a document to the latest schema
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The input could not be parsed or its version identified
    #[error(transparent)]
    Version(#[from] VersionError),

    /// No authored step leaves this version
    #[error("No migration step is defined from schema {0}")]
    MissingStep(SchemaVersion),

    /// The root namespace could not be normalized before a step
    #[error("Namespace normalization failed before step from {version}: {reason}")]
    Namespace {
        /// Version the step expects
        version: SchemaVersion,
        /// What was wrong with the root declarations
        reason: String,
    },

    /// An authored rule table could not be compiled
    #[error("Failed to compile migration step from {from}: {reason}")]
    Compile {
        /// Source version of the step
        from: SchemaVersion,
        /// Compilation failure
        reason: String,
    },

    /// A transform step failed or produced malformed output
    #[error("Migration step {from} -> {to} failed: {reason}")]
    Step {
        /// Source version of the step
        from: SchemaVersion,
        /// Target version of the step
        to: SchemaVersion,
        /// Failure reported by the step
        reason: String,
    },

    /// The upgraded tree could not be serialized
    #[error("Failed to serialize migrated document: {0}")]
    Output(#[from] XmlError),
}
