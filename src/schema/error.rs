/// Errors raised while determining the schema version of a document
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The document is not well-formed XML
    #[error("Parse error: {0}")]
    Parse(#[from] crate::xml::XmlError),

    /// The namespace names a release this crate does not know
    #[error("Unknown schema version '{token}' (namespace {namespace})")]
    UnknownVersion {
        /// Token derived from the namespace
        token: String,
        /// Namespace the token was derived from
        namespace: String,
    },

    /// The root element declares no namespace
    #[error("Root element <{0}> declares no schema namespace")]
    MissingNamespace(String),
}
