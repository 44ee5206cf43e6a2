/// Errors that abort reading a typed root from a tree
#[derive(Debug, thiserror::Error)]
pub enum OmeError {
    /// The tree is not an `OME` document
    #[error("Expected <OME> root, found <{0}>")]
    UnexpectedRoot(String),

    /// A mandatory child element is absent
    #[error("{object} is missing mandatory element <{element}>")]
    MissingElement {
        /// Identifier or name of the parent
        object: String,
        /// Missing element
        element: &'static str,
    },

    /// A mandatory attribute is absent
    #[error("{object} is missing mandatory attribute {field}")]
    MissingField {
        /// Identifier or name of the owning node
        object: String,
        /// Missing attribute
        field: &'static str,
    },

    /// A mandatory attribute cannot be used
    #[error("{object}.{field} has invalid value '{value}'")]
    InvalidField {
        /// Identifier or name of the owning node
        object: String,
        /// Offending attribute
        field: &'static str,
        /// Offending value
        value: String,
    },
}
