/// Errors raised by the XML service
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// Error reported by the underlying XML reader
    #[error("XML parsing error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Malformed attribute in a start tag
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Document structure is not a single well-formed element tree
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// Failure while writing the tree back to text
    #[error("XML write error: {0}")]
    Write(String),

    /// I/O error reading a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 encoding error in names or content
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl XmlError {
    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        XmlError::Write(err.to_string())
    }
}
