//! # XML Service
//!
//! A small owned element tree over `quick-xml`, used as the opaque XML
//! parse/serialize service by the rest of the crate.
//!
//! The tree deliberately keeps qualified names as written: an element's
//! prefix and local name are stored separately, while attributes (including
//! `xmlns` declarations) keep their qualified key. Namespace resolution is
//! left to callers, which only ever need the declarations on the root.
//!
//! ```rust
//! use omebridge::xml::{parse_document, to_xml_string};
//!
//! let root = parse_document(r#"<OME xmlns="urn:x"><Image ID="Image:0"/></OME>"#)?;
//! assert_eq!(root.local_name, "OME");
//! assert_eq!(root.children[0].attribute("ID"), Some("Image:0"));
//!
//! let text = to_xml_string(&root, 2)?;
//! assert!(text.contains(r#"<Image ID="Image:0"/>"#));
//! # Ok::<(), omebridge::xml::XmlError>(())
//! ```

mod error;
mod reader;
mod tree;
mod writer;


pub use error::XmlError;
pub use reader::parse_document;
pub use tree::XmlElement;
pub use writer::to_xml_string;
