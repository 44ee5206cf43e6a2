//! # omebridge - Imaging Metadata Migration and Translation
//!
//! `omebridge` reconciles the different in-memory representations of one
//! imaging dataset's metadata: descriptors produced by format readers, a
//! generic axis-based image model, and the OME metadata schema, which has
//! gone through a dozen incompatible releases.
//!
//! ## Key Features
//!
//! - **Schema Migration**: Any document from 2003-FC onwards is upgraded to
//!   the latest release through a chain of authored per-release steps. Each
//!   step is compiled once and cached; a failed migration leaves the
//!   document untouched.
//!
//! - **Translation Dispatch**: Metadata kinds are tagged with capabilities.
//!   A registry picks the best translator for a pair and falls back to two
//!   hops through the canonical axis model, so every registered pair of
//!   kinds is reachable.
//!
//! - **Semantic Comparison**: Two documents are compared structurally,
//!   ignoring generated identifiers and annotations, and following
//!   `...Settings` references to the hardware they point at.
//!
//! ## Quick Start
//!
//! ```rust
//! use omebridge::prelude::*;
//!
//! // A 2008-09 document
//! let legacy = r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2008-09">
//!   <Image ID="Image:0" Name="cells">
//!     <Pixels ID="Pixels:0" DimensionOrder="XYZCT" PixelType="uint8"
//!             SizeX="64" SizeY="64" SizeZ="1" SizeC="1" SizeT="1"/>
//!   </Image>
//! </OME>"#;
//!
//! let mut document = MetadataDocument::parse(legacy)?;
//! let report = MigrationChain::new().migrate(&mut document)?;
//! assert_eq!(report.to, SchemaVersion::LATEST);
//!
//! // Typed view of the upgraded document
//! let (root, _) = TranslationEngine::standard().translate_into::<OmeRoot>(&document)?;
//! assert_eq!(root.images[0].pixels.size_x, 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`xml`]: Element tree, parser and serializer
//! - [`schema`]: Schema releases and version detection
//! - [`document`]: Versioned metadata documents
//! - [`migration`]: The per-release upgrade chain
//! - [`dimension`]: Canonical axis model of an image series
//! - [`compare`]: Reference-aware semantic tree comparison
//! - [`ome`]: Typed model of a latest-release document
//! - [`formats`]: File-type identification and synthetic descriptors
//! - [`translate`]: Translator registry and dispatch engine

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod compare;
pub mod dimension;
pub mod document;
pub mod formats;
pub mod migration;
pub mod ome;
pub mod schema;
pub mod translate;
pub mod xml;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::compare::{ComparatorOptions, ComparisonReport, EqualityComparator};
    pub use crate::dimension::{
        Axis, AxisType, CanonicalImageMetadata, CanonicalMetadata, DimensionError, PixelType,
    };
    pub use crate::document::MetadataDocument;
    pub use crate::formats::{FormatRegistry, SyntheticDescriptor};
    pub use crate::migration::{MigrationChain, MigrationError, MigrationReport};
    pub use crate::ome::OmeRoot;
    pub use crate::schema::{detect_version, SchemaVersion, VersionError};
    pub use crate::translate::{
        Capability, MetadataKind, PartialFieldError, TranslationEngine, TranslationError,
        TranslatorRegistry,
    };
    pub use crate::xml::{parse_document, XmlElement};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
