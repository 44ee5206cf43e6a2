//! # Metadata Translation
//!
//! Moves metadata between kinds of objects: raw documents, the typed
//! latest-schema root, synthetic descriptors and the canonical axis model.
//!
//! ## Architecture
//!
//! ```text
//!   SyntheticDescriptor ──┐                    ┌──> OmeRoot
//!   MetadataDocument ─────┼──> Canonical ──────┼──> MetadataDocument
//!   OmeRoot ──────────────┘    Metadata        └──> SyntheticDescriptor
//! ```
//!
//! Every kind is tagged with a [`Capability`]. A [`TranslatorRegistry`] maps
//! `(source, destination)` pairs to [`Translator`]s ordered by priority; the
//! [`TranslationEngine`] uses the best direct translator for a pair, falling
//! back to two hops through [`CanonicalMetadata`]. The registry refuses to
//! build unless every kind can reach the canonical model and back, so any
//! pair of registered kinds is reachable.
//!
//! Translation never leaves a destination half-written: translators work on
//! a staged copy. Values that cannot be carried over are skipped and
//! reported as [`PartialFieldError`]s, or fail the request in strict mode.
//!
//! ## Example
//!
//! ```rust
//! use omebridge::formats::SyntheticDescriptor;
//! use omebridge::ome::OmeRoot;
//! use omebridge::translate::TranslationEngine;
//!
//! let descriptor = SyntheticDescriptor::parse("cells&sizeZ=3.fake").unwrap();
//! let engine = TranslationEngine::standard();
//! let (root, report) = engine.translate_into::<OmeRoot>(&descriptor).unwrap();
//!
//! assert_eq!(root.images[0].pixels.size_z, 3);
//! assert!(report.is_complete());
//! ```

mod builtin;
mod context;
mod engine;
mod error;
mod kind;
mod registry;
mod translator;


pub use crate::dimension::CanonicalMetadata;
pub use context::TranslationContext;
pub use engine::{Route, TranslationEngine, TranslationReport};
pub use error::{CanonicalDirection, PartialFieldError, RegistryError, TranslationError};
pub use kind::{Capability, MetadataKind, MetadataObject};
pub use registry::{RegistryBuilder, TranslatorRegistry};
pub use translator::{TranslateFn, Translator, TypedTranslator};
