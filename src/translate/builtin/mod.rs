//! Translators shipped with the crate.
//!
//! Every built-in kind translates to and from the canonical model; the raw
//! document and the typed root also have a direct pair between them.

use super::{Capability, MetadataKind, RegistryBuilder, TranslationContext, TranslationError};
use crate::dimension::CanonicalMetadata;
use crate::document::MetadataDocument;
use crate::formats::SyntheticDescriptor;
use crate::ome::OmeRoot;

mod document;
mod ome;
mod synthetic;

const MICROMETER: &str = "µm";
const SECOND: &str = "s";

/// Priority of the direct document/typed-root pair
pub(crate) const DIRECT_PRIORITY: i32 = 10;

impl MetadataKind for CanonicalMetadata {
    const KIND: Capability = Capability::CANONICAL;
}

impl MetadataKind for OmeRoot {
    const KIND: Capability = Capability::new("OmeRoot");
}

impl MetadataKind for MetadataDocument {
    const KIND: Capability = Capability::new("MetadataDocument");
}

impl MetadataKind for SyntheticDescriptor {
    const KIND: Capability = Capability::new("SyntheticDescriptor");
}

fn canonical_identity(
    source: &CanonicalMetadata,
    destination: &mut CanonicalMetadata,
    _ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    *destination = source.clone();
    Ok(())
}

/// Scale factor from `unit` to micrometers or seconds
fn unit_scale(unit: Option<&str>, base: &str) -> Option<f64> {
    let unit = match unit {
        None => return Some(1.0),
        Some(unit) => unit,
    };
    if unit == base {
        return Some(1.0);
    }
    match (base, unit) {
        (MICROMETER, "um") => Some(1.0),
        (MICROMETER, "nm") => Some(1e-3),
        (MICROMETER, "mm") => Some(1e3),
        (MICROMETER, "m") => Some(1e6),
        (SECOND, "ms") => Some(1e-3),
        (SECOND, "min") => Some(60.0),
        (SECOND, "h") => Some(3600.0),
        _ => None,
    }
}

pub(super) fn register_builtins(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register::<CanonicalMetadata, CanonicalMetadata>("canonical identity", 0, canonical_identity)
        .register::<SyntheticDescriptor, CanonicalMetadata>(
            "synthetic to canonical",
            0,
            synthetic::to_canonical,
        )
        .register::<CanonicalMetadata, SyntheticDescriptor>(
            "canonical to synthetic",
            0,
            synthetic::from_canonical,
        )
        .register::<OmeRoot, CanonicalMetadata>("typed root to canonical", 0, ome::to_canonical)
        .register::<CanonicalMetadata, OmeRoot>("canonical to typed root", 0, ome::from_canonical)
        .register::<MetadataDocument, OmeRoot>(
            "document to typed root",
            DIRECT_PRIORITY,
            document::to_ome,
        )
        .register::<OmeRoot, MetadataDocument>(
            "typed root to document",
            DIRECT_PRIORITY,
            document::from_ome,
        )
        .register::<MetadataDocument, CanonicalMetadata>(
            "document to canonical",
            0,
            document::to_canonical,
        )
        .register::<CanonicalMetadata, MetadataDocument>(
            "canonical to document",
            0,
            document::from_canonical,
        )
}
