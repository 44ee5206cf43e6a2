use super::ome;
use crate::dimension::CanonicalMetadata;
use crate::document::MetadataDocument;
use crate::ome::OmeRoot;
use crate::schema::SchemaVersion;
use crate::translate::{PartialFieldError, TranslationContext, TranslationError};

fn read_latest(
    document: &MetadataDocument,
    ctx: &mut TranslationContext<'_>,
) -> Result<OmeRoot, TranslationError> {
    if !document.is_latest() {
        return Err(TranslationError::StaleSchema {
            found: document.version,
            required: SchemaVersion::LATEST,
        });
    }
    let mut warnings = Vec::new();
    let root = OmeRoot::from_element(&document.root, &mut warnings)?;
    for warning in warnings {
        ctx.warn(warning);
    }
    Ok(root)
}

pub(super) fn to_ome(
    source: &MetadataDocument,
    destination: &mut OmeRoot,
    ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    *destination = read_latest(source, ctx)?;
    Ok(())
}

pub(super) fn from_ome(
    source: &OmeRoot,
    destination: &mut MetadataDocument,
    _ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    *destination = source.to_document();
    Ok(())
}

pub(super) fn to_canonical(
    source: &MetadataDocument,
    destination: &mut CanonicalMetadata,
    ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    let root = read_latest(source, ctx)?;
    ome::to_canonical(&root, destination, ctx)
}

/// Everything but the images of `destination`, which are about to be replaced
fn kept_content(destination: &MetadataDocument, ctx: &mut TranslationContext<'_>) -> OmeRoot {
    let mut kept = destination.root.clone();
    kept.children.retain(|child| child.local_name != "Image");

    let mut warnings = Vec::new();
    let read = OmeRoot::from_element(&kept, &mut warnings);
    for warning in warnings {
        ctx.warn(warning);
    }
    read.unwrap_or_else(|err| {
        ctx.warn(PartialFieldError::new(
            &kept.qualified_name(),
            "Instrument",
            &err.to_string(),
            "existing instruments and annotations could not be read",
        ));
        OmeRoot::default()
    })
}

pub(super) fn from_canonical(
    source: &CanonicalMetadata,
    destination: &mut MetadataDocument,
    ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    // instruments and annotations already in the destination survive
    let mut root = if destination.is_latest() {
        kept_content(destination, ctx)
    } else {
        OmeRoot::default()
    };
    ome::from_canonical(source, &mut root, ctx)?;
    *destination = root.to_document();
    Ok(())
}
