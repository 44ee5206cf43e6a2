//! Integration tests for omebridge
//!
//! These tests run the full pipeline: parse, migrate, translate, serialize
//! and compare.

use omebridge::prelude::*;
use omebridge::xml::{parse_document, to_xml_string};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const LEGACY_FIXTURE: &str = "tests/fixtures/legacy_2003.ome.xml";
const CURRENT_FIXTURE: &str = "tests/fixtures/current.ome.xml";

fn fixture(name: &str) -> String {
    fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join(name)).unwrap()
}

fn calibrated_series() -> CanonicalMetadata {
    let mut series =
        CanonicalImageMetadata::from_sizes("XYZCT", [16, 16, 4, 2, 3], PixelType::Uint16, 1)
            .unwrap();
    series.set_calibration(AxisType::X, Some(5.0), Some("µm"));
    series.set_calibration(AxisType::Y, Some(6.0), Some("µm"));
    series.set_calibration(AxisType::Z, Some(7.0), Some("µm"));
    series.set_calibration(AxisType::Time, Some(8.0), Some("s"));
    CanonicalMetadata {
        source_name: Some("calibrated.fake".to_string()),
        series: vec![series],
        ..Default::default()
    }
}

fn calibrations(canonical: &CanonicalMetadata) -> Vec<Option<f64>> {
    [AxisType::X, AxisType::Y, AxisType::Z, AxisType::Time]
        .iter()
        .map(|axis| canonical.series[0].axis(*axis).and_then(|a| a.calibration))
        .collect()
}

/// Synthetic descriptor to a serialized latest-schema document
#[test]
fn test_synthetic_descriptor_to_document() {
    let descriptor = SyntheticDescriptor::parse("test&sizeX=512&sizeY=512.fake").unwrap();
    let (document, report) = TranslationEngine::standard()
        .translate_into::<MetadataDocument>(&descriptor)
        .unwrap();
    assert!(report.is_complete());
    assert!(document.is_latest());

    let xml = document.to_xml_string().unwrap();
    let reparsed = parse_document(&xml).unwrap();
    let pixels = reparsed.child("Image").unwrap().child("Pixels").unwrap();
    assert_eq!(pixels.attribute("DimensionOrder"), Some("XYZCT"));
    assert_eq!(pixels.attribute("SizeX"), Some("512"));
    assert_eq!(pixels.attribute("SizeY"), Some("512"));
    for size in ["SizeZ", "SizeC", "SizeT"] {
        assert_eq!(pixels.attribute(size), Some("1"), "{}", size);
    }
    assert_eq!(detect_version(&reparsed).unwrap(), SchemaVersion::LATEST);
}

/// Distinct calibrations survive every format and back
#[test]
fn test_calibration_round_trips() {
    let engine = TranslationEngine::standard();
    let original = calibrated_series();
    let expected = vec![Some(5.0), Some(6.0), Some(7.0), Some(8.0)];

    let (descriptor, report) = engine.translate_into::<SyntheticDescriptor>(&original).unwrap();
    assert!(report.is_complete());
    let (back, _) = engine.translate_into::<CanonicalMetadata>(&descriptor).unwrap();
    assert_eq!(calibrations(&back), expected);

    let (root, _) = engine.translate_into::<OmeRoot>(&original).unwrap();
    let (back, _) = engine.translate_into::<CanonicalMetadata>(&root).unwrap();
    assert_eq!(calibrations(&back), expected);

    let (document, _) = engine.translate_into::<MetadataDocument>(&original).unwrap();
    let reparsed = MetadataDocument::parse(&document.to_xml_string().unwrap()).unwrap();
    let (back, _) = engine.translate_into::<CanonicalMetadata>(&reparsed).unwrap();
    assert_eq!(calibrations(&back), expected);
    assert_eq!(back.series[0].dimension_order(), "XYZCT");
}

/// Translating twice yields identical documents
#[test]
fn test_translation_is_deterministic() {
    let descriptor = SyntheticDescriptor::parse("plate&sizeC=4&series=3.fake").unwrap();
    let engine = TranslationEngine::standard();
    let (first, _) = engine.translate_into::<MetadataDocument>(&descriptor).unwrap();
    let (second, _) = engine.translate_into::<MetadataDocument>(&descriptor).unwrap();
    assert_eq!(first, second);
}

/// IDs and annotations do not matter, geometry does
#[test]
fn test_semantic_equality() {
    let descriptor = SyntheticDescriptor::parse("cells&sizeX=512&sizeY=512.fake").unwrap();
    let (document, _) = TranslationEngine::standard()
        .translate_into::<MetadataDocument>(&descriptor)
        .unwrap();

    let mut other = document.root.clone();
    other.walk_mut(&mut |element: &mut XmlElement| {
        if let Some(id) = element.attribute("ID").map(str::to_string) {
            element.set_attribute("ID", format!("urn:lsid:{}", id));
        }
    });
    other.children.push(
        XmlElement::new("StructuredAnnotations").with_child(
            XmlElement::new("CommentAnnotation")
                .with_attribute("ID", "Annotation:0")
                .with_child(XmlElement::new("Value").with_text("extra")),
        ),
    );

    let comparator = EqualityComparator::new();
    assert!(comparator.equals(&document.root, &other));

    other
        .child_mut("Image")
        .unwrap()
        .child_mut("Pixels")
        .unwrap()
        .set_attribute("SizeX", 256);
    let report = comparator.compare(&document.root, &other);
    assert!(!report.is_equal());
    assert_eq!(report.differences.len(), 1);
}

/// A 2003 file on disk upgrades to the hand-written current equivalent
#[test]
fn test_legacy_file_matches_current_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.ome.xml");
    fs::write(&path, fixture(LEGACY_FIXTURE)).unwrap();

    let mut legacy = MetadataDocument::from_file(&path).unwrap();
    assert_eq!(legacy.version, SchemaVersion::V2003Fc);
    let report = MigrationChain::new().migrate(&mut legacy).unwrap();
    assert_eq!(report.from, SchemaVersion::V2003Fc);
    assert_eq!(report.to, SchemaVersion::LATEST);

    let current = MetadataDocument::parse(&fixture(CURRENT_FIXTURE)).unwrap();
    let report = EqualityComparator::new().compare(&legacy.root, &current.root);
    assert!(report.is_equal(), "{}", report);

    let (root, report) = TranslationEngine::standard()
        .translate_into::<OmeRoot>(&legacy)
        .unwrap();
    assert!(report.is_complete());
    let pixels = &root.images[0].pixels;
    assert_eq!(pixels.pixel_type, PixelType::Uint16);
    assert_eq!(pixels.channels[0].name.as_deref(), Some("DAPI"));
    let x = pixels.physical_size_x.as_ref().unwrap();
    assert_eq!((x.value, x.unit.as_deref()), (0.5, Some("µm")));
}

/// Upgrading an upgraded document changes nothing
#[test]
fn test_upgrade_is_idempotent() {
    let chain = MigrationChain::new();
    let once = chain.upgrade_str(&fixture(LEGACY_FIXTURE)).unwrap();
    let twice = chain.upgrade_str(&once).unwrap();
    assert_eq!(once, twice);

    let mut document = MetadataDocument::parse(&once).unwrap();
    let before = document.clone();
    assert!(chain.migrate(&mut document).unwrap().is_noop());
    assert_eq!(document, before);
}

/// Upgraded documents can be written and read back from disk
#[test]
fn test_upgraded_document_written_to_disk() {
    let dir = tempdir().unwrap();
    let mut document = MetadataDocument::parse(&fixture(LEGACY_FIXTURE)).unwrap();
    MigrationChain::new().migrate(&mut document).unwrap();

    let path = dir.path().join("upgraded.ome.xml");
    fs::write(&path, to_xml_string(&document.root, 4).unwrap()).unwrap();

    let reread = MetadataDocument::from_file(&path).unwrap();
    assert!(reread.is_latest());
    assert!(EqualityComparator::new().equals(&document.root, &reread.root));
}

/// Malformed inputs fail without panicking
#[test]
fn test_malformed_inputs_fail_cleanly() {
    assert!(MetadataDocument::parse("<OME").is_err());
    assert!(MetadataDocument::parse("<OME/>").is_err());
    assert!(MetadataDocument::parse(r#"<OME xmlns="http://example.com/Schemas/OME/1999-01"/>"#).is_err());
    assert!(MigrationChain::new().upgrade_text("not xml").is_none());
    assert!(SyntheticDescriptor::parse("bad&sizeX=0.fake").is_err());
}
