use super::*;
use crate::document::MetadataDocument;
use crate::xml::XmlElement;

const LEGACY_2003: &str = r#"<?xml version="1.0"?>
<OME xmlns="http://www.openmicroscopy.org/XMLschemas/OME/FC/ome.xsd"
     xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
     xsi:schemaLocation="http://www.openmicroscopy.org/XMLschemas/OME/FC/ome.xsd http://www.openmicroscopy.org/XMLschemas/OME/FC/ome.xsd">
  <Image ID="urn:lsid:Image:1" Name="legacy" DefaultPixels="urn:lsid:Pixels:1">
    <CreationDate>2003-08-01T10:00:00</CreationDate>
    <ChannelInfo ID="urn:lsid:ChannelInfo:1" Name="DAPI" SamplesPerPixel="1"/>
    <Dimensions PixelSizeX="0.5" PixelSizeY="0.5" PixelSizeZ="2.0"/>
    <Pixels ID="urn:lsid:Pixels:1" DimensionOrder="XYZCT" PixelType="Uint16" BigEndian="false"
            SizeX="256" SizeY="256" SizeZ="3" SizeC="1" SizeT="1"/>
  </Image>
  <CustomAttributes><Experimenter ID="e1"/></CustomAttributes>
</OME>"#;

const CURRENT: &str = r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2016-06">
  <Image ID="Image:0" Name="current">
    <Pixels ID="Pixels:0" DimensionOrder="XYZCT" Type="uint8" SizeX="8" SizeY="8" SizeZ="1" SizeC="1" SizeT="1"/>
  </Image>
</OME>"#;

fn all_elements(root: &XmlElement) -> Vec<&XmlElement> {
    root.descendants()
}

#[test]
fn test_latest_document_is_untouched() {
    let mut doc = MetadataDocument::parse(CURRENT).unwrap();
    let before = doc.clone();

    let report = MigrationChain::new().migrate(&mut doc).unwrap();
    assert!(report.is_noop());
    assert_eq!(report.from, SchemaVersion::LATEST);
    assert_eq!(doc, before);
}

#[test]
fn test_legacy_2003_uses_jump_step() {
    let chain = MigrationChain::new();
    let plan = chain.plan(SchemaVersion::V2003Fc).unwrap();
    assert_eq!(
        plan[0],
        AppliedStep {
            from: SchemaVersion::V2003Fc,
            to: SchemaVersion::V2008_09
        }
    );
    assert!(plan.iter().all(|s| s.from != SchemaVersion::V2007_06));
    assert_eq!(plan.last().unwrap().to, SchemaVersion::LATEST);

    let plan_2007 = chain.plan(SchemaVersion::V2007_06).unwrap();
    assert_eq!(plan_2007[0].to, SchemaVersion::V2008_02);
    assert_eq!(plan_2007[1].to, SchemaVersion::V2008_09);
    assert_eq!(plan_2007.len(), plan.len() + 1);
}

#[test]
fn test_full_chain_from_2003() {
    let mut doc = MetadataDocument::parse(LEGACY_2003).unwrap();
    assert_eq!(doc.version, SchemaVersion::V2003Fc);

    let report = MigrationChain::new().migrate(&mut doc).unwrap();
    assert_eq!(report.to, SchemaVersion::LATEST);
    assert_eq!(doc.version, SchemaVersion::LATEST);

    let root = &doc.root;
    assert_eq!(root.attribute("xmlns"), Some(SchemaVersion::LATEST.namespace().as_str()));
    assert_eq!(
        root.attribute("xsi:schemaLocation"),
        Some(SchemaVersion::LATEST.schema_location().as_str())
    );
    assert!(root.child("CustomAttributes").is_none());
    assert!(all_elements(root).iter().all(|e| e.prefix.is_none()));
    assert!(root
        .attributes
        .iter()
        .all(|(k, _)| !k.starts_with("xmlns:ns")));

    let image = root.child("Image").unwrap();
    assert_eq!(image.attribute("DefaultPixels"), None);
    assert_eq!(
        image.child("AcquisitionDate").unwrap().text.as_deref(),
        Some("2003-08-01T10:00:00")
    );
    assert!(image.child("Dimensions").is_none());
    assert!(image.child("ChannelInfo").is_none());
    assert!(image.child("LogicalChannel").is_none());

    let pixels = image.child("Pixels").unwrap();
    assert_eq!(pixels.attribute("Type"), Some("uint16"));
    assert_eq!(pixels.attribute("PixelType"), None);
    assert_eq!(pixels.attribute("PhysicalSizeX"), Some("0.5"));
    assert_eq!(pixels.attribute("PhysicalSizeZ"), Some("2.0"));
    assert_eq!(pixels.attribute("PhysicalSizeXUnit"), Some("µm"));
    assert_eq!(pixels.attribute("SignificantBits"), Some("16"));
    assert_eq!(pixels.attribute("Interleaved"), Some("false"));

    let channel = pixels.child("Channel").unwrap();
    assert_eq!(channel.attribute("Name"), Some("DAPI"));
}

#[test]
fn test_migrated_output_reparses_as_latest() {
    let chain = MigrationChain::new();
    let upgraded = chain.upgrade_str(LEGACY_2003).unwrap();

    let mut reparsed = MetadataDocument::parse(&upgraded).unwrap();
    assert!(reparsed.is_latest());
    let before = reparsed.clone();
    assert!(chain.migrate(&mut reparsed).unwrap().is_noop());
    assert_eq!(reparsed, before);
}

#[test]
fn test_prefixed_alias_is_normalized() {
    let text = r#"<ome:OME xmlns:ome="http://www.openmicroscopy.org/Schemas/OME/2010-06">
      <ome:Image ID="Image:0">
        <ome:AcquiredDate>2010-07-01T00:00:00</ome:AcquiredDate>
        <ome:Pixels ID="Pixels:0" DimensionOrder="XYCZT" Type="float" PhysicalSizeX="-1"
                    SizeX="2" SizeY="2" SizeZ="1" SizeC="1" SizeT="1"/>
      </ome:Image>
    </ome:OME>"#;
    let mut doc = MetadataDocument::parse(text).unwrap();
    assert_eq!(doc.version, SchemaVersion::V2010_06);

    MigrationChain::new().migrate(&mut doc).unwrap();
    let root = &doc.root;
    assert_eq!(root.prefix, None);
    assert_eq!(root.attribute("xmlns:ome"), None);
    assert!(all_elements(root).iter().all(|e| e.prefix.is_none()));

    let image = root.child("Image").unwrap();
    assert!(image.child("AcquisitionDate").is_some());
    let pixels = image.child("Pixels").unwrap();
    assert_eq!(pixels.attribute("PhysicalSizeX"), None);
    assert_eq!(pixels.attribute("PhysicalSizeXUnit"), None);
    assert_eq!(pixels.attribute("SignificantBits"), Some("32"));
}

#[test]
fn test_namespace_normalization_failure_leaves_document() {
    let mut doc = MetadataDocument {
        version: SchemaVersion::V2012_06,
        root: XmlElement::new("OME").with_child(XmlElement::new("Image")),
    };
    let before = doc.clone();

    let err = MigrationChain::new().migrate(&mut doc).unwrap_err();
    assert!(matches!(
        err,
        MigrationError::Namespace {
            version: SchemaVersion::V2012_06,
            ..
        }
    ));
    assert_eq!(doc, before);
}

#[test]
fn test_namespace_mismatch_is_rejected() {
    let root = XmlElement::new("OME")
        .with_attribute("xmlns", SchemaVersion::V2009_09.namespace());
    let err = normalize_namespace(root, SchemaVersion::V2012_06).unwrap_err();
    assert!(matches!(err, MigrationError::Namespace { .. }));
}

#[test]
fn test_failing_step_leaves_document() {
    let text = r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2008-09">
      <Image ID="Image:0"><LogicalChannel ID="LogicalChannel:0"/></Image>
    </OME>"#;
    let mut doc = MetadataDocument::parse(text).unwrap();
    let before = doc.clone();

    let err = MigrationChain::new().migrate(&mut doc).unwrap_err();
    match err {
        MigrationError::Step { from, to, reason } => {
            assert_eq!(from, SchemaVersion::V2008_09);
            assert_eq!(to, SchemaVersion::V2009_09);
            assert!(reason.contains("no Pixels"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(doc, before);
}

#[test]
fn test_upgrade_text_reports_failure_as_none() {
    let chain = MigrationChain::new();
    assert!(chain.upgrade_text("<OME").is_none());
    assert!(chain
        .upgrade_text(r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/1999-01"/>"#)
        .is_none());
    assert!(chain.upgrade_text(CURRENT).is_some());
}

#[test]
fn test_cache_compiles_each_step_once() {
    let chain = MigrationChain::new();
    assert!(chain.cache().is_empty());

    let mut first = MetadataDocument::parse(LEGACY_2003).unwrap();
    let report = chain.migrate(&mut first).unwrap();
    assert_eq!(chain.cache().len(), report.steps.len());

    let again = chain.cache().get_or_compile(SchemaVersion::V2003Fc).unwrap();
    let cached = chain.cache().get_or_compile(SchemaVersion::V2003Fc).unwrap();
    assert!(Arc::ptr_eq(&again, &cached));
    assert_eq!(chain.cache().len(), report.steps.len());
}

#[test]
fn test_shared_cache_between_chains() {
    let cache = Arc::new(TransformCache::new());
    let a = MigrationChain::with_cache(cache.clone());
    let b = MigrationChain::with_cache(cache.clone());

    a.upgrade_str(LEGACY_2003).unwrap();
    let compiled = cache.len();
    b.upgrade_str(LEGACY_2003).unwrap();
    assert_eq!(cache.len(), compiled);
}

#[test]
fn test_missing_step_for_latest() {
    let err = TransformCache::new()
        .get_or_compile(SchemaVersion::LATEST)
        .unwrap_err();
    assert!(matches!(err, MigrationError::MissingStep(SchemaVersion::V2016_06)));
}

#[test]
fn test_color_and_annotation_steps() {
    let text = r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2010-04">
      <Image ID="Image:0">
        <Pixels ID="Pixels:0" DimensionOrder="XYZCT" Type="uint8" SizeX="1" SizeY="1" SizeZ="1" SizeC="2" SizeT="1">
          <Channel ID="Channel:0:0" Color="4294967295" EmissionWavelength="520"/>
          <Channel ID="Channel:0:1" Color="-16776961"/>
        </Pixels>
      </Image>
      <StructuredAnnotations>
        <XMLAnnotation ID="Annotation:0"><Note>raw</Note></XMLAnnotation>
      </StructuredAnnotations>
    </OME>"#;
    let upgraded = MigrationChain::new().upgrade_str(text).unwrap();
    let doc = MetadataDocument::parse(&upgraded).unwrap();

    let pixels = doc.root.child("Image").unwrap().child("Pixels").unwrap();
    let channels: Vec<_> = pixels.children_named("Channel").collect();
    assert_eq!(channels[0].attribute("Color"), Some("-1"));
    assert_eq!(channels[0].attribute("EmissionWavelengthUnit"), Some("nm"));
    assert_eq!(channels[1].attribute("Color"), Some("-16776961"));

    let annotation = doc
        .root
        .child("StructuredAnnotations")
        .unwrap()
        .child("XMLAnnotation")
        .unwrap();
    let value = annotation.child("Value").unwrap();
    assert_eq!(value.child("Note").unwrap().text.as_deref(), Some("raw"));
}

#[test]
fn test_compile_rejects_bad_definitions() {
    static BAD_SELECTOR: StepDefinition = StepDefinition {
        from: SchemaVersion::V2012_06,
        to: SchemaVersion::V2013_06,
        rules: &[RuleSpec::RemoveElement { select: "Image//Pixels" }],
    };
    assert!(matches!(
        compile_step(&BAD_SELECTOR),
        Err(MigrationError::Compile { .. })
    ));

    static BACKWARDS: StepDefinition = StepDefinition {
        from: SchemaVersion::V2013_06,
        to: SchemaVersion::V2012_06,
        rules: &[],
    };
    assert!(matches!(compile_step(&BACKWARDS), Err(MigrationError::Compile { .. })));
}

#[test]
fn test_selector_parsing() {
    assert!(Selector::parse("Pixels").is_ok());
    assert!(Selector::parse("Image/Pixels").is_ok());
    assert!(Selector::parse("").is_err());
    assert!(Selector::parse("A/B/C").is_err());
    assert!(Selector::parse("Image@ID").is_err());
}

#[test]
fn test_every_release_reaches_latest() {
    let chain = MigrationChain::new();
    for version in SchemaVersion::ALL {
        let plan = chain.plan(version).unwrap();
        if version.is_latest() {
            assert!(plan.is_empty());
        } else {
            assert_eq!(plan.last().unwrap().to, SchemaVersion::LATEST);
            assert!(plan.windows(2).all(|w| w[0].to == w[1].from));
        }
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_upgrade_all_in_parallel() {
    let inputs = vec![LEGACY_2003.to_string(), "<broken".to_string(), CURRENT.to_string()];
    let results = MigrationChain::new().upgrade_all(&inputs);
    assert!(results[0].is_some());
    assert!(results[1].is_none());
    assert!(results[2].is_some());
}
