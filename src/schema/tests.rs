use super::*;
use crate::xml::parse_document;

#[test]
fn test_version_ordering() {
    assert!(SchemaVersion::V2003Fc < SchemaVersion::V2007_06);
    assert!(SchemaVersion::V2012_06 < SchemaVersion::V2013_06);
    assert_eq!(SchemaVersion::LATEST, *SchemaVersion::ALL.last().unwrap());

    let mut sorted = SchemaVersion::ALL.to_vec();
    sorted.sort();
    assert_eq!(sorted, SchemaVersion::ALL.to_vec());
}

#[test]
fn test_namespace_round_trip() {
    for version in SchemaVersion::ALL {
        assert_eq!(SchemaVersion::from_namespace(&version.namespace()), Ok(version));
    }
}

#[test]
fn test_legacy_marker_maps_to_earliest() {
    let v = SchemaVersion::from_namespace("http://example.org/some/other/ome.xsd").unwrap();
    assert_eq!(v, SchemaVersion::V2003Fc);
}

#[test]
fn test_detect_default_namespace() {
    let root = parse_document(
        r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2010-06"/>"#,
    )
    .unwrap();
    assert_eq!(detect_version(&root).unwrap(), SchemaVersion::V2010_06);
}

#[test]
fn test_detect_priority_order() {
    // xmlns wins over the prefixed aliases
    let root = parse_document(
        r#"<ome:OME xmlns:ome="http://www.openmicroscopy.org/Schemas/OME/2008-09"
                   xmlns="http://www.openmicroscopy.org/Schemas/OME/2012-06"/>"#,
    )
    .unwrap();
    assert_eq!(detect_version(&root).unwrap(), SchemaVersion::V2012_06);

    // xmlns:ome wins over xmlns:OME
    let root = parse_document(
        r#"<OME:OME xmlns:OME="http://www.openmicroscopy.org/Schemas/OME/2008-09"
                   xmlns:ome="http://www.openmicroscopy.org/Schemas/OME/2009-09"/>"#,
    )
    .unwrap();
    assert_eq!(detect_version(&root).unwrap(), SchemaVersion::V2009_09);
}

#[test]
fn test_detect_skips_empty_namespace() {
    let root = parse_document(
        r#"<ome:OME xmlns="" xmlns:ome="http://www.openmicroscopy.org/Schemas/OME/2015-01"/>"#,
    )
    .unwrap();
    assert_eq!(detect_version(&root).unwrap(), SchemaVersion::V2015_01);

    let root = parse_document(r#"<OME xmlns="" xmlns:ome=""/>"#).unwrap();
    assert!(matches!(
        detect_version(&root),
        Err(VersionError::MissingNamespace(_))
    ));
}

#[test]
fn test_detect_unknown_version() {
    let err = detect_version_str(
        r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2099-01"/>"#,
    )
    .unwrap_err();
    match err {
        VersionError::UnknownVersion { token, .. } => assert_eq!(token, "2099-01"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_namespace_is_an_error() {
    let err = detect_version_str("<OME><Image/></OME>").unwrap_err();
    assert!(matches!(err, VersionError::MissingNamespace(_)));
}

#[test]
fn test_malformed_input_is_parse_error() {
    let err = detect_version_str("<OME xmlns=").unwrap_err();
    assert!(matches!(err, VersionError::Parse(_)));
}

#[test]
fn test_validate() {
    let doc = r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2016-06"/>"#;
    assert!(validate(doc, SchemaVersion::V2016_06));
    assert!(!validate(doc, SchemaVersion::V2015_01));
    assert!(!validate("<Image/>", SchemaVersion::V2016_06));
    assert!(!validate("<OME", SchemaVersion::V2016_06));
}
