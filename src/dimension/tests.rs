use super::*;

#[test]
fn test_canonicalize_empty() {
    assert_eq!(canonicalize_dimension_order(""), "XYCZT");
}

#[test]
fn test_canonicalize_duplicates_and_case() {
    let order = canonicalize_dimension_order("zzyx");
    assert_eq!(order, "ZYXCT");
    assert!(is_valid_dimension_order(&order));
}

#[test]
fn test_canonicalize_strips_foreign_characters() {
    assert_eq!(canonicalize_dimension_order("x-y_t?q"), "XYTCZ");
    assert_eq!(canonicalize_dimension_order("XYZCT"), "XYZCT");
    assert_eq!(canonicalize_dimension_order("tczyx"), "TCZYX");
}

#[test]
fn test_ome_dimension_order_forces_xy_first() {
    assert_eq!(ome_dimension_order("zzyx"), "XYZCT");
    assert_eq!(ome_dimension_order("TCZYX"), "XYTCZ");
    assert_eq!(ome_dimension_order(""), "XYCZT");
}

#[test]
fn test_is_valid_dimension_order() {
    assert!(is_valid_dimension_order("XYZCT"));
    assert!(!is_valid_dimension_order("XYZC"));
    assert!(!is_valid_dimension_order("XYZCC"));
    assert!(!is_valid_dimension_order("xyzct"));
}

#[test]
fn test_from_sizes() {
    let image =
        CanonicalImageMetadata::from_sizes("XYZCT", [512, 256, 3, 2, 4], PixelType::Uint16, 1)
            .unwrap();
    assert_eq!(image.dimension_order(), "XYZCT");
    assert_eq!(image.size(AxisType::X), 512);
    assert_eq!(image.size(AxisType::Y), 256);
    assert_eq!(image.size(AxisType::Z), 3);
    assert_eq!(image.size(AxisType::Channel), 2);
    assert_eq!(image.size(AxisType::Time), 4);
    assert_eq!(image.plane_count(), 24);
}

#[test]
fn test_zero_length_axis_rejected() {
    let err = CanonicalImageMetadata::from_sizes("XYZCT", [512, 0, 1, 1, 1], PixelType::Uint8, 1)
        .unwrap_err();
    assert!(matches!(
        err,
        DimensionError::InvalidAxisLength {
            axis: AxisType::Y,
            length: 0
        }
    ));
}

#[test]
fn test_rgb_channel_folding() {
    let image =
        CanonicalImageMetadata::from_sizes("XYCZT", [64, 64, 5, 6, 2], PixelType::Uint8, 3)
            .unwrap();
    assert!(image.is_rgb());
    assert_eq!(image.effective_channel_count(), 2);
    assert_eq!(image.effective_channel_count() * image.samples_per_pixel, 6);
    assert_eq!(image.plane_count(), 5 * 2 * 2);
}

#[test]
fn test_channel_mismatch_rejected() {
    let err = CanonicalImageMetadata::from_sizes("XYCZT", [64, 64, 1, 4, 1], PixelType::Uint8, 3)
        .unwrap_err();
    assert!(matches!(
        err,
        DimensionError::ChannelMismatch {
            total: 4,
            samples_per_pixel: 3
        }
    ));
}

#[test]
fn test_missing_calibration_defaults_to_one() {
    let mut image = CanonicalImageMetadata::default();
    assert_eq!(image.calibration(AxisType::X), 1.0);

    image.set_calibration(AxisType::X, Some(0.25), Some("µm"));
    assert_eq!(image.calibration(AxisType::X), 0.25);
    assert_eq!(image.axis(AxisType::X).unwrap().unit.as_deref(), Some("µm"));

    image.set_calibration(AxisType::X, None, Some("µm"));
    assert_eq!(image.calibration(AxisType::X), 1.0);
    assert_eq!(image.axis(AxisType::X).unwrap().unit, None);
}

#[test]
fn test_set_dimension_order_keeps_axes() {
    let mut image =
        CanonicalImageMetadata::from_sizes("XYZCT", [8, 9, 2, 3, 4], PixelType::Uint8, 1).unwrap();
    image.set_calibration(AxisType::Z, Some(7.0), None);
    image.set_dimension_order("xytzc");

    assert_eq!(image.dimension_order(), "XYTZC");
    assert_eq!(image.size(AxisType::Z), 2);
    assert_eq!(image.calibration(AxisType::Z), 7.0);
    image.validate().unwrap();
}

#[test]
fn test_pixel_type_parsing() {
    assert_eq!("uint16".parse::<PixelType>().unwrap(), PixelType::Uint16);
    assert_eq!("Uint16".parse::<PixelType>().unwrap(), PixelType::Uint16);
    assert_eq!(
        "double-complex".parse::<PixelType>().unwrap(),
        PixelType::DoubleComplex
    );
    assert!("rgb24".parse::<PixelType>().is_err());

    assert_eq!(PixelType::Bit.bytes_per_pixel(), 1);
    assert_eq!(PixelType::Uint16.bytes_per_pixel(), 2);
    assert_eq!(PixelType::Double.bits(), 64);
    assert!(PixelType::Float.is_signed());
    assert!(!PixelType::Uint32.is_signed());
}

#[test]
fn test_canonical_json_round_trip() {
    let mut dataset = CanonicalMetadata::new();
    dataset.source_name = Some("cells.fake".to_string());
    dataset.series.push(
        CanonicalImageMetadata::from_sizes("XYZCT", [32, 32, 1, 3, 1], PixelType::Uint8, 3)
            .unwrap(),
    );

    let json = dataset.to_json().unwrap();
    assert!(json.contains("\"pixel_type\": \"uint8\""));
    let restored = CanonicalMetadata::from_json(&json).unwrap();
    assert_eq!(restored, dataset);
}
