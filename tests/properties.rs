//! Property tests for the dimension model and the comparator

use omebridge::dimension::{
    canonicalize_dimension_order, AxisType, CanonicalImageMetadata, PixelType,
};
use omebridge::document::MetadataDocument;
use omebridge::formats::SyntheticDescriptor;
use omebridge::prelude::{EqualityComparator, TranslationEngine};
use proptest::prelude::*;

fn is_permutation(order: &str) -> bool {
    order.len() == 5 && "XYZCT".chars().all(|c| order.matches(c).count() == 1)
}

#[test]
fn test_canonical_order_examples() {
    assert_eq!(canonicalize_dimension_order(""), "XYCZT");
    let order = canonicalize_dimension_order("zzyx");
    assert!(is_permutation(&order));
    assert!(order.starts_with("ZYX"));
}

proptest! {
    /// Any input canonicalizes to a permutation of XYZCT
    #[test]
    fn test_canonical_order_is_permutation(raw in "[xyzctXYZCT0-9 _-]{0,12}") {
        let order = canonicalize_dimension_order(&raw);
        prop_assert!(is_permutation(&order), "{} -> {}", raw, order);
        prop_assert_eq!(canonicalize_dimension_order(&order), order);
    }

    /// Effective channels times samples always gives the channel length
    #[test]
    fn test_channel_invariant(
        samples in 1u32..=4,
        effective in 1u32..=16,
        z in 1u32..=8,
        t in 1u32..=8,
    ) {
        let total = samples * effective;
        let series = CanonicalImageMetadata::from_sizes(
            "XYCZT",
            [8, 8, z, total, t],
            PixelType::Uint8,
            samples,
        ).unwrap();
        prop_assert_eq!(series.effective_channel_count() * samples, series.size(AxisType::Channel));
        prop_assert_eq!(series.plane_count(), u64::from(effective * z * t));
    }

    /// Channel lengths that samples do not divide are rejected
    #[test]
    fn test_channel_mismatch_rejected(samples in 2u32..=4, total in 1u32..=64) {
        prop_assume!(total % samples != 0);
        let result = CanonicalImageMetadata::from_sizes(
            "XYCZT",
            [8, 8, 1, total, 1],
            PixelType::Uint8,
            samples,
        );
        prop_assert!(result.is_err());
    }

    /// Every translated document equals itself and its re-parse
    #[test]
    fn test_translated_documents_compare_equal(
        size_x in 1u32..=64,
        size_z in 1u32..=4,
        rgb in 1u32..=4,
        series in 1u32..=3,
    ) {
        let descriptor = SyntheticDescriptor {
            size_x,
            size_z,
            size_c: rgb,
            rgb,
            series,
            ..Default::default()
        };
        let (document, _) = TranslationEngine::standard()
            .translate_into::<MetadataDocument>(&descriptor)
            .unwrap();
        let reparsed = MetadataDocument::parse(&document.to_xml_string().unwrap()).unwrap();
        let comparator = EqualityComparator::new();
        prop_assert!(comparator.equals(&document.root, &reparsed.root));
    }
}
