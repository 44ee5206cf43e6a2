#![no_main]

use libfuzzer_sys::fuzz_target;
use omebridge::compare::EqualityComparator;
use omebridge::document::MetadataDocument;
use omebridge::migration::MigrationChain;
use omebridge::ome::OmeRoot;
use omebridge::translate::TranslationEngine;

fuzz_target!(|data: &[u8]| {
    // Only UTF-8 text can be a document
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing, detection and migration may fail but must never panic
    let Ok(mut document) = MetadataDocument::parse(text) else {
        return;
    };
    let original = document.clone();
    if MigrationChain::new().migrate(&mut document).is_err() {
        // A failed migration leaves the document untouched
        assert_eq!(document, original);
        return;
    }

    // The upgraded tree always equals itself
    assert!(EqualityComparator::new().equals(&document.root, &document.root));

    let _ = TranslationEngine::standard().translate_into::<OmeRoot>(&document);
});
