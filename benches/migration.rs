use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use omebridge::compare::EqualityComparator;
use omebridge::document::MetadataDocument;
use omebridge::formats::SyntheticDescriptor;
use omebridge::migration::MigrationChain;
use omebridge::schema::{detect_version_str, SchemaVersion};
use omebridge::translate::TranslationEngine;

/// Generate a 2008-09 document with `images` images of `channels` channels each
fn generate_legacy_document(images: usize, channels: usize) -> String {
    let mut content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OME xmlns="{}">"#,
        SchemaVersion::V2008_09.namespace()
    );

    for i in 0..images {
        content.push_str(&format!(
            r#"
  <Image ID="Image:{i}" Name="image {i}">
    <AcquiredDate>2008-10-01T12:00:00</AcquiredDate>
    <Dimensions PixelSizeX="0.2" PixelSizeY="0.2" PixelSizeZ="1.0"/>"#
        ));
        for c in 0..channels {
            content.push_str(&format!(
                r#"
    <LogicalChannel ID="LogicalChannel:{i}:{c}" Name="channel {c}" SamplesPerPixel="1" ExWave="488" EmWave="520"/>"#
            ));
        }
        content.push_str(&format!(
            r#"
    <Pixels ID="Pixels:{i}" DimensionOrder="XYZCT" PixelType="uint16" BigEndian="false"
            SizeX="512" SizeY="512" SizeZ="10" SizeC="{channels}" SizeT="5"/>
  </Image>"#
        ));
    }

    content.push_str("\n</OME>\n");
    content
}

fn bench_detect(c: &mut Criterion) {
    let text = generate_legacy_document(10, 3);
    c.bench_function("detect_version", |b| {
        b.iter(|| detect_version_str(black_box(&text)).unwrap())
    });
}

fn bench_migrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("migrate");

    for images in [1usize, 10, 100] {
        let text = generate_legacy_document(images, 3);
        let document = MetadataDocument::parse(&text).unwrap();
        group.throughput(Throughput::Elements(images as u64));

        // Transforms compiled once and reused
        let warm = MigrationChain::new();
        group.bench_with_input(BenchmarkId::new("warm_cache", images), &document, |b, doc| {
            b.iter(|| {
                let mut doc = doc.clone();
                warm.migrate(&mut doc).unwrap()
            })
        });

        // Every iteration compiles the transforms again
        group.bench_with_input(BenchmarkId::new("cold_cache", images), &document, |b, doc| {
            b.iter(|| {
                let mut doc = doc.clone();
                MigrationChain::new().migrate(&mut doc).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let chain = MigrationChain::new();
    let upgraded = chain.upgrade_str(&generate_legacy_document(50, 4)).unwrap();
    let left = MetadataDocument::parse(&upgraded).unwrap();
    let right = left.clone();
    let comparator = EqualityComparator::new();

    c.bench_function("compare_50_images", |b| {
        b.iter(|| comparator.compare(black_box(&left.root), black_box(&right.root)))
    });
}

fn bench_translate(c: &mut Criterion) {
    let descriptor =
        SyntheticDescriptor::parse("bench&sizeX=1024&sizeY=1024&sizeC=4&series=20.fake").unwrap();
    let engine = TranslationEngine::standard();

    c.bench_function("synthetic_to_document", |b| {
        b.iter(|| {
            engine
                .translate_into::<MetadataDocument>(black_box(&descriptor))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_detect, bench_migrate, bench_compare, bench_translate);
criterion_main!(benches);
