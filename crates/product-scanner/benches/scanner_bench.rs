//! 제품 스캐너 벤치마크
//!
//! 코드 분류, 제공자 레코드 정규화, 지속가능성 평가 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use greenscan_scanner::{ProviderProduct, assess, classify, normalize};

const SAMPLE_CODES: &[(&str, &str)] = &[
    ("ean13", "5449000000996"),
    ("url", "https://world.openfoodfacts.org/product/5449000000996"),
    ("email", "hello@example.org"),
    ("phone", "+1-555-123-4567"),
    ("vcard", "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nTEL:+15551234567\nEND:VCARD"),
    ("wifi", "WIFI:T:WPA;S:greenscan;P:correct-horse;;"),
];

const PRODUCT_JSON: &str = r#"{
    "product_name": "Organic Sparkling Apple Juice",
    "brands": "Orchard Co",
    "selected_images": {"front": {"display": {"en": "https://images.example/front_en.jpg"}}},
    "categories": "Beverages, Organic, Fair-Trade, Juices,, Apple juices",
    "ingredients": [
        {"id": "en:apple-juice", "text": "Apple juice"},
        {"id": "en:carbon-dioxide"}
    ],
    "nutriscore_grade": "b",
    "packaging": "Glass bottle, metal cap",
    "origin": "Local orchards",
    "countries": "United Kingdom"
}"#;

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for (label, code) in SAMPLE_CODES {
        group.bench_with_input(BenchmarkId::from_parameter(label), code, |b, code| {
            b.iter(|| classify(black_box(code)))
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let record: ProviderProduct = serde_json::from_str(PRODUCT_JSON).unwrap();
    c.bench_function("normalize_full_record", |b| {
        b.iter(|| normalize(black_box(Some(&record)), black_box("5000112637922")))
    });
}

fn bench_assess(c: &mut Criterion) {
    let record: ProviderProduct = serde_json::from_str(PRODUCT_JSON).unwrap();
    let product = normalize(Some(&record), "5000112637922").unwrap();
    c.bench_function("assess_product", |b| {
        b.iter(|| assess(black_box(Some(&product))))
    });
}

criterion_group!(benches, bench_classify, bench_normalize, bench_assess);
criterion_main!(benches);
