#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use greenscan_scanner::{ProviderProduct, Rating, assess, normalize};

/// 퍼저용 구조적 입력 (점수에 영향을 주는 텍스트 필드만)
#[derive(Arbitrary, Debug)]
struct FuzzProduct {
    product_name: Option<String>,
    categories: Option<String>,
    packaging: Option<String>,
    origin: Option<String>,
    nutriscore_grade: Option<String>,
}

fuzz_target!(|input: FuzzProduct| {
    let record = ProviderProduct {
        product_name: input.product_name,
        categories: input.categories,
        packaging: input.packaging,
        origin: input.origin,
        nutriscore_grade: input.nutriscore_grade,
        ..ProviderProduct::default()
    };

    let Ok(product) = normalize(Some(&record), "12345678") else {
        return;
    };
    let assessment = assess(Some(&product));

    assert!((0.0..=10.0).contains(&assessment.score));
    assert_eq!((assessment.score * 10.0).round() / 10.0, assessment.score);
    assert_ne!(assessment.rating, Rating::Unknown);
});
