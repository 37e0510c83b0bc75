//! 지속가능성 점수 엔진
//!
//! 정규화된 제품의 텍스트 필드에서 요인을 판별하고 0-10 점수, 등급,
//! 설명 문장을 계산합니다. 순수 함수이며 결정적입니다.
//!
//! # 점수 계산
//!
//! ```text
//! 기본 5.0
//!   + 2.0 유기농        + 1.5 공정무역     + 1.5 지역 생산
//!   + 1.0 재활용 포장   - 1.0 일회용 포장
//!   + 0.5 영양 등급 a/b - 0.5 영양 등급 d/e
//! → [0, 10] 클램프 → 소수점 한 자리 반올림
//! ```

use crate::types::{
    NormalizedProduct, NutritionGrade, Rating, SustainabilityAssessment, SustainabilityFactors,
};

const BASE_SCORE: f64 = 5.0;
const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 10.0;

const ORGANIC_WEIGHT: f64 = 2.0;
const FAIR_TRADE_WEIGHT: f64 = 1.5;
const LOCAL_ORIGIN_WEIGHT: f64 = 1.5;
const RECYCLABLE_WEIGHT: f64 = 1.0;
const SINGLE_USE_PENALTY: f64 = 1.0;
const NUTRITION_ADJUSTMENT: f64 = 0.5;

const EXCELLENT_THRESHOLD: f64 = 8.0;
const GOOD_THRESHOLD: f64 = 6.0;
const POOR_THRESHOLD: f64 = 3.0;

/// 제품 정보가 없을 때의 설명
pub const NO_DATA_ANALYSIS: &str = "No product data available for analysis";

const ORGANIC_SENTENCE: &str = " The product uses organic ingredients, which reduces environmental impact from pesticides and fertilizers.";
const FAIR_TRADE_SENTENCE: &str =
    " Fair trade certification ensures ethical treatment and fair compensation for producers.";
const LOCAL_SENTENCE: &str =
    " Locally produced goods typically have a lower carbon footprint from transportation.";
const RECYCLABLE_SENTENCE: &str =
    " The packaging appears to be recyclable, which is better for waste management.";
const SINGLE_USE_SENTENCE: &str =
    " Single-use plastic packaging contributes to waste and pollution issues.";

/// 제품을 평가합니다.
///
/// 제품이 없으면 점수 0, 등급 `Unknown`의 센티널 결과를 반환합니다.
pub fn assess(product: Option<&NormalizedProduct>) -> SustainabilityAssessment {
    let Some(product) = product else {
        return no_data();
    };

    let factors = derive_factors(product);
    let score = compute_score(&factors, product.nutrition_grade);

    SustainabilityAssessment {
        score,
        rating: rating_for(score),
        analysis: analysis_text(score, &factors),
        factors,
    }
}

/// NoData 센티널 평가
pub fn no_data() -> SustainabilityAssessment {
    SustainabilityAssessment {
        score: MIN_SCORE,
        rating: Rating::Unknown,
        analysis: NO_DATA_ANALYSIS.to_owned(),
        factors: SustainabilityFactors::default(),
    }
}

/// 대소문자 구분 없는 부분 문자열 검사로 요인을 판별합니다.
pub fn derive_factors(product: &NormalizedProduct) -> SustainabilityFactors {
    let categories = product.categories.to_lowercase();
    let name = product.name.to_lowercase();
    let origin = product.origin_country.to_lowercase();
    let packaging = product.packaging.to_lowercase();

    SustainabilityFactors {
        organic: categories.contains("organic") || name.contains("organic"),
        fair_trade: categories.contains("fair-trade") || categories.contains("fairtrade"),
        local_origin: origin.contains("local"),
        recyclable_packaging: ["glass", "paper", "carton"]
            .iter()
            .any(|m| packaging.contains(m)),
        single_use_packaging: packaging.contains("plastic"),
    }
}

/// 요인과 영양 등급으로 점수를 계산합니다 (클램프, 소수점 한 자리).
pub fn compute_score(factors: &SustainabilityFactors, grade: NutritionGrade) -> f64 {
    let mut score = BASE_SCORE;

    if factors.organic {
        score += ORGANIC_WEIGHT;
    }
    if factors.fair_trade {
        score += FAIR_TRADE_WEIGHT;
    }
    if factors.local_origin {
        score += LOCAL_ORIGIN_WEIGHT;
    }
    if factors.recyclable_packaging {
        score += RECYCLABLE_WEIGHT;
    }
    if factors.single_use_packaging {
        score -= SINGLE_USE_PENALTY;
    }

    match grade {
        NutritionGrade::A | NutritionGrade::B => score += NUTRITION_ADJUSTMENT,
        NutritionGrade::D | NutritionGrade::E => score -= NUTRITION_ADJUSTMENT,
        NutritionGrade::C | NutritionGrade::Unknown => {}
    }

    round_one_decimal(score.clamp(MIN_SCORE, MAX_SCORE))
}

/// 점수에 대응하는 등급
///
/// 8 이상 Excellent, 6 이상 Good, 3 이하 Poor, 그 사이(3 초과 6 미만)는 Average입니다.
pub fn rating_for(score: f64) -> Rating {
    if score >= EXCELLENT_THRESHOLD {
        Rating::Excellent
    } else if score >= GOOD_THRESHOLD {
        Rating::Good
    } else if score <= POOR_THRESHOLD {
        Rating::Poor
    } else {
        Rating::Average
    }
}

/// 점수 문장 뒤에 참인 요인별 고정 문장을 정해진 순서로 붙입니다.
pub fn analysis_text(score: f64, factors: &SustainabilityFactors) -> String {
    let mut text = format!(
        "This product has a sustainability score of {score:.1}/10 based on available information."
    );

    let sentences = [
        (factors.organic, ORGANIC_SENTENCE),
        (factors.fair_trade, FAIR_TRADE_SENTENCE),
        (factors.local_origin, LOCAL_SENTENCE),
        (factors.recyclable_packaging, RECYCLABLE_SENTENCE),
        (factors.single_use_packaging, SINGLE_USE_SENTENCE),
    ];
    for (_, sentence) in sentences.iter().filter(|(present, _)| *present) {
        text.push_str(sentence);
    }

    text
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
