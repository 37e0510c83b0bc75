//! 제품 데이터 정규화
//!
//! 제공자(Open Food Facts) 응답 레코드를 [`NormalizedProduct`]로 변환합니다.
//! 제공자 필드는 자주 누락되거나 빈 문자열이므로, 빈 문자열은 없는 값으로 취급하고
//! 모든 출력 필드를 기본값으로 채웁니다. 네트워크나 저장소 접근은 없습니다.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProductScannerError;
use crate::types::{NormalizedProduct, NutritionGrade};

/// 데이터 출처 표기
pub const DATA_SOURCE: &str = "Open Food Facts";

/// 브랜드 기본값
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

/// 포장재 기본값
pub const UNKNOWN_PACKAGING: &str = "Unknown";

/// 이미지 언어 우선순위
const PREFERRED_IMAGE_LANG: &str = "en";

/// `/api/v0/product/<barcode>.json` 응답 본문
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// 1이면 제품 있음, 0이면 없음
    #[serde(default)]
    pub status: i64,
    /// 상태 설명 (예: "product not found")
    #[serde(default, deserialize_with = "lenient")]
    pub status_verbose: Option<String>,
    /// 제품 레코드
    #[serde(default, deserialize_with = "lenient")]
    pub product: Option<ProviderProduct>,
}

impl ProviderResponse {
    /// 제품이 일치했는지 여부 (`status == 1`이고 레코드 존재)
    pub fn is_match(&self) -> bool {
        self.status == 1 && self.product.is_some()
    }
}

/// 제공자 제품 레코드
///
/// 알 수 없는 필드는 무시하며, 모든 필드는 선택 사항입니다.
/// 타입이 예상과 다른 필드(예: 문자열 대신 배열)는 없는 값으로 취급합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderProduct {
    #[serde(deserialize_with = "lenient")]
    pub product_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub generic_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub brands: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub selected_images: Option<SelectedImages>,
    #[serde(deserialize_with = "lenient")]
    pub image_front_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub categories: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub ingredients_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub ingredients: Option<Vec<ProviderIngredient>>,
    #[serde(deserialize_with = "lenient")]
    pub nutrition_grade_fr: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub nutriscore_grade: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub packaging: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub origin: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub countries: Option<String>,
}

/// 원재료 목록 항목
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderIngredient {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
}

/// 선택된 이미지 (`selected_images`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedImages {
    #[serde(deserialize_with = "lenient")]
    pub front: Option<ImageSet>,
}

/// 이미지 크기별 언어 → URL 맵
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSet {
    #[serde(deserialize_with = "lenient")]
    pub display: Option<BTreeMap<String, String>>,
}

/// 필드 값을 `T`로 해석할 수 없으면 `None`으로 둡니다.
///
/// 필드 하나의 타입 불일치가 응답 전체의 디코딩 실패로 번지지 않게 합니다.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// 제공자 레코드를 정규화합니다.
///
/// 레코드가 없으면 [`ProductScannerError::NotFound`]를 반환합니다.
pub fn normalize(
    record: Option<&ProviderProduct>,
    barcode: &str,
) -> Result<NormalizedProduct, ProductScannerError> {
    let record = record.ok_or_else(|| ProductScannerError::NotFound {
        barcode: barcode.to_owned(),
    })?;

    let name = first_present([&record.product_name, &record.generic_name])
        .map_or_else(|| format!("Product {barcode}"), str::to_owned);

    let nutrition_grade = first_present([&record.nutrition_grade_fr, &record.nutriscore_grade])
        .map(NutritionGrade::from_str_loose)
        .unwrap_or_default();

    Ok(NormalizedProduct {
        barcode: barcode.to_owned(),
        name,
        brand: present(&record.brands).unwrap_or(UNKNOWN_BRAND).to_owned(),
        image: front_image(record),
        ingredients: ingredients(record),
        nutrition_grade,
        packaging: present(&record.packaging)
            .unwrap_or(UNKNOWN_PACKAGING)
            .to_owned(),
        categories: present(&record.categories)
            .map(join_categories)
            .unwrap_or_default(),
        origin_country: first_present([&record.origin, &record.countries])
            .unwrap_or_default()
            .to_owned(),
        data_source: DATA_SOURCE.to_owned(),
    })
}

/// 쉼표로 구분된 카테고리를 정리합니다.
///
/// 각 항목의 공백을 제거하고 빈 항목은 버립니다. 순서와 중복은 유지합니다.
pub fn join_categories(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn first_present<'a, const N: usize>(fields: [&'a Option<String>; N]) -> Option<&'a str> {
    fields.into_iter().find_map(present)
}

/// 전면 표시 이미지(영어 우선) → 전면 이미지 → 대표 이미지 순
fn front_image(record: &ProviderProduct) -> Option<String> {
    let display = record
        .selected_images
        .as_ref()
        .and_then(|images| images.front.as_ref())
        .and_then(|front| front.display.as_ref())
        .and_then(|by_lang| {
            by_lang
                .get(PREFERRED_IMAGE_LANG)
                .filter(|url| !url.is_empty())
                .or_else(|| by_lang.values().find(|url| !url.is_empty()))
        })
        .map(String::as_str);

    display
        .or_else(|| first_present([&record.image_front_url, &record.image_url]))
        .map(str::to_owned)
}

/// 원재료 텍스트, 없으면 원재료 목록의 text(또는 id)를 ", "로 연결
fn ingredients(record: &ProviderProduct) -> String {
    if let Some(text) = present(&record.ingredients_text) {
        return text.to_owned();
    }

    record
        .ingredients
        .as_deref()
        .map(|list| {
            list.iter()
                .filter_map(|i| first_present([&i.text, &i.id]))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}
