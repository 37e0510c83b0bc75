//! 도메인 타입 -- 분류 결과, 정규화된 제품, 지속가능성 평가
//!
//! 모든 타입은 불변 값이며 serde로 직렬화되어 히스토리에 저장됩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use greenscan_core::event::ScanEvent;

// ─── 바코드 분류 ───────────────────────────────────────────────────

/// 숫자 길이로 판별한 바코드 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeType {
    /// 8자리
    #[serde(rename = "EAN-8")]
    Ean8,
    /// 12자리
    #[serde(rename = "UPC-A")]
    UpcA,
    /// 13자리
    #[serde(rename = "EAN-13")]
    Ean13,
    /// 14자리
    #[serde(rename = "ITF-14")]
    Itf14,
    /// 그 외 (비숫자 포함)
    #[serde(rename = "other")]
    Other,
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ean8 => write!(f, "EAN-8"),
            Self::UpcA => write!(f, "UPC-A"),
            Self::Ean13 => write!(f, "EAN-13"),
            Self::Itf14 => write!(f, "ITF-14"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// 디코딩된 문자열의 콘텐츠 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// http/https URL
    Url,
    /// 이메일 주소
    Email,
    /// 전화번호
    Phone,
    /// 일반 텍스트 (제품 바코드 포함)
    Text,
    /// vCard 연락처
    Vcard,
    /// WiFi 접속 정보
    Wifi,
}

impl ContentType {
    /// 메트릭 레이블 등에 쓰이는 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Text => "text",
            Self::Vcard => "vcard",
            Self::Wifi => "wifi",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 분류기 결과
///
/// `code`는 공백이 제거된 원문입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedCode {
    /// 정리된 코드 문자열
    pub code: String,
    /// 8-14자리 숫자인지 여부
    pub is_valid: bool,
    /// 바코드 유형
    pub code_type: CodeType,
    /// 콘텐츠 유형
    pub content_type: ContentType,
}

impl ClassifiedCode {
    /// 콘텐츠 유형에 대응하는 외부 동작을 반환합니다.
    ///
    /// url은 원문 URL, email은 `mailto:`, phone은 `tel:` 링크입니다.
    /// 나머지 유형은 동작이 없습니다.
    pub fn action(&self) -> Option<OutboundAction> {
        match self.content_type {
            ContentType::Url => Some(OutboundAction::OpenUrl(self.code.clone())),
            ContentType::Email => Some(OutboundAction::Mail(format!("mailto:{}", self.code))),
            ContentType::Phone => Some(OutboundAction::Call(format!("tel:{}", self.code))),
            ContentType::Text | ContentType::Vcard | ContentType::Wifi => None,
        }
    }
}

/// 표현 계층이 실행할 외부 동작
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum OutboundAction {
    /// URL 열기
    OpenUrl(String),
    /// `mailto:` 링크
    Mail(String),
    /// `tel:` 링크
    Call(String),
}

impl OutboundAction {
    /// 동작 대상 URI
    pub fn target(&self) -> &str {
        match self {
            Self::OpenUrl(t) | Self::Mail(t) | Self::Call(t) => t,
        }
    }
}

/// 스캔 이벤트와 그 분류 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedScan {
    /// 원본 스캔 이벤트
    pub event: ScanEvent,
    /// 분류 결과
    pub classification: ClassifiedCode,
}

// ─── 정규화된 제품 ─────────────────────────────────────────────────

/// 영양 등급 (Nutri-Score)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionGrade {
    A,
    B,
    C,
    D,
    E,
    #[default]
    Unknown,
}

impl NutritionGrade {
    /// 문자열에서 등급을 파싱합니다 (대소문자 구분 없음).
    ///
    /// 인식할 수 없는 값은 `Unknown`입니다.
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "a" => Self::A,
            "b" => Self::B,
            "c" => Self::C,
            "d" => Self::D,
            "e" => Self::E,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for NutritionGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// 정규화된 제품 정보
///
/// 제공자 레코드에서 누락된 필드도 모두 기본값으로 채워져 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// 조회에 사용한 바코드
    pub barcode: String,
    /// 제품명
    pub name: String,
    /// 브랜드
    pub brand: String,
    /// 대표 이미지 URL
    pub image: Option<String>,
    /// 원재료
    pub ingredients: String,
    /// 영양 등급
    pub nutrition_grade: NutritionGrade,
    /// 포장재
    pub packaging: String,
    /// 카테고리 (", " 구분)
    pub categories: String,
    /// 원산지
    pub origin_country: String,
    /// 데이터 출처
    pub data_source: String,
}

// ─── 지속가능성 평가 ───────────────────────────────────────────────

/// 제품 텍스트 필드에서 파생된 지속가능성 요인
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SustainabilityFactors {
    /// 유기농
    pub organic: bool,
    /// 공정무역
    pub fair_trade: bool,
    /// 지역 생산
    pub local_origin: bool,
    /// 재활용 가능한 포장재 (유리, 종이, 카톤)
    pub recyclable_packaging: bool,
    /// 일회용 플라스틱 포장재
    pub single_use_packaging: bool,
}

/// 지속가능성 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Poor,
    Average,
    Good,
    Excellent,
    /// 제품 정보 없음
    Unknown,
}

impl Rating {
    /// 메트릭 레이블용 소문자 이름
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Average => "average",
            Self::Good => "good",
            Self::Excellent => "excellent",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Poor => "Poor",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// 지속가능성 평가 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityAssessment {
    /// 0.0-10.0, 소수점 한 자리
    pub score: f64,
    /// 등급
    pub rating: Rating,
    /// 설명 문장
    pub analysis: String,
    /// 판별된 요인
    pub factors: SustainabilityFactors,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(code: &str, content_type: ContentType) -> ClassifiedCode {
        ClassifiedCode {
            code: code.to_owned(),
            is_valid: false,
            code_type: CodeType::Other,
            content_type,
        }
    }

    #[test]
    fn code_type_serializes_as_display_name() {
        let json = serde_json::to_string(&CodeType::Ean13).unwrap();
        assert_eq!(json, "\"EAN-13\"");
        let parsed: CodeType = serde_json::from_str("\"UPC-A\"").unwrap();
        assert_eq!(parsed, CodeType::UpcA);
        assert_eq!(CodeType::Itf14.to_string(), "ITF-14");
    }

    #[test]
    fn content_type_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ContentType::Vcard).unwrap(),
            "\"vcard\""
        );
        assert_eq!(ContentType::Wifi.to_string(), "wifi");
    }

    #[test]
    fn action_for_url_email_phone() {
        let url = classified("https://example.com", ContentType::Url);
        assert_eq!(
            url.action(),
            Some(OutboundAction::OpenUrl("https://example.com".to_owned()))
        );

        let email = classified("a@b.co", ContentType::Email);
        assert_eq!(email.action().unwrap().target(), "mailto:a@b.co");

        let phone = classified("+1-555-123-4567", ContentType::Phone);
        assert_eq!(phone.action().unwrap().target(), "tel:+1-555-123-4567");
    }

    #[test]
    fn no_action_for_text_vcard_wifi() {
        for ct in [ContentType::Text, ContentType::Vcard, ContentType::Wifi] {
            assert!(classified("x", ct).action().is_none());
        }
    }

    #[test]
    fn nutrition_grade_parse_loose() {
        assert_eq!(NutritionGrade::from_str_loose("A"), NutritionGrade::A);
        assert_eq!(NutritionGrade::from_str_loose(" e "), NutritionGrade::E);
        assert_eq!(
            NutritionGrade::from_str_loose("not-applicable"),
            NutritionGrade::Unknown
        );
        assert_eq!(NutritionGrade::from_str_loose(""), NutritionGrade::Unknown);
    }

    #[test]
    fn nutrition_grade_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&NutritionGrade::Unknown).unwrap(),
            "\"unknown\""
        );
        assert_eq!(
            serde_json::from_str::<NutritionGrade>("\"b\"").unwrap(),
            NutritionGrade::B
        );
    }

    #[test]
    fn rating_display_and_label() {
        assert_eq!(Rating::Excellent.to_string(), "Excellent");
        assert_eq!(Rating::Average.as_label(), "average");
    }
}
