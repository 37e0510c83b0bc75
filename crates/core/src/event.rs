//! 스캔 이벤트 -- 외부 스캐너가 전달하는 디코딩 결과
//!
//! [`ScanEvent`]는 카메라/스캐닝 협력자가 생성하는 불변 값이며,
//! 분류기와 조회 오케스트레이터가 한 번 소비합니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 스캐너 리더 식별자 → 표시 이름 매핑
const FORMAT_LABELS: &[(&str, &str)] = &[
    ("qr_code_reader", "QR Code"),
    ("ean_reader", "EAN"),
    ("ean_8_reader", "EAN-8"),
    ("code_128_reader", "Code 128"),
    ("code_39_reader", "Code 39"),
    ("code_93_reader", "Code 93"),
    ("upc_reader", "UPC"),
    ("upc_e_reader", "UPC-E"),
    ("codabar_reader", "Codabar"),
];

/// 디코딩된 코드 이벤트
///
/// `code`는 신뢰할 수 없는 입력입니다. 검증은 분류기가 담당합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// 디코딩된 원문
    pub code: String,
    /// 스캐너가 보고한 포맷 식별자 (예: `ean_reader`)
    pub format: String,
    /// 스캔 시각
    pub timestamp: DateTime<Utc>,
}

impl ScanEvent {
    /// 현재 시각으로 새 이벤트를 생성합니다.
    pub fn new(code: impl Into<String>, format: impl Into<String>) -> Self {
        Self::with_timestamp(code, format, Utc::now())
    }

    /// 지정된 시각으로 새 이벤트를 생성합니다.
    pub fn with_timestamp(
        code: impl Into<String>,
        format: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            code: code.into(),
            format: format.into(),
            timestamp,
        }
    }

    /// 포맷 식별자를 사람이 읽을 수 있는 이름으로 변환합니다.
    pub fn format_label(&self) -> String {
        format_label(&self.format)
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScanEvent[{}] {} ({})",
            self.timestamp.to_rfc3339(),
            self.code,
            self.format_label()
        )
    }
}

/// 스캐너 리더 식별자를 표시 이름으로 변환합니다.
///
/// 알려지지 않은 식별자는 `_`를 공백으로 바꾸고 `reader`를 제거합니다.
/// 빈 문자열은 `"Unknown"`입니다.
pub fn format_label(format: &str) -> String {
    if format.is_empty() {
        return "Unknown".to_owned();
    }

    if let Some((_, label)) = FORMAT_LABELS.iter().find(|(id, _)| *id == format) {
        return (*label).to_owned();
    }

    format.replace('_', " ").replace("reader", "").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats_map_to_labels() {
        assert_eq!(format_label("qr_code_reader"), "QR Code");
        assert_eq!(format_label("ean_reader"), "EAN");
        assert_eq!(format_label("upc_e_reader"), "UPC-E");
        assert_eq!(format_label("codabar_reader"), "Codabar");
    }

    #[test]
    fn unknown_format_is_cleaned_up() {
        assert_eq!(format_label("i2of5_reader"), "i2of5");
        assert_eq!(format_label("data_matrix"), "data matrix");
    }

    #[test]
    fn empty_format_is_unknown() {
        assert_eq!(format_label(""), "Unknown");
    }

    #[test]
    fn event_display_contains_code_and_label() {
        let event = ScanEvent::new("5449000000996", "ean_reader");
        let display = event.to_string();
        assert!(display.contains("5449000000996"));
        assert!(display.contains("EAN"));
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = ScanEvent::new("https://example.com", "qr_code_reader");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: ScanEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
