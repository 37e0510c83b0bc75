//! 바코드 분류기
//!
//! 디코딩된 원문을 검증하고 바코드 유형과 콘텐츠 유형으로 분류합니다.
//! 입력은 신뢰할 수 없는 문자열이며, 분류는 절대 실패하지 않습니다.
//!
//! # 콘텐츠 유형 우선순위
//!
//! URL → 이메일 → 전화번호 → vCard → WiFi → 텍스트 순으로 검사하며
//! 처음 일치한 유형이 선택됩니다.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use crate::types::{ClassifiedCode, CodeType, ContentType};

/// 유효한 제품 바코드: ASCII 숫자 8-14자리
const VALID_CODE_PATTERN: &str = r"^[0-9]{8,14}$";

/// `local@domain.tld` 형태
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// 전화번호에 허용되는 문자: 선행 `+`, 숫자, 공백, `-`, `.`, 괄호
const PHONE_CHARSET_PATTERN: &str = r"^\+?[0-9 ().\-]+$";

/// 전화번호 숫자 개수 범위 (E.164 최대 15자리)
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

// 패턴은 상수이므로 컴파일 실패 시 해당 검사는 항상 불일치로 처리됩니다.
static VALID_CODE_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(VALID_CODE_PATTERN));
static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN));
static PHONE_CHARSET_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(PHONE_CHARSET_PATTERN));

fn matches(re: &LazyLock<Result<Regex, regex::Error>>, s: &str) -> bool {
    re.as_ref().is_ok_and(|re| re.is_match(s))
}

/// 원문을 분류합니다.
///
/// 앞뒤 공백을 제거한 뒤 유효성, 바코드 유형, 콘텐츠 유형을 판별합니다.
/// 빈 문자열이나 잘못된 입력은 `is_valid=false, Other, Text`가 됩니다.
pub fn classify(raw: &str) -> ClassifiedCode {
    let code = raw.trim();

    ClassifiedCode {
        code: code.to_owned(),
        is_valid: is_valid_code(code),
        code_type: code_type(code),
        content_type: content_type(code),
    }
}

/// 8-14자리 ASCII 숫자인지 검사합니다.
pub fn is_valid_code(code: &str) -> bool {
    matches(&VALID_CODE_RE, code)
}

/// 숫자 길이로 바코드 유형을 판별합니다.
///
/// 숫자가 아닌 문자가 섞여 있으면 길이와 관계없이 `Other`입니다.
pub fn code_type(code: &str) -> CodeType {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return CodeType::Other;
    }

    match code.len() {
        8 => CodeType::Ean8,
        12 => CodeType::UpcA,
        13 => CodeType::Ean13,
        14 => CodeType::Itf14,
        _ => CodeType::Other,
    }
}

/// 우선순위에 따라 콘텐츠 유형을 판별합니다.
pub fn content_type(code: &str) -> ContentType {
    if is_url(code) {
        ContentType::Url
    } else if is_email(code) {
        ContentType::Email
    } else if is_phone(code) {
        ContentType::Phone
    } else if is_vcard(code) {
        ContentType::Vcard
    } else if is_wifi(code) {
        ContentType::Wifi
    } else {
        ContentType::Text
    }
}

fn is_url(code: &str) -> bool {
    Url::parse(code).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn is_email(code: &str) -> bool {
    matches(&EMAIL_RE, code)
}

/// 느슨한 전화번호 검사
///
/// 허용 문자만으로 구성되고 숫자가 7-15개이며, 선행 `+`, 구분자, 괄호 중
/// 하나 이상이 있어야 합니다. 구분자 없는 숫자열(제품 바코드)은 전화번호가 아닙니다.
///
/// 숫자만 있는 검사는 `5551234567` 같은 10-12자리 숫자열을 전화번호로 보고
/// `+1-555-123-4567`은 거부합니다. 이 함수는 의도적으로 그 반대로 판정합니다.
fn is_phone(code: &str) -> bool {
    if !matches(&PHONE_CHARSET_RE, code) {
        return false;
    }

    let digits = code.bytes().filter(u8::is_ascii_digit).count();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        return false;
    }

    code.bytes().any(|b| !b.is_ascii_digit())
}

fn is_vcard(code: &str) -> bool {
    code.starts_with("BEGIN:VCARD") && code.contains("END:VCARD")
}

fn is_wifi(code: &str) -> bool {
    code.starts_with("WIFI:") && code.contains("S:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert!(VALID_CODE_RE.is_ok());
        assert!(EMAIL_RE.is_ok());
        assert!(PHONE_CHARSET_RE.is_ok());
    }

    #[test]
    fn ean13_product_code() {
        let c = classify("5449000000996");
        assert!(c.is_valid);
        assert_eq!(c.code_type, CodeType::Ean13);
        assert_eq!(c.content_type, ContentType::Text);
    }

    #[test]
    fn code_types_by_length() {
        assert_eq!(classify("96385074").code_type, CodeType::Ean8);
        assert_eq!(classify("036000291452").code_type, CodeType::UpcA);
        assert_eq!(classify("10012345678902").code_type, CodeType::Itf14);
        assert_eq!(classify("123456789").code_type, CodeType::Other);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let c = classify("  96385074\n");
        assert_eq!(c.code, "96385074");
        assert!(c.is_valid);
        assert_eq!(c.code_type, CodeType::Ean8);
    }

    #[test]
    fn empty_input_is_invalid_text() {
        let c = classify("   ");
        assert_eq!(c.code, "");
        assert!(!c.is_valid);
        assert_eq!(c.code_type, CodeType::Other);
        assert_eq!(c.content_type, ContentType::Text);
    }

    #[test]
    fn non_numeric_eight_chars_is_other() {
        let c = classify("ABCDEFGH");
        assert!(!c.is_valid);
        assert_eq!(c.code_type, CodeType::Other);
    }

    #[test]
    fn unicode_digits_are_not_valid() {
        // 아라비아-인도 숫자 8개
        let c = classify("٠١٢٣٤٥٦٧");
        assert!(!c.is_valid);
        assert_eq!(c.code_type, CodeType::Other);
    }

    #[test]
    fn url_content() {
        assert_eq!(classify("https://example.com").content_type, ContentType::Url);
        assert_eq!(
            classify("http://example.com/p?id=1").content_type,
            ContentType::Url
        );
    }

    #[test]
    fn non_http_scheme_is_not_url() {
        assert_eq!(classify("ftp://example.com").content_type, ContentType::Text);
        assert_eq!(
            classify("urn:isbn:0451450523").content_type,
            ContentType::Text
        );
    }

    #[test]
    fn email_content() {
        assert_eq!(classify("a@b.co").content_type, ContentType::Email);
        assert_eq!(classify("a@b").content_type, ContentType::Text);
        assert_eq!(classify("a b@c.de").content_type, ContentType::Text);
    }

    #[test]
    fn url_wins_over_email_shape() {
        // 이메일 패턴과도 일치하지만 URL 검사가 먼저입니다.
        let code = "http://user@example.com";
        assert!(is_email(code));
        assert_eq!(classify(code).content_type, ContentType::Url);
    }

    #[test]
    fn phone_content() {
        assert_eq!(classify("+1-555-123-4567").content_type, ContentType::Phone);
        assert_eq!(classify("(555) 123-4567").content_type, ContentType::Phone);
        assert_eq!(classify("+441234567890").content_type, ContentType::Phone);
        assert_eq!(classify("555.123.4567").content_type, ContentType::Phone);
    }

    #[test]
    fn url_wins_over_phone_shape() {
        // 전화번호 허용 문자에 ':'와 문자가 없으므로 URL과 전화번호는 겹치지 않음
        assert_eq!(classify("http://555-123-4567").content_type, ContentType::Url);
        assert_eq!(
            classify("tel:+1-555-123-4567").content_type,
            ContentType::Text
        );
    }

    #[test]
    fn bare_digits_are_not_phone() {
        assert_eq!(classify("5551234567").content_type, ContentType::Text);
    }

    #[test]
    fn too_few_or_many_digits_are_not_phone() {
        assert_eq!(classify("12-34").content_type, ContentType::Text);
        assert_eq!(
            classify("+1-234-567-890-123-456").content_type,
            ContentType::Text
        );
    }

    #[test]
    fn vcard_content() {
        let vcard = "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nEND:VCARD";
        assert_eq!(classify(vcard).content_type, ContentType::Vcard);
        assert_eq!(
            classify("BEGIN:VCARD\nFN:Jane").content_type,
            ContentType::Text
        );
    }

    #[test]
    fn wifi_content() {
        assert_eq!(
            classify("WIFI:T:WPA;S:home;P:secret;;").content_type,
            ContentType::Wifi
        );
        assert_eq!(classify("WIFI:T:WPA;;").content_type, ContentType::Text);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn digit_strings_map_to_code_type(code in "[0-9]{1,20}") {
                let c = classify(&code);
                let expected = match code.len() {
                    8 => CodeType::Ean8,
                    12 => CodeType::UpcA,
                    13 => CodeType::Ean13,
                    14 => CodeType::Itf14,
                    _ => CodeType::Other,
                };
                prop_assert_eq!(c.code_type, expected);
                prop_assert_eq!(c.is_valid, (8..=14).contains(&code.len()));
            }

            #[test]
            fn digit_strings_are_plain_text(code in "[0-9]{1,20}") {
                prop_assert_eq!(classify(&code).content_type, ContentType::Text);
            }

            #[test]
            fn non_digit_content_is_never_valid(code in "[0-9]{0,10}[a-zA-Z@:/ ][0-9a-z]{0,10}") {
                let c = classify(&code);
                if c.code.bytes().any(|b| !b.is_ascii_digit()) {
                    prop_assert!(!c.is_valid);
                    prop_assert_eq!(c.code_type, CodeType::Other);
                }
            }

            #[test]
            fn classify_never_panics(raw in "\\PC*") {
                let c = classify(&raw);
                prop_assert_eq!(c.code.as_str(), raw.trim());
            }
        }
    }
}
