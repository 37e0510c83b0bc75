//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! 레코더(exporter) 설치는 임베딩하는 애플리케이션의 몫입니다.
//! 레코더가 없으면 매크로 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `greenscan_`
//! - 영역명: `scan_`, `lookup_`, `assessment_`, `history_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency), 없음 (gauge)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(greenscan_core::metrics::SCANS_TOTAL, "content_type" => "text").increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 콘텐츠 유형 레이블 키 (url, email, phone, text, vcard, wifi)
pub const LABEL_CONTENT_TYPE: &str = "content_type";

/// 미러 이름 레이블 키 (world, uk, us, ...)
pub const LABEL_MIRROR: &str = "mirror";

/// 결과 레이블 키 (found, not_found)
pub const LABEL_RESULT: &str = "result";

/// 등급 레이블 키 (poor, average, good, excellent, unknown)
pub const LABEL_RATING: &str = "rating";

// ─── 스캔 메트릭 ───────────────────────────────────────────────────

/// 처리된 스캔 이벤트 수 (counter, label: content_type)
pub const SCANS_TOTAL: &str = "greenscan_scans_total";

/// 유효하지 않은 코드 수 (counter)
pub const SCANS_INVALID_TOTAL: &str = "greenscan_scans_invalid_total";

// ─── 조회 메트릭 ───────────────────────────────────────────────────

/// 제품 조회 수 (counter, label: result)
pub const LOOKUPS_TOTAL: &str = "greenscan_lookups_total";

/// 미러 단위 실패 수 (counter, label: mirror)
pub const LOOKUP_SOURCE_FAILURES_TOTAL: &str = "greenscan_lookup_source_failures_total";

/// 조회 한 건의 전체 소요 시간 (histogram, 초)
pub const LOOKUP_DURATION_SECONDS: &str = "greenscan_lookup_duration_seconds";

// ─── 평가 메트릭 ───────────────────────────────────────────────────

/// 지속가능성 평가 수 (counter, label: rating)
pub const ASSESSMENTS_TOTAL: &str = "greenscan_assessments_total";

// ─── 히스토리 메트릭 ───────────────────────────────────────────────

/// 현재 히스토리 항목 수 (gauge)
pub const HISTORY_ENTRIES: &str = "greenscan_history_entries";

/// 용량 초과로 제거된 항목 수 (counter)
pub const HISTORY_EVICTIONS_TOTAL: &str = "greenscan_history_evictions_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번 호출합니다. 레코더가 없으면 아무 동작도 하지 않습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    // Scan
    describe_counter!(
        SCANS_TOTAL,
        "Total number of scan events processed, by content type"
    );
    describe_counter!(
        SCANS_INVALID_TOTAL,
        "Total number of scanned codes that are not valid product barcodes"
    );

    // Lookup
    describe_counter!(
        LOOKUPS_TOTAL,
        "Total number of product lookups, by result (found, not_found)"
    );
    describe_counter!(
        LOOKUP_SOURCE_FAILURES_TOTAL,
        "Total number of failed requests to a single mirror"
    );
    describe_histogram!(
        LOOKUP_DURATION_SECONDS,
        "Time to complete a product lookup across mirrors in seconds"
    );

    // Assessment
    describe_counter!(
        ASSESSMENTS_TOTAL,
        "Total number of sustainability assessments, by rating"
    );

    // History
    describe_gauge!(HISTORY_ENTRIES, "Number of entries in the scan history");
    describe_counter!(
        HISTORY_EVICTIONS_TOTAL,
        "Total number of history entries evicted due to capacity"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METRIC_NAMES: &[&str] = &[
        SCANS_TOTAL,
        SCANS_INVALID_TOTAL,
        LOOKUPS_TOTAL,
        LOOKUP_SOURCE_FAILURES_TOTAL,
        LOOKUP_DURATION_SECONDS,
        ASSESSMENTS_TOTAL,
        HISTORY_ENTRIES,
        HISTORY_EVICTIONS_TOTAL,
    ];

    #[test]
    fn all_metrics_start_with_greenscan_prefix() {
        for name in ALL_METRIC_NAMES {
            assert!(
                name.starts_with("greenscan_"),
                "Metric '{}' does not start with 'greenscan_' prefix",
                name
            );
        }
    }

    #[test]
    fn metric_names_are_unique() {
        let mut names = ALL_METRIC_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_METRIC_NAMES.len());
    }

    #[test]
    fn describe_all_does_not_panic() {
        // 레코더가 없어도 패닉하지 않아야 함
        describe_all();
    }

    #[test]
    fn label_keys_are_lowercase() {
        let labels = [LABEL_CONTENT_TYPE, LABEL_MIRROR, LABEL_RESULT, LABEL_RATING];
        for label in &labels {
            assert_eq!(
                label.to_lowercase(),
                *label,
                "Label key '{}' should be lowercase",
                label
            );
        }
    }
}
