//! 제품 스캐너 에러 타입
//!
//! [`ProductScannerError`]는 스캐너 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ProductScannerError> for GreenscanError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **정규화**: `NotFound`
//! - **조회**: `SourceUnavailable` (미러 단위, 오케스트레이터 밖으로 나가지 않음), `NotFoundAnywhere`
//! - **히스토리 저장소**: `StorageWrite`, `StorageCorrupt`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`
//!
//! 유효하지 않은 코드는 에러가 아니라 [`ClassifiedCode::is_valid`](crate::types::ClassifiedCode)
//! 플래그이며, 제품이 없는 평가는 `Unknown` 등급의 센티널 결과입니다.

use greenscan_core::error::{ConfigError, GreenscanError, ScanError, StorageError};

/// 제품 스캐너 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ProductScannerError {
    /// 제공자 레코드 없음
    #[error("product not found: {barcode}")]
    NotFound {
        /// 조회한 바코드
        barcode: String,
    },

    /// 단일 미러 실패 (네트워크, HTTP 상태, 응답 본문)
    #[error("source unavailable: {source_name}: {reason}")]
    SourceUnavailable {
        /// 미러 이름
        source_name: String,
        /// 실패 사유
        reason: String,
    },

    /// 모든 미러에서 제품을 찾지 못함
    #[error("product {barcode} not found in database ({mirrors_tried} mirrors tried)")]
    NotFoundAnywhere {
        /// 조회한 바코드
        barcode: String,
        /// 시도한 미러 수
        mirrors_tried: usize,
    },

    /// 저장소 쓰기 실패
    #[error("storage write error: {key}: {reason}")]
    StorageWrite {
        /// 저장소 키
        key: String,
        /// 실패 사유
        reason: String,
    },

    /// 저장소 파일 손상
    #[error("storage corrupt: {path}: {reason}")]
    StorageCorrupt {
        /// 저장소 파일 경로
        path: String,
        /// 손상 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

impl ProductScannerError {
    /// 제품을 찾지 못한 에러인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotFoundAnywhere { .. })
    }
}

impl From<ProductScannerError> for GreenscanError {
    fn from(err: ProductScannerError) -> Self {
        match err {
            ProductScannerError::NotFound { barcode } => {
                GreenscanError::Scan(ScanError::NotFound(barcode))
            }
            ProductScannerError::NotFoundAnywhere {
                barcode,
                mirrors_tried,
            } => GreenscanError::Scan(ScanError::NotFound(format!(
                "{barcode} ({mirrors_tried} mirrors tried)"
            ))),
            ProductScannerError::SourceUnavailable {
                source_name,
                reason,
            } => GreenscanError::Scan(ScanError::Lookup(format!("{source_name}: {reason}"))),
            ProductScannerError::StorageWrite { key, reason } => {
                GreenscanError::Storage(StorageError::Write(format!("{key}: {reason}")))
            }
            ProductScannerError::StorageCorrupt { path, reason } => {
                GreenscanError::Storage(StorageError::Corrupt(format!("{path}: {reason}")))
            }
            ProductScannerError::Config { field, reason } => {
                GreenscanError::Config(ConfigError::InvalidValue { field, reason })
            }
            ProductScannerError::Io { path, source } => GreenscanError::Io(std::io::Error::new(
                source.kind(),
                format!("{path}: {source}"),
            )),
        }
    }
}
