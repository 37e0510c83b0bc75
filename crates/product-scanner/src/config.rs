//! 스캐너 설정
//!
//! [`ScannerConfig`]는 core의 [`GreenscanConfig`]에서 조회/히스토리 관련 값을
//! 모아 스캐너가 바로 쓸 수 있는 형태로 만듭니다.
//!
//! # 사용 예시
//!
//! ```
//! use greenscan_scanner::{ScannerConfig, ScannerConfigBuilder};
//!
//! // 기본값으로 생성
//! let config = ScannerConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! let config = ScannerConfigBuilder::new()
//!     .mirror("local", "http://127.0.0.1:8080")
//!     .history_capacity(100)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.mirrors.len(), 1);
//! ```

use std::path::PathBuf;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use greenscan_core::config::{GreenscanConfig, LookupConfig, MirrorConfig};

use crate::error::ProductScannerError;

/// 설정 상한값 상수
const MAX_HISTORY_CAPACITY: usize = 10_000;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// 제품 스캐너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// 조회 순서대로 나열된 미러
    pub mirrors: Vec<MirrorConfig>,
    /// HTTP User-Agent
    pub user_agent: String,
    /// 요청 타임아웃 (초). 0이면 전송 계층 기본값
    pub request_timeout_secs: u64,
    /// 히스토리 기록 여부
    pub history_enabled: bool,
    /// 히스토리 최대 보관 개수
    pub history_capacity: usize,
    /// 히스토리 저장 파일
    pub history_path: PathBuf,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from_core(&GreenscanConfig::default())
    }
}

impl ScannerConfig {
    /// core 설정에서 스캐너 설정을 생성합니다.
    pub fn from_core(core: &GreenscanConfig) -> Self {
        let LookupConfig {
            mirrors,
            user_agent,
            request_timeout_secs,
        } = core.lookup.clone();

        Self {
            mirrors,
            user_agent,
            request_timeout_secs,
            history_enabled: core.history.enabled,
            history_capacity: core.history.capacity,
            history_path: core.history_path(),
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `mirrors`: 하나 이상, 각 `base_url`은 파싱 가능한 http(s) URL
    /// - `request_timeout_secs`: 0-300
    /// - `history_capacity`: 1-10000
    pub fn validate(&self) -> Result<(), ProductScannerError> {
        if self.mirrors.is_empty() {
            return Err(ProductScannerError::Config {
                field: "mirrors".to_owned(),
                reason: "at least one mirror is required".to_owned(),
            });
        }

        for mirror in &self.mirrors {
            let url = Url::parse(&mirror.base_url).map_err(|e| ProductScannerError::Config {
                field: "mirrors.base_url".to_owned(),
                reason: format!("mirror '{}': invalid url: {e}", mirror.name),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ProductScannerError::Config {
                    field: "mirrors.base_url".to_owned(),
                    reason: format!("mirror '{}': scheme must be http or https", mirror.name),
                });
            }
        }

        if self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ProductScannerError::Config {
                field: "request_timeout_secs".to_owned(),
                reason: format!("must be 0 (transport default) or 1-{MAX_REQUEST_TIMEOUT_SECS}"),
            });
        }

        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(ProductScannerError::Config {
                field: "history_capacity".to_owned(),
                reason: format!("must be 1-{MAX_HISTORY_CAPACITY}"),
            });
        }

        Ok(())
    }
}

/// [`ScannerConfig`] 빌더
///
/// 빌드 시 유효성을 검증합니다.
#[derive(Default)]
pub struct ScannerConfigBuilder {
    config: ScannerConfig,
    custom_mirrors: bool,
}

impl ScannerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 미러를 추가합니다.
    ///
    /// 처음 호출하면 기본 미러 목록을 대체합니다.
    pub fn mirror(mut self, name: impl Into<String>, base_url: impl Into<String>) -> Self {
        if !self.custom_mirrors {
            self.config.mirrors.clear();
            self.custom_mirrors = true;
        }
        self.config.mirrors.push(MirrorConfig::new(name, base_url));
        self
    }

    /// 미러 목록 전체를 설정합니다.
    pub fn mirrors(mut self, mirrors: Vec<MirrorConfig>) -> Self {
        self.config.mirrors = mirrors;
        self.custom_mirrors = true;
        self
    }

    /// User-Agent를 설정합니다.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// 요청 타임아웃을 설정합니다.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// 히스토리 기록 여부를 설정합니다.
    pub fn history_enabled(mut self, enabled: bool) -> Self {
        self.config.history_enabled = enabled;
        self
    }

    /// 히스토리 용량을 설정합니다.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// 히스토리 파일 경로를 설정합니다.
    pub fn history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.history_path = path.into();
        self
    }

    /// 설정을 빌드합니다.
    pub fn build(self) -> Result<ScannerConfig, ProductScannerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
