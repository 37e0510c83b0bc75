//! 설정 관리 -- greenscan.toml 파싱 및 런타임 설정
//!
//! [`GreenscanConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`GREENSCAN_HISTORY_CAPACITY=100` 형식)
//! 3. 설정 파일 (`greenscan.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), greenscan_core::error::GreenscanError> {
//! use greenscan_core::config::GreenscanConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = GreenscanConfig::load("greenscan.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = GreenscanConfig::parse("[history]\ncapacity = 100")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, GreenscanError};

/// 히스토리 최대 보관 개수 상한
const MAX_HISTORY_CAPACITY: usize = 10_000;

/// 요청 타임아웃 상한 (초)
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// greenscan 통합 설정
///
/// `greenscan.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GreenscanConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 제품 조회 설정
    #[serde(default)]
    pub lookup: LookupConfig,
    /// 스캔 히스토리 설정
    #[serde(default)]
    pub history: HistoryConfig,
}

impl GreenscanConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, GreenscanError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값으로 시작하여 로드합니다.
    ///
    /// CLI처럼 설정 파일 없이도 동작해야 하는 진입점에서 사용합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, GreenscanError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(GreenscanError::Config(ConfigError::FileNotFound { .. })) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, GreenscanError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GreenscanError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                GreenscanError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, GreenscanError> {
        toml::from_str(toml_str).map_err(|e| {
            GreenscanError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `GREENSCAN_{SECTION}_{FIELD}`
    /// 예: `GREENSCAN_HISTORY_CAPACITY=100`
    ///
    /// `GREENSCAN_LOOKUP_MIRRORS`는 `name=url` 쌍의 쉼표 구분 목록입니다.
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "GREENSCAN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "GREENSCAN_GENERAL_LOG_FORMAT");
        override_string(&mut self.general.data_dir, "GREENSCAN_GENERAL_DATA_DIR");

        // Lookup
        override_mirrors(&mut self.lookup.mirrors, "GREENSCAN_LOOKUP_MIRRORS");
        override_string(&mut self.lookup.user_agent, "GREENSCAN_LOOKUP_USER_AGENT");
        override_u64(
            &mut self.lookup.request_timeout_secs,
            "GREENSCAN_LOOKUP_REQUEST_TIMEOUT_SECS",
        );

        // History
        override_bool(&mut self.history.enabled, "GREENSCAN_HISTORY_ENABLED");
        override_usize(&mut self.history.capacity, "GREENSCAN_HISTORY_CAPACITY");
        override_string(&mut self.history.file, "GREENSCAN_HISTORY_FILE");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), GreenscanError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.lookup.mirrors.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "lookup.mirrors".to_owned(),
                reason: "at least one mirror is required".to_owned(),
            }
            .into());
        }

        for mirror in &self.lookup.mirrors {
            if mirror.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "lookup.mirrors.name".to_owned(),
                    reason: "mirror name must not be empty".to_owned(),
                }
                .into());
            }
            if !(mirror.base_url.starts_with("http://") || mirror.base_url.starts_with("https://"))
            {
                return Err(ConfigError::InvalidValue {
                    field: "lookup.mirrors.base_url".to_owned(),
                    reason: format!(
                        "mirror '{}' base_url must start with http:// or https://",
                        mirror.name
                    ),
                }
                .into());
            }
        }

        if self.lookup.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                field: "lookup.request_timeout_secs".to_owned(),
                reason: format!("must be 0 (transport default) or 1-{MAX_REQUEST_TIMEOUT_SECS}"),
            }
            .into());
        }

        if self.history.capacity == 0 || self.history.capacity > MAX_HISTORY_CAPACITY {
            return Err(ConfigError::InvalidValue {
                field: "history.capacity".to_owned(),
                reason: format!("must be 1-{MAX_HISTORY_CAPACITY}"),
            }
            .into());
        }

        if self.history.enabled && self.history.file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "history.file".to_owned(),
                reason: "history file must not be empty when history is enabled".to_owned(),
            }
            .into());
        }

        Ok(())
    }

    /// 히스토리 파일의 실제 경로를 반환합니다.
    ///
    /// `history.file`이 절대 경로면 그대로, 아니면 `general.data_dir` 기준으로 해석합니다.
    pub fn history_path(&self) -> PathBuf {
        let file = Path::new(&self.history.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            Path::new(&self.general.data_dir).join(file)
        }
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
    /// 데이터 디렉토리
    pub data_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
            data_dir: ".greenscan".to_owned(),
        }
    }
}

/// 제품 데이터베이스 미러
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// 미러 이름 (로그/메트릭 레이블)
    pub name: String,
    /// 미러 기본 URL (예: `https://world.openfoodfacts.org`)
    pub base_url: String,
}

impl MirrorConfig {
    /// 새 미러 설정을 생성합니다.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
        }
    }

    /// Open Food Facts 기본 미러 목록 (world, uk, us 순)
    pub fn open_food_facts() -> Vec<Self> {
        vec![
            Self::new("world", "https://world.openfoodfacts.org"),
            Self::new("uk", "https://uk.openfoodfacts.org"),
            Self::new("us", "https://us.openfoodfacts.org"),
        ]
    }
}

/// 제품 조회 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// 조회 순서대로 나열된 미러 목록
    pub mirrors: Vec<MirrorConfig>,
    /// HTTP User-Agent 헤더
    pub user_agent: String,
    /// 요청 타임아웃 (초). 0이면 전송 계층 기본값
    pub request_timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            mirrors: MirrorConfig::open_food_facts(),
            user_agent: concat!("greenscan/", env!("CARGO_PKG_VERSION")).to_owned(),
            request_timeout_secs: 0,
        }
    }
}

/// 스캔 히스토리 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// 히스토리 기록 여부
    pub enabled: bool,
    /// 최대 보관 개수 (초과 시 가장 오래된 항목부터 제거)
    pub capacity: usize,
    /// 저장 파일 (상대 경로면 data_dir 기준)
    pub file: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 50,
            file: "history.json".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

/// `name=url,name=url` 형식의 미러 목록 오버라이드
///
/// 하나라도 형식이 잘못되면 전체를 무시하고 기존 값을 유지합니다.
fn override_mirrors(target: &mut Vec<MirrorConfig>, env_key: &str) {
    let Ok(val) = std::env::var(env_key) else {
        return;
    };

    let mut mirrors = Vec::new();
    for pair in val.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match pair.split_once('=') {
            Some((name, url)) => mirrors.push(MirrorConfig::new(name.trim(), url.trim())),
            None => {
                warn!(
                    env_key,
                    value = pair,
                    "expected name=url mirror entry, ignoring env var"
                );
                return;
            }
        }
    }
    *target = mirrors;
}
