//! 에러 타입 -- 도메인별 에러 정의

/// greenscan 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum GreenscanError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 스캔/조회 처리 에러
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// 스토리지 에러
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 스캔/조회 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 제품 레코드 없음 (단일 소스 또는 전체 미러)
    #[error("product not found: {0}")]
    NotFound(String),

    /// 조회 과정 실패
    #[error("lookup failed: {0}")]
    Lookup(String),
}

/// 스토리지 에러
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// 쓰기 실패
    #[error("write failed: {0}")]
    Write(String),

    /// 저장된 데이터 손상
    #[error("corrupt data: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_top_level() {
        let err: GreenscanError = ConfigError::InvalidValue {
            field: "history.capacity".to_owned(),
            reason: "must be greater than 0".to_owned(),
        }
        .into();
        assert!(matches!(err, GreenscanError::Config(_)));
        assert!(err.to_string().contains("history.capacity"));
    }

    #[test]
    fn scan_error_display() {
        let err = GreenscanError::from(ScanError::NotFound("5449000000996".to_owned()));
        let msg = err.to_string();
        assert!(msg.starts_with("scan error"));
        assert!(msg.contains("5449000000996"));
    }

    #[test]
    fn storage_error_display() {
        let err = StorageError::Write("disk full".to_owned());
        assert_eq!(err.to_string(), "write failed: disk full");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GreenscanError = io_err.into();
        assert!(matches!(err, GreenscanError::Io(_)));
    }
}
