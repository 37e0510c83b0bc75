//! CLI-specific error types and exit code mapping

use greenscan_core::error::{ConfigError, GreenscanError};
use greenscan_scanner::ProductScannerError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The product or history entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Scanner domain error.
    #[error("scan error: {0}")]
    Scan(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command error              |
    /// | 2    | Configuration error                  |
    /// | 3    | Product or entry not found           |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::NotFound(_) => 3,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Scan(_) => 1,
        }
    }
}

impl From<GreenscanError> for CliError {
    fn from(e: GreenscanError) -> Self {
        match e {
            GreenscanError::Config(ConfigError::FileNotFound { path }) => {
                Self::Config(format!("config file not found: {path}"))
            }
            GreenscanError::Config(inner) => Self::Config(inner.to_string()),
            GreenscanError::Io(io) => Self::Io(io),
            other => Self::Command(other.to_string()),
        }
    }
}

impl From<ProductScannerError> for CliError {
    fn from(e: ProductScannerError) -> Self {
        match e {
            ProductScannerError::NotFound { .. } | ProductScannerError::NotFoundAnywhere { .. } => {
                Self::NotFound(e.to_string())
            }
            ProductScannerError::Config { .. } => Self::Config(e.to_string()),
            ProductScannerError::Io { source, .. } => Self::Io(source),
            other => Self::Scan(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_not_found() {
        let err = CliError::NotFound("5449000000996".to_owned());
        assert_eq!(err.exit_code(), 3, "not found should return exit code 3");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("test error".to_owned());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_from_scanner_not_found_anywhere() {
        let err: CliError = ProductScannerError::NotFoundAnywhere {
            barcode: "12345678".to_owned(),
            mirrors_tried: 3,
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("12345678"));
    }

    #[test]
    fn test_from_scanner_config_error() {
        let err: CliError = ProductScannerError::Config {
            field: "mirrors".to_owned(),
            reason: "empty".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_from_scanner_storage_error() {
        let err: CliError = ProductScannerError::StorageWrite {
            key: "scanHistory".to_owned(),
            reason: "disk full".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_from_core_config_error() {
        let err: CliError = GreenscanError::Config(ConfigError::InvalidValue {
            field: "history.capacity".to_owned(),
            reason: "must be 1-10000".to_owned(),
        })
        .into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("history.capacity"));
    }

    #[test]
    fn test_from_core_io_error() {
        let err: CliError =
            GreenscanError::Io(std::io::Error::other("permission denied")).into();
        assert_eq!(err.exit_code(), 10);
    }
}
