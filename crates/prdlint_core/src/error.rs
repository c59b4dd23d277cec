//! Linter error types.

use thiserror::Error;

/// Errors that can occur while configuring the linter.
///
/// Analysis itself never fails: degenerate documents are reported as issues.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File error.
    #[error("File error: {0}")]
    File(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = LinterError::config("Duplicate rule id 'no-vague-language'");
        assert_eq!(
            err.to_string(),
            "Configuration error: Duplicate rule id 'no-vague-language'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LinterError = io.into();
        assert!(matches!(err, LinterError::Io(_)));
    }
}
