//! Trait abstractions for directory operations.
//!
//! The directory is an external key-value namespace with overwrite
//! semantics. Nothing here knows about proposals; the repository layers the
//! Index/record access pattern on top.

use async_trait::async_trait;
use std::fmt;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Directory is not reachable or not ready.
    Unavailable,
    /// Write was refused (no signing identity, permission denied).
    WriteRejected(String),
    /// Local I/O failure in a file-backed directory.
    Io(String),
    /// Other backend error with message.
    Backend(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "Directory unavailable"),
            Self::WriteRejected(msg) => write!(f, "Write rejected: {}", msg),
            Self::Io(msg) => write!(f, "Directory I/O error: {}", msg),
            Self::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Trait abstraction for the key-value directory.
///
/// Enables mock implementations for testing.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Readiness check. Callers must consult this before reading; a directory
    /// that is not ready is treated as holding no data.
    async fn is_available(&self) -> DirectoryResult<bool>;

    /// Read the payload stored under `key`.
    ///
    /// An absent key yields an empty payload, not an error.
    async fn get(&self, key: &str) -> DirectoryResult<Vec<u8>>;

    /// Overwrite the payload stored under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> DirectoryResult<()>;

    /// Resolved address of this directory (included in disclosure challenges).
    async fn address(&self) -> DirectoryResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_display() {
        assert_eq!(
            format!("{}", DirectoryError::Unavailable),
            "Directory unavailable"
        );
        assert_eq!(
            format!("{}", DirectoryError::Backend("test error".to_string())),
            "test error"
        );
        assert_eq!(
            format!("{}", DirectoryError::WriteRejected("no signer".to_string())),
            "Write rejected: no signer"
        );
    }

    #[test]
    fn test_directory_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DirectoryError = io.into();
        assert!(matches!(err, DirectoryError::Io(msg) if msg.contains("missing")));
    }
}
