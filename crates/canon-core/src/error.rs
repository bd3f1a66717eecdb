//! Error types for canonweave.

use thiserror::Error;

/// Result type alias using canonweave's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for canonweave operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found in the document store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Document store refused access to an object
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Document store operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Entity extraction call failed or returned a malformed payload
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Graph persistence operation failed
    #[error("Graph error: {0}")]
    Graph(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the two store failures the root resolver treats as a
    /// terminal "out of scope" outcome rather than an error.
    pub fn is_unreadable_object(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::PermissionDenied(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("folder-9".to_string());
        assert_eq!(err.to_string(), "Not found: folder-9");
    }

    #[test]
    fn test_error_display_permission_denied() {
        let err = Error::PermissionDenied("folder-9".to_string());
        assert_eq!(err.to_string(), "Permission denied: folder-9");
    }

    #[test]
    fn test_error_display_extraction() {
        let err = Error::Extraction("upstream returned 502".to_string());
        assert_eq!(err.to_string(), "Extraction error: upstream returned 502");
    }

    #[test]
    fn test_error_display_graph() {
        let err = Error::Graph("write conflict".to_string());
        assert_eq!(err.to_string(), "Graph error: write conflict");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing extractor URL".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing extractor URL"
        );
    }

    #[test]
    fn test_unreadable_object_classification() {
        assert!(Error::NotFound("x".into()).is_unreadable_object());
        assert!(Error::PermissionDenied("x".into()).is_unreadable_object());
        assert!(!Error::Store("x".into()).is_unreadable_object());
        assert!(!Error::Internal("x".into()).is_unreadable_object());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
