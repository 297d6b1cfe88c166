//! Unified error types for openhours.
//!
//! Day-token failures are not errors: an unrecognized token is `None` and the
//! line or cell is skipped.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the opening-hours pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty source id).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Source identifier could not be turned into a URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Network-level fetch failure.
    #[error("FETCH_FAILED: {0}")]
    FetchFailed(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Non-success HTTP status.
    #[error("HTTP_ERROR: {0}")]
    HttpStatus(String),

    /// Expected document structure is absent (heading, table, caption).
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),

    /// Cache record could not be read, decoded or written.
    #[error("CACHE_ERROR: {0}")]
    Cache(String),
}

impl Error {
    /// True for failures that mean "no data could be obtained" rather than
    /// a local, recoverable problem.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Error::Cache(_) | Error::InvalidInput(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Cache(format!("invalid cache record: {err}"))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::ParseFailed(msg) => (-32000, msg.clone()),
            Error::Cache(msg) => (-32002, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpStatus(msg) => (-32008, msg.clone()),
            Error::FetchFailed(msg) => (-32009, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ParseFailed("no opening-hours table".to_string());
        assert!(err.to_string().contains("PARSE_FAILED"));
        assert!(err.to_string().contains("no opening-hours table"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::HttpStatus("status 404".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32008);
    }

    #[test]
    fn test_io_error_is_cache_error() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Cache(_)));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_fetch_and_parse_are_unavailable() {
        assert!(Error::FetchTimeout("10s".into()).is_unavailable());
        assert!(Error::ParseFailed("caption".into()).is_unavailable());
    }
}
