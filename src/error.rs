//! Error types for the dork composer library.

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, DorkError>;

/// Errors that can occur outside the pure composition path.
///
/// Query composition itself is total and never returns an error; these
/// variants cover the storage, preview and dispatch layers around it.
#[derive(Error, Debug)]
pub enum DorkError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a fetched page.
    #[error("Failed to parse page: {0}")]
    Parse(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// History file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// History file could not be serialized or deserialized.
    #[error("Storage error: {0}")]
    Storage(#[from] serde_json::Error),

    /// Template expansion was missing one or more variables.
    #[error("Template '{0}' is missing variables: {1}")]
    MissingVariables(String, String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let err = DorkError::Parse("bad html".to_string());
        assert_eq!(err.to_string(), "Failed to parse page: bad html");
    }

    #[test]
    fn test_error_display_missing_variables() {
        let err = DorkError::MissingVariables("Doc Search".to_string(), "target".to_string());
        assert_eq!(
            err.to_string(),
            "Template 'Doc Search' is missing variables: target"
        );
    }

    #[test]
    fn test_error_display_other() {
        let err = DorkError::Other("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
