use http::StatusCode;

/// Error types for formatting resources and parsing request bodies.
#[derive(Debug)]
pub enum FormatError {
    /// The request body could not be parsed in the formatter's syntax.
    ///
    /// The underlying parser failure is logged, not carried.
    BadRequest,

    /// Writing the response failed.
    Serialization(String),
}

impl FormatError {
    /// Returns the HTTP status an outer layer should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FormatError::BadRequest => StatusCode::BAD_REQUEST,
            FormatError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::BadRequest => write!(f, "Bad request: body could not be parsed"),
            FormatError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Serialization(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for FormatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        FormatError::Serialization(err.to_string())
    }
}

/// Result type alias for formatter operations
pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FormatError::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            FormatError::Serialization("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_display_hides_details() {
        assert_eq!(
            FormatError::BadRequest.to_string(),
            "Bad request: body could not be parsed"
        );
    }
}
