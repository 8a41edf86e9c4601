//! Error types for the resource model and the authentication contract.

use http::StatusCode;
use thiserror::Error;

/// Errors raised while building a [`Resource`](crate::Resource) graph.
///
/// These are caller errors: the code assembling the resource must be fixed,
/// there is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The target of `link_resource` has no URI and therefore no self link.
    #[error("invalid reference for relation '{rel}': this resource does not contain a valid URI")]
    InvalidReference {
        /// The relation the link was requested for.
        rel: String,
    },
}

/// Errors raised by [`AuthenticationMethod::authenticate_request`](crate::auth::AuthenticationMethod::authenticate_request).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The request carries no authorization header at all.
    #[error("missing credentials: header '{header}' not present")]
    MissingCredentials {
        /// The header that was looked up.
        header: String,
    },

    /// The authorization header is present but cannot be read as credentials.
    #[error("malformed credentials: {0}")]
    Malformed(String),

    /// Credentials were extracted but did not verify.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl AuthError {
    /// Returns the HTTP status an outer layer should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Malformed(_) => StatusCode::BAD_REQUEST,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}
