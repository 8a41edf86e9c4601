//! Authentication contract.
//!
//! Concrete authentication methods (HMAC signatures, API keys, ...) live
//! outside this crate. They plug into the request pipeline by implementing
//! [`AuthenticationMethod`], whose provided
//! [`authenticate_request`](AuthenticationMethod::authenticate_request)
//! fixes the order of the checks:
//!
//! 1. the authorization header must be present, otherwise
//!    [`AuthError::MissingCredentials`];
//! 2. credentials are extracted from the request;
//! 3. credentials are verified, otherwise [`AuthError::Forbidden`];
//! 4. verified credentials are stored on the request.

use http::HeaderMap;
use http::header::AUTHORIZATION;
use indexmap::IndexMap;
use tracing::debug;

use crate::error::AuthError;

/// The identity established by an authentication method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    principal: String,
    attributes: IndexMap<String, String>,
}

impl Credentials {
    /// Creates credentials for `principal`.
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Attaches a method-specific attribute (signature, scheme, ...).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// The slice of an inbound request the authentication layer needs: headers,
/// the raw body and a slot for the credentials once verified.
#[derive(Debug, Clone, Default)]
pub struct Request {
    headers: HeaderMap,
    body: Vec<u8>,
    credentials: Option<Credentials>,
}

impl Request {
    pub fn new(headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            headers,
            body: body.into(),
            credentials: None,
        }
    }

    /// Looks a header up by name (case-insensitive). Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }
}

/// A way of authenticating requests.
///
/// Implementors provide [`credentials_from_request`](Self::credentials_from_request)
/// and [`verify_credentials`](Self::verify_credentials); callers use
/// [`authenticate_request`](Self::authenticate_request) and should not
/// override it.
pub trait AuthenticationMethod {
    /// Name of the header carrying the credentials.
    fn authorization_header(&self) -> &str {
        AUTHORIZATION.as_str()
    }

    fn has_authorization_header(&self, request: &Request) -> bool {
        request.header(self.authorization_header()).is_some()
    }

    /// Reads credentials out of the request. Only called once the
    /// authorization header is known to be present.
    fn credentials_from_request(&self, request: &Request) -> Result<Credentials, AuthError>;

    /// Checks extracted credentials against the request.
    fn verify_credentials(&self, request: &Request, credentials: &Credentials) -> bool;

    /// Authenticates `request`, storing the verified credentials in it.
    fn authenticate_request(&self, request: &mut Request) -> Result<(), AuthError> {
        if !self.has_authorization_header(request) {
            return Err(AuthError::MissingCredentials {
                header: self.authorization_header().to_string(),
            });
        }

        let credentials = self.credentials_from_request(request)?;
        if !self.verify_credentials(request, &credentials) {
            debug!(principal = %credentials.principal(), "credentials rejected");
            return Err(AuthError::Forbidden(
                "Provided credentials are invalid".to_string(),
            ));
        }

        request.set_credentials(credentials);
        Ok(())
    }
}
