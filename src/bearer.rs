//! `Authorization: Bearer` boundary
//!
//! Extracts the credential from an `Authorization` header value, runs it
//! through an [`Engine`] and builds the `WWW-Authenticate` challenge. Every
//! failure produces the same challenge, so callers cannot tell an expired
//! token from a forged one.

use crate::claims::ClaimSet;
use crate::engine::Engine;
use crate::error::Result;

/// Default authorization scheme
pub const DEFAULT_SCHEMA: &str = "Bearer";

/// Default protection realm
pub const DEFAULT_REALM: &str = "api";

/// Bearer-token authentication over an [`Engine`]
///
/// # Example
///
/// ```ignore
/// let auth = BearerAuth::new(engine).realm("billing");
///
/// match auth.authenticate(request.header("Authorization")) {
///     Ok(Some(claims)) => login(claims),
///     Ok(None) | Err(_) => {
///         response.set_header("WWW-Authenticate", auth.challenge());
///         response.set_status(401);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct BearerAuth {
    engine: Engine,
    schema: String,
    realm: String,
}

impl BearerAuth {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            schema: DEFAULT_SCHEMA.to_string(),
            realm: DEFAULT_REALM.to_string(),
        }
    }

    /// Set the authorization scheme (`Bearer` by default)
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Set the realm reported in challenges (`api` by default)
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Credential from a header of the form `<schema><whitespace><credential>`
    ///
    /// The scheme is matched case-sensitively and must be followed by at least
    /// one whitespace character. Returns `None` when the header does not match
    /// or carries an empty credential.
    pub fn extract_credential<'a>(&self, header: &'a str) -> Option<&'a str> {
        let rest = header.strip_prefix(self.schema.as_str())?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }

        let credential = rest.trim();
        if credential.is_empty() {
            None
        } else {
            Some(credential)
        }
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// `Ok(None)` means no credential was offered; `Err` means one was offered
    /// and rejected.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Option<ClaimSet>> {
        let Some(credential) = header.and_then(|value| self.extract_credential(value)) else {
            tracing::trace!(schema = %self.schema, "No credential offered");
            return Ok(None);
        };

        match self.engine.load_token(credential) {
            Ok(claims) => Ok(Some(claims)),
            Err(err) => {
                tracing::debug!(realm = %self.realm, "Bearer credential rejected: {err}");
                Err(err)
            }
        }
    }

    /// `WWW-Authenticate` header value for unauthenticated requests
    pub fn challenge(&self) -> String {
        format!(
            "{} realm=\"{}\", error=\"invalid_token\", error_description=\"The access token invalid or expired\"",
            self.schema, self.realm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmId;
    use crate::keys::Key;

    fn auth() -> BearerAuth {
        BearerAuth::new(Engine::with_algorithm(
            AlgorithmId::HS256,
            Key::symmetric("secret"),
        ))
    }

    #[test]
    fn test_extract_credential() {
        let auth = auth();
        assert_eq!(auth.extract_credential("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(auth.extract_credential("Bearer \t  abc  "), Some("abc"));
        assert_eq!(auth.extract_credential("bearer abc"), None);
        assert_eq!(auth.extract_credential("Bearerabc"), None);
        assert_eq!(auth.extract_credential("Bearer    "), None);
        assert_eq!(auth.extract_credential("Basic dXNlcjpwYXNz"), None);
        assert_eq!(auth.extract_credential(""), None);
    }

    #[test]
    fn test_custom_schema() {
        let auth = auth().schema("JWT");
        assert_eq!(auth.extract_credential("JWT abc"), Some("abc"));
        assert_eq!(auth.extract_credential("Bearer abc"), None);
    }

    #[test]
    fn test_challenge() {
        assert_eq!(
            auth().challenge(),
            r#"Bearer realm="api", error="invalid_token", error_description="The access token invalid or expired""#
        );
        assert!(auth()
            .schema("JWT")
            .realm("billing")
            .challenge()
            .starts_with(r#"JWT realm="billing", "#));
    }

    #[test]
    fn test_no_credential_is_not_an_error() {
        let auth = auth();
        assert_eq!(auth.authenticate(None).unwrap(), None);
        assert_eq!(auth.authenticate(Some("Basic xyz")).unwrap(), None);
    }

    #[test]
    fn test_offered_garbage_is_rejected() {
        assert!(auth().authenticate(Some("Bearer not-a-token")).is_err());
    }
}
