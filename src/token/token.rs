//! Signed tokens produced by [`TokenBuilder`](crate::TokenBuilder)

use std::fmt;

use crate::algorithm::Algorithm;
use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::token::Header;
use crate::utils::encode_segment;

/// A signed, immutable token
///
/// Holds the header and claims it was built from together with the exact
/// segments that were signed. Its text form is
/// `header-segment.payload-segment.signature-segment`.
///
/// # Examples
///
/// ```ignore
/// let token = engine.issue(engine.builder().subject("user123"))?;
///
/// response.set_header("Authorization", format!("Bearer {token}"));
/// println!("Expires: {:?}", token.expiration());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    header: Header,
    claims: ClaimSet,
    signing_input: String,
    signature: Vec<u8>,
    encoded: String,
}

impl Token {
    pub(crate) fn new(
        header: Header,
        claims: ClaimSet,
        signing_input: String,
        signature: Vec<u8>,
    ) -> Self {
        let encoded = format!("{signing_input}.{}", encode_segment(&signature));
        Self {
            header,
            claims,
            signing_input,
            signature,
            encoded,
        }
    }

    /// Get the token header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get all claims
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// The `header.payload` text the signature covers
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    /// Raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The compact text form
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Check this token's signature with `signer` and `key`
    ///
    /// Signatures do not depend on time; a token that has expired still
    /// verifies. A signer for another algorithm is `UnsupportedAlgorithm`.
    pub fn verify(&self, signer: &dyn Algorithm, key: &Key) -> Result<bool> {
        if signer.name() != self.header.algorithm() {
            return Err(Error::UnsupportedAlgorithm(
                self.header.algorithm().to_string(),
            ));
        }
        signer.verify(self.signing_input.as_bytes(), &self.signature, key)
    }

    /// Get the issuer (iss claim)
    pub fn issuer(&self) -> Option<&str> {
        self.claims.issuer()
    }

    /// Get the subject (sub claim)
    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }

    /// Get the audiences (aud claim)
    pub fn audience(&self) -> Vec<&str> {
        self.claims.audience()
    }

    /// Get the expiration time (exp claim) as Unix timestamp
    pub fn expiration(&self) -> Option<i64> {
        self.claims.expiration()
    }

    /// Get the not-before time (nbf claim) as Unix timestamp
    pub fn not_before(&self) -> Option<i64> {
        self.claims.not_before()
    }

    /// Get the issued-at time (iat claim) as Unix timestamp
    pub fn issued_at(&self) -> Option<i64> {
        self.claims.issued_at()
    }

    /// Get the JWT ID (jti claim)
    pub fn jwt_id(&self) -> Option<&str> {
        self.claims.jwt_id()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::hmac::{HS256, HS384};
    use crate::token::TokenBuilder;

    fn sample() -> Token {
        TokenBuilder::new()
            .issuer("https://example.com")
            .subject("user123")
            .audience("api.example.com")
            .expires_at(1234567890)
            .not_before(1234567800)
            .issued_at(1234567800)
            .id("unique-id")
            .build(&HS256, &Key::symmetric("secret"))
            .unwrap()
    }

    #[test]
    fn test_token_getters() {
        let token = sample();
        assert_eq!(token.issuer(), Some("https://example.com"));
        assert_eq!(token.subject(), Some("user123"));
        assert_eq!(token.audience(), vec!["api.example.com"]);
        assert_eq!(token.expiration(), Some(1234567890));
        assert_eq!(token.not_before(), Some(1234567800));
        assert_eq!(token.issued_at(), Some(1234567800));
        assert_eq!(token.jwt_id(), Some("unique-id"));
    }

    #[test]
    fn test_text_form() {
        let token = sample();
        assert_eq!(token.to_string(), token.as_str());
        assert!(token.as_str().starts_with(token.signing_input()));
        assert_eq!(token.as_str().matches('.').count(), 2);
    }

    #[test]
    fn test_verify() {
        let token = sample();
        assert!(token.verify(&HS256, &Key::symmetric("secret")).unwrap());
        assert!(!token.verify(&HS256, &Key::symmetric("other")).unwrap());
        assert_eq!(
            token.verify(&HS384, &Key::symmetric("secret")),
            Err(Error::UnsupportedAlgorithm("HS256".to_string()))
        );
    }
}
