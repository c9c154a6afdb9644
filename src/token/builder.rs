use crate::algorithm::Algorithm;
use crate::claims::{registered::*, ClaimSet, ClaimValue};
use crate::error::Result;
use crate::keys::Key;
use crate::token::{Header, Token};
use crate::utils::encode_segment;

/// Accumulates claims and signs them into a [`Token`]
///
/// Setters consume and return the builder; setting a claim twice keeps the
/// last value.
///
/// # Example
///
/// ```ignore
/// let token = TokenBuilder::new()
///     .issuer("http://example.com")
///     .audience("http://example.org")
///     .id("4f1g23a12aa")
///     .issued_at(now)
///     .expires_at(now + 3600)
///     .claim("uid", 1)
///     .build(&HS256, &Key::symmetric("secret"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenBuilder {
    claims: ClaimSet,
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issuer(self, issuer: impl Into<String>) -> Self {
        self.claim(ISSUER, ClaimValue::String(issuer.into()))
    }

    pub fn subject(self, subject: impl Into<String>) -> Self {
        self.claim(SUBJECT, ClaimValue::String(subject.into()))
    }

    /// Set a single audience
    pub fn audience(self, audience: impl Into<String>) -> Self {
        self.claim(AUDIENCE, ClaimValue::String(audience.into()))
    }

    /// Set several audiences; always serialized as an array
    pub fn audiences<I, S>(self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: Vec<String> = audiences.into_iter().map(Into::into).collect();
        self.claim(AUDIENCE, set)
    }

    /// Set the token id (`jti`)
    pub fn id(self, id: impl Into<String>) -> Self {
        self.claim(JWT_ID, ClaimValue::String(id.into()))
    }

    pub fn issued_at(self, timestamp: i64) -> Self {
        self.claim(ISSUED_AT, timestamp)
    }

    pub fn not_before(self, timestamp: i64) -> Self {
        self.claim(NOT_BEFORE, timestamp)
    }

    pub fn expires_at(self, timestamp: i64) -> Self {
        self.claim(EXPIRATION, timestamp)
    }

    /// Set any claim, registered or custom
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name, value);
        self
    }

    /// Claims set so far
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Serialize, sign and assemble the token
    ///
    /// Fails with [`MalformedClaims`](crate::Error::MalformedClaims) if a
    /// registered claim was given the wrong type through [`claim`](Self::claim),
    /// and with the signer's key error if `key` does not fit.
    pub fn build(self, signer: &dyn Algorithm, key: &Key) -> Result<Token> {
        self.claims.check_registered()?;

        let header = Header::new(signer.name());
        let header_segment = encode_segment(header.to_json().as_bytes());
        let payload_segment = encode_segment(self.claims.to_json().as_bytes());

        let signing_input = format!("{header_segment}.{payload_segment}");
        let signature = signer.sign(signing_input.as_bytes(), key)?;

        Ok(Token::new(
            header,
            self.claims,
            signing_input,
            signature,
        ))
    }
}
