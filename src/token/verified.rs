use crate::claims::{validate, ClaimSet, ValidationData};
use crate::error::Result;
use crate::token::Header;

/// A token whose signature has been cryptographically verified
///
/// Its claims are authentic but not yet checked against any policy; call
/// [`validate`](Self::validate) to get a usable [`ClaimSet`].
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    header: Header,
    claims: ClaimSet,
}

impl VerifiedToken {
    pub(crate) fn new(header: Header, claims: ClaimSet) -> Self {
        Self { header, claims }
    }

    /// Get the token header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Authentic, not yet validated claims
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Check the claims against `data` and hand them out if they pass
    ///
    /// # Example
    /// ```ignore
    /// let data = ValidationData::new()
    ///     .issuer("http://example.com")
    ///     .audience("http://example.org");
    ///
    /// let claims = verified.validate(&data)?;
    /// ```
    pub fn validate(self, data: &ValidationData) -> Result<ClaimSet> {
        validate(&self.claims, data)?;
        Ok(self.claims)
    }
}
