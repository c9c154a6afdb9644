//! Token engine: parse, verify and validate in one call
//!
//! [`load_and_verify`] runs the full pipeline with an explicit signer and key.
//! [`Engine`] holds a signer registry, the expected algorithm and the key, and
//! offers the same pipeline plus issuing, for services that are configured
//! once at startup.

use crate::algorithm::{Algorithm, AlgorithmId, SignerRegistry};
use crate::claims::{ClaimSet, ValidationData};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::token::{parse, Token, TokenBuilder};

/// Parse `text`, verify its signature and validate its claims
///
/// Returns the claim set only if every stage succeeds. Rejections are logged
/// at debug level without the token text.
///
/// # Example
/// ```ignore
/// let claims = load_and_verify(
///     token_str,
///     &HS256,
///     &Key::symmetric("secret"),
///     &ValidationData::new().issuer("http://example.com"),
/// )?;
/// ```
pub fn load_and_verify(
    text: &str,
    signer: &dyn Algorithm,
    key: &Key,
    data: &ValidationData,
) -> Result<ClaimSet> {
    let result = parse(text)
        .and_then(|unverified| unverified.verify(signer, key))
        .and_then(|verified| verified.validate(data));

    match &result {
        Ok(claims) => {
            tracing::trace!(
                algorithm = signer.name(),
                claims = claims.len(),
                "Token accepted"
            );
        }
        Err(err @ Error::KeyTypeMismatch { .. }) => {
            tracing::warn!(algorithm = signer.name(), "Key does not fit algorithm: {err}");
        }
        Err(err) => {
            tracing::debug!(algorithm = signer.name(), "Token rejected: {err}");
        }
    }

    result
}

/// A configured token engine
///
/// Holds the registry of permitted signers, the one algorithm tokens must be
/// signed with, and the key. Shared read-only after construction; wrap it in
/// an `Arc` to use it from several request handlers.
///
/// # Example
///
/// ```ignore
/// let engine = Engine::new(
///     SignerRegistry::new(),
///     AlgorithmId::HS256,
///     Key::symmetric("secret"),
/// )?;
///
/// let token = engine.issue(engine.builder().subject("user123").expires_at(now + 3600))?;
/// let claims = engine.load_token(token.as_str())?;
/// ```
#[derive(Debug)]
pub struct Engine {
    registry: SignerRegistry,
    algorithm: AlgorithmId,
    key: Key,
}

impl Engine {
    /// Create an engine expecting `algorithm`, which must be in `registry`
    pub fn new(registry: SignerRegistry, algorithm: AlgorithmId, key: Key) -> Result<Self> {
        if !registry.contains(&algorithm) {
            tracing::warn!(
                algorithm = algorithm.as_str(),
                "Algorithm is not in the signer registry"
            );
            return Err(Error::UnsupportedAlgorithm(algorithm.to_string()));
        }

        Ok(Self {
            registry,
            algorithm,
            key,
        })
    }

    /// Engine backed by a registry holding only `algorithm`
    pub fn with_algorithm(algorithm: AlgorithmId, key: Key) -> Self {
        Self {
            registry: SignerRegistry::allow_only(&[algorithm]),
            algorithm,
            key,
        }
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn registry(&self) -> &SignerRegistry {
        &self.registry
    }

    fn signer(&self) -> Result<&dyn Algorithm> {
        self.registry.get(&self.algorithm)
    }

    /// A fresh builder with no claims set
    pub fn builder(&self) -> TokenBuilder {
        TokenBuilder::new()
    }

    /// Sign the builder's claims with the configured algorithm and key
    pub fn issue(&self, builder: TokenBuilder) -> Result<Token> {
        builder.build(self.signer()?, &self.key)
    }

    /// Default validation data: time constraints at the current time
    pub fn validation_data(&self) -> ValidationData {
        ValidationData::new()
    }

    /// Parse, verify and validate against `data`
    pub fn load_and_verify(&self, text: &str, data: &ValidationData) -> Result<ClaimSet> {
        load_and_verify(text, self.signer()?, &self.key, data)
    }

    /// Parse, verify and validate against [`validation_data`](Self::validation_data)
    pub fn load_token(&self, text: &str) -> Result<ClaimSet> {
        self.load_and_verify(text, &self.validation_data())
    }
}
