mod registry;
mod traits;

pub mod hmac;

#[cfg(feature = "rsa")]
pub mod rsa;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;

pub use registry::SignerRegistry;
pub use traits::{Algorithm, Signer};

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

/// Algorithm identifier carried in the token header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    #[cfg(feature = "rsa")]
    RS256,

    /// RSASSA-PKCS1-v1_5 with SHA-384
    #[cfg(feature = "rsa")]
    RS384,

    /// RSASSA-PKCS1-v1_5 with SHA-512
    #[cfg(feature = "rsa")]
    RS512,

    /// ECDSA with P-256 and SHA-256
    #[cfg(feature = "ecdsa")]
    ES256,

    /// ECDSA with P-384 and SHA-384
    #[cfg(feature = "ecdsa")]
    ES384,
}

impl AlgorithmId {
    /// Parse an algorithm name from a token header
    ///
    /// Names are case-sensitive. `"none"` is never a valid algorithm, in any
    /// casing.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::UnsupportedAlgorithm(format!(
                "algorithm name longer than {MAX_ALG_LENGTH} characters"
            )));
        }

        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),

            #[cfg(feature = "rsa")]
            "RS256" => Ok(AlgorithmId::RS256),
            #[cfg(feature = "rsa")]
            "RS384" => Ok(AlgorithmId::RS384),
            #[cfg(feature = "rsa")]
            "RS512" => Ok(AlgorithmId::RS512),

            #[cfg(feature = "ecdsa")]
            "ES256" => Ok(AlgorithmId::ES256),
            #[cfg(feature = "ecdsa")]
            "ES384" => Ok(AlgorithmId::ES384),

            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",

            #[cfg(feature = "rsa")]
            AlgorithmId::RS256 => "RS256",
            #[cfg(feature = "rsa")]
            AlgorithmId::RS384 => "RS384",
            #[cfg(feature = "rsa")]
            AlgorithmId::RS512 => "RS512",

            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES256 => "ES256",
            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES384 => "ES384",
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512
        )
    }

    /// Every algorithm compiled into this build
    pub fn all() -> Vec<AlgorithmId> {
        vec![
            AlgorithmId::HS256,
            AlgorithmId::HS384,
            AlgorithmId::HS512,
            #[cfg(feature = "rsa")]
            AlgorithmId::RS256,
            #[cfg(feature = "rsa")]
            AlgorithmId::RS384,
            #[cfg(feature = "rsa")]
            AlgorithmId::RS512,
            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES256,
            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES384,
        ]
    }

    /// The signing strategy for this algorithm
    pub fn signer(&self) -> Signer {
        match self {
            AlgorithmId::HS256 => Box::new(hmac::HS256),
            AlgorithmId::HS384 => Box::new(hmac::HS384),
            AlgorithmId::HS512 => Box::new(hmac::HS512),

            #[cfg(feature = "rsa")]
            AlgorithmId::RS256 => Box::new(rsa::RS256),
            #[cfg(feature = "rsa")]
            AlgorithmId::RS384 => Box::new(rsa::RS384),
            #[cfg(feature = "rsa")]
            AlgorithmId::RS512 => Box::new(rsa::RS512),

            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES256 => Box::new(ecdsa::ES256),
            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES384 => Box::new(ecdsa::ES384),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmId::from_str(s)
    }
}
