//! Key material for signing and verification
//!
//! - Symmetric secrets for the HMAC family
//! - RSA keys: a PKCS#8 private key (signs and verifies) or a PKCS#1
//!   `RSAPublicKey` (verifies only)
//! - ECDSA keys: a PKCS#8 private key or an uncompressed public point, each
//!   tagged with its curve
//!
//! Keys are parsed by the signing strategy on each call; construction never
//! fails. Bytes of secret material never appear in `Debug` output.

use std::fmt;

use crate::error::{Error, Result};

/// A key that can be used to sign or verify tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Symmetric key for HMAC algorithms
    Symmetric(SymmetricKey),

    /// Asymmetric key for RSA/ECDSA algorithms
    Asymmetric(AsymmetricKey),
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Create an RSA key pair from a PKCS#8 DER document
    pub fn rsa_private(pkcs8: impl Into<Vec<u8>>) -> Self {
        Key::Asymmetric(AsymmetricKey::Rsa(RsaKey::Private(pkcs8.into())))
    }

    /// Create an RSA public key from a DER-encoded PKCS#1 `RSAPublicKey`
    pub fn rsa_public(der: impl Into<Vec<u8>>) -> Self {
        Key::Asymmetric(AsymmetricKey::Rsa(RsaKey::Public(der.into())))
    }

    /// Create an ECDSA key pair from a PKCS#8 DER document
    pub fn ecdsa_private(pkcs8: impl Into<Vec<u8>>, curve: EcdsaCurve) -> Self {
        Key::Asymmetric(AsymmetricKey::Ecdsa(EcdsaKey {
            material: EcdsaMaterial::Private(pkcs8.into()),
            curve,
        }))
    }

    /// Create an ECDSA public key from an uncompressed SEC1 point (`0x04 || x || y`)
    pub fn ecdsa_public(point: impl Into<Vec<u8>>, curve: EcdsaCurve) -> Self {
        Key::Asymmetric(AsymmetricKey::Ecdsa(EcdsaKey {
            material: EcdsaMaterial::Public(point.into()),
            curve,
        }))
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Symmetric(_) => "Symmetric",
            Key::Asymmetric(AsymmetricKey::Rsa(_)) => "RSA",
            Key::Asymmetric(AsymmetricKey::Ecdsa(key)) => match key.curve {
                EcdsaCurve::P256 => "ECDSA P-256",
                EcdsaCurve::P384 => "ECDSA P-384",
            },
        }
    }

    /// Get as symmetric key or return error
    pub fn as_symmetric(&self) -> Result<&SymmetricKey> {
        match self {
            Key::Symmetric(key) => Ok(key),
            _ => Err(self.mismatch("HMAC", "Symmetric")),
        }
    }

    /// Get as RSA key or return error
    pub fn as_rsa(&self) -> Result<&RsaKey> {
        match self {
            Key::Asymmetric(AsymmetricKey::Rsa(key)) => Ok(key),
            _ => Err(self.mismatch("RSA", "RSA")),
        }
    }

    /// Get as ECDSA key or return error
    pub fn as_ecdsa(&self) -> Result<&EcdsaKey> {
        match self {
            Key::Asymmetric(AsymmetricKey::Ecdsa(key)) => Ok(key),
            _ => Err(self.mismatch("ECDSA", "ECDSA")),
        }
    }

    pub(crate) fn mismatch(&self, algorithm: &str, expected: &str) -> Error {
        Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: expected.to_string(),
            actual_key_type: self.key_type().to_string(),
        }
    }
}

/// Symmetric key for HMAC algorithms
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SymmetricKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// Asymmetric key for RSA/ECDSA algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsymmetricKey {
    Rsa(RsaKey),
    Ecdsa(EcdsaKey),
}

/// RSA key material
#[derive(Clone, PartialEq, Eq)]
pub enum RsaKey {
    /// PKCS#8 DER private key
    Private(Vec<u8>),
    /// PKCS#1 DER public key
    Public(Vec<u8>),
}

impl RsaKey {
    pub fn is_private(&self) -> bool {
        matches!(self, RsaKey::Private(_))
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        match self {
            RsaKey::Private(der) | RsaKey::Public(der) => der,
        }
    }
}

impl fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsaKey::Private(_) => f.write_str("RsaKey::Private(..)"),
            RsaKey::Public(der) => f.debug_tuple("RsaKey::Public").field(&der.len()).finish(),
        }
    }
}

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1) curve
    P256,
    /// P-384 (secp384r1) curve
    P384,
}

/// ECDSA key material plus its curve
#[derive(Clone, PartialEq, Eq)]
pub struct EcdsaKey {
    material: EcdsaMaterial,
    curve: EcdsaCurve,
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) enum EcdsaMaterial {
    Private(Vec<u8>),
    Public(Vec<u8>),
}

impl EcdsaKey {
    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    pub fn is_private(&self) -> bool {
        matches!(self.material, EcdsaMaterial::Private(_))
    }

    pub(crate) fn material(&self) -> &EcdsaMaterial {
        &self.material
    }
}

impl fmt::Debug for EcdsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_private() { "private" } else { "public" };
        f.debug_struct("EcdsaKey")
            .field("curve", &self.curve)
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_key_conversions() {
        let key1 = SymmetricKey::from("secret");
        assert_eq!(key1.as_bytes(), b"secret");

        let key2 = SymmetricKey::from("secret".to_string());
        assert_eq!(key2.as_bytes(), b"secret");

        let key3 = SymmetricKey::from(vec![1, 2, 3]);
        assert_eq!(key3.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_key_type_checking() {
        let sym_key = Key::symmetric("secret");
        assert!(sym_key.as_symmetric().is_ok());
        assert!(matches!(
            sym_key.as_rsa(),
            Err(Error::KeyTypeMismatch { .. })
        ));
        assert!(sym_key.as_ecdsa().is_err());

        let rsa_key = Key::rsa_public(vec![1, 2, 3]);
        assert!(rsa_key.as_rsa().is_ok());
        assert!(rsa_key.as_symmetric().is_err());
    }

    #[test]
    fn test_key_type_names() {
        assert_eq!(Key::symmetric("secret").key_type(), "Symmetric");
        assert_eq!(Key::rsa_private(vec![1]).key_type(), "RSA");
        assert_eq!(
            Key::ecdsa_public(vec![4], EcdsaCurve::P384).key_type(),
            "ECDSA P-384"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let key = Key::symmetric("hunter2-super-secret");
        let debug = format!("{key:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("104")); // 'h'

        let rsa = Key::rsa_private(vec![0xde, 0xad, 0xbe, 0xef]);
        let debug = format!("{rsa:?}");
        assert!(!debug.contains("222"));
        assert!(debug.contains("Private"));
    }
}
