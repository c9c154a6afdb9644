use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, EcdsaKey, EcdsaMaterial, Key};

use ring::rand::SystemRandom;
use ring::signature::{
    self, EcdsaKeyPair, EcdsaSigningAlgorithm, KeyPair, UnparsedPublicKey,
    VerificationAlgorithm,
};

/// ES256 algorithm (ECDSA with P-256 and SHA-256)
pub struct ES256;

/// ES384 algorithm (ECDSA with P-384 and SHA-384)
pub struct ES384;

/// Curve parameters; signatures use the fixed-width `r || s` encoding
struct Curve {
    name: &'static str,
    curve: EcdsaCurve,
    signing: &'static EcdsaSigningAlgorithm,
    verification: &'static dyn VerificationAlgorithm,
}

static P256: Curve = Curve {
    name: "ES256",
    curve: EcdsaCurve::P256,
    signing: &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
    verification: &signature::ECDSA_P256_SHA256_FIXED,
};

static P384: Curve = Curve {
    name: "ES384",
    curve: EcdsaCurve::P384,
    signing: &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
    verification: &signature::ECDSA_P384_SHA384_FIXED,
};

impl Algorithm for ES256 {
    fn name(&self) -> &'static str {
        "ES256"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_ecdsa(signing_input, key, &P256)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_ecdsa(signing_input, signature, key, &P256)
    }
}

impl Algorithm for ES384 {
    fn name(&self) -> &'static str {
        "ES384"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_ecdsa(signing_input, key, &P384)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_ecdsa(signing_input, signature, key, &P384)
    }
}

/// Get the ECDSA key, checking its curve matches the algorithm
fn curve_key<'a>(key: &'a Key, curve: &Curve) -> Result<&'a EcdsaKey> {
    let ecdsa_key = key.as_ecdsa()?;
    if ecdsa_key.curve() != curve.curve {
        let expected = match curve.curve {
            EcdsaCurve::P256 => "ECDSA P-256",
            EcdsaCurve::P384 => "ECDSA P-384",
        };
        return Err(key.mismatch(curve.name, expected));
    }
    Ok(ecdsa_key)
}

fn load_key_pair(pkcs8: &[u8], curve: &Curve, rng: &SystemRandom) -> Result<EcdsaKeyPair> {
    EcdsaKeyPair::from_pkcs8(curve.signing, pkcs8, rng)
        .map_err(|e| Error::InvalidKey(format!("ECDSA PKCS#8 key rejected: {e}")))
}

fn sign_ecdsa(signing_input: &[u8], key: &Key, curve: &Curve) -> Result<Vec<u8>> {
    let EcdsaMaterial::Private(pkcs8) = curve_key(key, curve)?.material() else {
        return Err(Error::InvalidKey(
            "ECDSA signing requires a private key".to_string(),
        ));
    };

    let rng = SystemRandom::new();
    let key_pair = load_key_pair(pkcs8, curve, &rng)?;
    let signature = key_pair
        .sign(&rng, signing_input)
        .map_err(|_| Error::InvalidKey("ECDSA signing failed".to_string()))?;

    Ok(signature.as_ref().to_vec())
}

fn verify_ecdsa(signing_input: &[u8], signature: &[u8], key: &Key, curve: &Curve) -> Result<bool> {
    let verified = match curve_key(key, curve)?.material() {
        EcdsaMaterial::Public(point) => UnparsedPublicKey::new(curve.verification, point)
            .verify(signing_input, signature)
            .is_ok(),
        EcdsaMaterial::Private(pkcs8) => {
            let key_pair = load_key_pair(pkcs8, curve, &SystemRandom::new())?;
            UnparsedPublicKey::new(curve.verification, key_pair.public_key().as_ref())
                .verify(signing_input, signature)
                .is_ok()
        }
    };

    Ok(verified)
}
