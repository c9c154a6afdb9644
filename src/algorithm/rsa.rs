use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::{Key, RsaKey};

use ring::rand::SystemRandom;
use ring::signature::{self, RsaKeyPair, UnparsedPublicKey};

/// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
pub struct RS256;

/// RS384 algorithm (RSASSA-PKCS1-v1_5 with SHA-384)
pub struct RS384;

/// RS512 algorithm (RSASSA-PKCS1-v1_5 with SHA-512)
pub struct RS512;

impl Algorithm for RS256 {
    fn name(&self) -> &'static str {
        "RS256"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key.as_rsa()?, &signature::RSA_PKCS1_SHA256)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_rsa(
            signing_input,
            signature,
            key.as_rsa()?,
            &signature::RSA_PKCS1_2048_8192_SHA256,
        )
    }
}

impl Algorithm for RS384 {
    fn name(&self) -> &'static str {
        "RS384"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key.as_rsa()?, &signature::RSA_PKCS1_SHA384)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_rsa(
            signing_input,
            signature,
            key.as_rsa()?,
            &signature::RSA_PKCS1_2048_8192_SHA384,
        )
    }
}

impl Algorithm for RS512 {
    fn name(&self) -> &'static str {
        "RS512"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa(signing_input, key.as_rsa()?, &signature::RSA_PKCS1_SHA512)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_rsa(
            signing_input,
            signature,
            key.as_rsa()?,
            &signature::RSA_PKCS1_2048_8192_SHA512,
        )
    }
}

fn load_key_pair(pkcs8: &[u8]) -> Result<RsaKeyPair> {
    RsaKeyPair::from_pkcs8(pkcs8)
        .map_err(|e| Error::InvalidKey(format!("RSA PKCS#8 key rejected: {e}")))
}

/// Generic RSA signing, private keys only
fn sign_rsa(
    signing_input: &[u8],
    key: &RsaKey,
    encoding: &'static dyn signature::RsaEncoding,
) -> Result<Vec<u8>> {
    let RsaKey::Private(pkcs8) = key else {
        return Err(Error::InvalidKey(
            "RSA signing requires a private key".to_string(),
        ));
    };

    let key_pair = load_key_pair(pkcs8)?;
    let mut signature = vec![0u8; key_pair.public().modulus_len()];
    key_pair
        .sign(encoding, &SystemRandom::new(), signing_input, &mut signature)
        .map_err(|_| Error::InvalidKey("RSA signing failed".to_string()))?;

    Ok(signature)
}

/// Generic RSA signature verification
fn verify_rsa(
    signing_input: &[u8],
    signature: &[u8],
    key: &RsaKey,
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> Result<bool> {
    let verified = match key {
        RsaKey::Public(der) => UnparsedPublicKey::new(algorithm, der)
            .verify(signing_input, signature)
            .is_ok(),
        RsaKey::Private(pkcs8) => {
            let key_pair = load_key_pair(pkcs8)?;
            UnparsedPublicKey::new(algorithm, key_pair.public().as_ref())
                .verify(signing_input, signature)
                .is_ok()
        }
    };

    Ok(verified)
}
