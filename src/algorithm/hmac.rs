use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

#[derive(Clone, Copy)]
enum Digest {
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm for HS256 {
    fn name(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute_mac(Digest::Sha256, signing_input, secret(key)?)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_mac(Digest::Sha256, signing_input, signature, secret(key)?)
    }
}

impl Algorithm for HS384 {
    fn name(&self) -> &'static str {
        "HS384"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute_mac(Digest::Sha384, signing_input, secret(key)?)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_mac(Digest::Sha384, signing_input, signature, secret(key)?)
    }
}

impl Algorithm for HS512 {
    fn name(&self) -> &'static str {
        "HS512"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute_mac(Digest::Sha512, signing_input, secret(key)?)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
        verify_mac(Digest::Sha512, signing_input, signature, secret(key)?)
    }
}

fn secret(key: &Key) -> Result<&[u8]> {
    let secret = key.as_symmetric()?.as_bytes();
    if secret.is_empty() {
        return Err(Error::InvalidKey("HMAC secret is empty".to_string()));
    }
    Ok(secret)
}

fn compute_mac(digest: Digest, signing_input: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
    let invalid = |_| Error::InvalidKey("HMAC secret rejected".to_string());

    let tag = match digest {
        Digest::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(invalid)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        Digest::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(secret).map_err(invalid)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        Digest::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(secret).map_err(invalid)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(tag)
}

/// Recompute the tag and compare in constant time
fn verify_mac(
    digest: Digest,
    signing_input: &[u8],
    signature: &[u8],
    secret: &[u8],
) -> Result<bool> {
    let expected = compute_mac(digest, signing_input, secret)?;

    // Tag length is public, so a length check leaks nothing
    if signature.len() != expected.len() {
        return Ok(false);
    }

    Ok(constant_time_eq(signature, &expected))
}
