use crate::algorithm::{Algorithm, AlgorithmId};
use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::token::{Header, VerifiedToken};
use crate::utils::base64url::decode_segment_bounded;

/// Parse compact token text without trusting any of it
///
/// Checks, in order:
/// - total length (`TokenTooLarge`)
/// - exactly three non-empty `.`-separated segments (`MalformedToken`)
/// - unpadded Base64URL in every segment (`MalformedEncoding`)
/// - header and payload JSON structure (`MalformedClaims`)
///
/// # Example
/// ```ignore
/// let unverified = parse("eyJ...")?;
/// let verified = unverified.verify(&HS256, &key)?;
/// let claims = verified.validate(&ValidationData::new())?;
/// ```
pub fn parse(text: &str) -> Result<UnverifiedToken> {
    if text.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: text.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    let mut parts = text.split('.');
    let (header_b64, payload_b64, signature_b64) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(p), Some(s), None) if !h.is_empty() && !p.is_empty() && !s.is_empty() => {
                (h, p, s)
            }
            _ => return Err(Error::MalformedToken),
        };

    let header_bytes = decode_segment_bounded(header_b64, MAX_DECODED_HEADER_SIZE)?;
    let payload_bytes = decode_segment_bounded(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
    let signature = decode_segment_bounded(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;

    let header = Header::from_json(utf8(&header_bytes, "header")?)?;
    let claims = ClaimSet::from_json(utf8(&payload_bytes, "payload")?)?;

    // The signature covers the literal segments, never a re-encoding
    let signing_input = text[..header_b64.len() + 1 + payload_b64.len()].to_string();

    Ok(UnverifiedToken {
        header,
        claims,
        signing_input,
        signature,
    })
}

fn utf8<'a>(bytes: &'a [u8], segment: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes)
        .map_err(|_| Error::MalformedClaims(format!("{segment} is not valid UTF-8")))
}

/// A token that has been parsed but not yet verified
///
/// Nothing here is trustworthy until [`verify`](Self::verify) succeeds.
#[derive(Debug, Clone)]
pub struct UnverifiedToken {
    header: Header,
    claims: ClaimSet,
    signing_input: String,
    signature: Vec<u8>,
}

impl UnverifiedToken {
    /// Get the token header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get the algorithm from the header
    pub fn algorithm(&self) -> Result<AlgorithmId> {
        self.header.algorithm_id()
    }

    /// Claims as sent, before any signature check
    ///
    /// Note: You should not trust this data until after signature verification!
    pub fn unverified_claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Get the signing input (header.payload) exactly as received
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    /// Get the decoded signature
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Verify the signature and move to the verified state
    ///
    /// The header must name exactly the algorithm of `signer`; anything else,
    /// `"none"` included, is rejected with `UnsupportedAlgorithm` before any
    /// cryptography runs. A key of the wrong family surfaces as
    /// `KeyTypeMismatch`; every other failure is `SignatureInvalid`.
    pub fn verify(self, signer: &dyn Algorithm, key: &Key) -> Result<VerifiedToken> {
        if self.header.algorithm() != signer.name() {
            return Err(Error::UnsupportedAlgorithm(
                self.header.algorithm().to_string(),
            ));
        }

        match signer.verify(self.signing_input.as_bytes(), &self.signature, key) {
            Ok(true) => Ok(VerifiedToken::new(self.header, self.claims)),
            Ok(false) => Err(Error::SignatureInvalid),
            Err(err @ Error::KeyTypeMismatch { .. }) => Err(err),
            Err(err) => {
                tracing::debug!("Signature check errored: {err}");
                Err(Error::SignatureInvalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::hmac::{HS256, HS384};
    use crate::utils::{encode, encode_segment};

    fn token_text(header: &str, payload: &str) -> String {
        format!("{}.{}.{}", encode(header), encode(payload), encode("signature"))
    }

    #[test]
    fn test_parse_valid_token() {
        let text = token_text(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"iss":"test","sub":"user"}"#);
        let token = parse(&text).unwrap();

        assert_eq!(token.header().algorithm(), "HS256");
        assert_eq!(token.header().token_type(), Some("JWT"));
        assert_eq!(token.algorithm().unwrap(), AlgorithmId::HS256);
        assert_eq!(token.unverified_claims().issuer(), Some("test"));
        assert_eq!(token.signature(), b"signature");
    }

    #[test]
    fn test_signing_input_is_literal() {
        // Whitespace in the JSON would be lost by a re-encoding
        let header = encode(r#"{ "alg" : "HS256" }"#);
        let payload = encode(r#"{ "sub" : "user" }"#);
        let text = format!("{header}.{payload}.{}", encode("sig"));

        let token = parse(&text).unwrap();
        assert_eq!(token.signing_input(), format!("{header}.{payload}"));
    }

    #[test]
    fn test_parse_invalid_format() {
        for text in ["", "not.enough", "too.many.parts.here", "a..c", ".b.c", "a.b.", ".."] {
            assert!(
                matches!(parse(text), Err(Error::MalformedToken)),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_invalid_base64() {
        assert!(matches!(
            parse("!!!.abc.def"),
            Err(Error::MalformedEncoding(_))
        ));
        let text = token_text(r#"{"alg":"HS256"}"#, "{}");
        assert!(matches!(
            parse(&format!("{text}=")),
            Err(Error::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        let text = token_text("not json", r#"{"iss":"test"}"#);
        assert!(matches!(parse(&text), Err(Error::MalformedClaims(_))));

        let text = token_text(r#"{"alg":"HS256"}"#, "[1,2,3]");
        assert!(matches!(parse(&text), Err(Error::MalformedClaims(_))));

        let text = format!(
            "{}.{}.{}",
            encode(r#"{"alg":"HS256"}"#),
            encode_segment(&[0xff, 0xfe]),
            encode("sig")
        );
        assert!(matches!(parse(&text), Err(Error::MalformedClaims(_))));
    }

    #[test]
    fn test_token_too_large() {
        let text = "a".repeat(MAX_TOKEN_LENGTH + 1);
        assert!(matches!(parse(&text), Err(Error::TokenTooLarge { .. })));
    }

    #[test]
    fn test_verify_requires_matching_algorithm() {
        let text = token_text(r#"{"alg":"HS384"}"#, "{}");
        let result = parse(&text).unwrap().verify(&HS256, &Key::symmetric("secret"));
        assert_eq!(
            result.unwrap_err(),
            Error::UnsupportedAlgorithm("HS384".to_string())
        );

        let text = token_text(r#"{"alg":"none"}"#, "{}");
        let result = parse(&text).unwrap().verify(&HS256, &Key::symmetric("secret"));
        assert!(matches!(result, Err(Error::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_verify_bad_signature() {
        let text = token_text(r#"{"alg":"HS384"}"#, "{}");
        let result = parse(&text).unwrap().verify(&HS384, &Key::symmetric("secret"));
        assert_eq!(result.unwrap_err(), Error::SignatureInvalid);
    }

    #[test]
    fn test_verify_wrong_key_family() {
        let text = token_text(r#"{"alg":"HS256"}"#, "{}");
        let result = parse(&text).unwrap().verify(&HS256, &Key::rsa_public(vec![1]));
        assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
    }
}
