//! Edge case tests for token parsing and validation

use bearjwt::algorithm::hmac::HS256;
use bearjwt::utils::{encode, encode_segment};
use bearjwt::*;

use hmac::{Hmac, Mac};
use sha2::Sha256;

const SECRET: &[u8] = b"secret";

fn create_token_with_payload(payload: &str) -> String {
    let signing_input = format!(
        "{}.{}",
        encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        encode(payload)
    );

    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET).unwrap();
    mac.update(signing_input.as_bytes());
    let signature_bytes = mac.finalize().into_bytes();

    format!("{}.{}", signing_input, encode_segment(&signature_bytes))
}

fn verify(token: &str) -> Result<VerifiedToken> {
    parse(token)?.verify(&HS256, &Key::symmetric(SECRET))
}

// ============================================================================
// Token Format Edge Cases
// ============================================================================

#[test]
fn test_segment_count() {
    let valid = create_token_with_payload("{}");
    let parts: Vec<&str> = valid.split('.').collect();

    let cases = [
        String::new(),
        ".".to_string(),
        format!("{}.{}", parts[0], parts[1]),
        format!("{valid}.extra"),
        format!("{}..{}", parts[0], parts[2]),
        format!(".{}.{}", parts[1], parts[2]),
    ];

    for case in &cases {
        assert!(
            matches!(parse(case), Err(Error::MalformedToken)),
            "{case:?} should be malformed"
        );
    }
}

#[test]
fn test_whitespace_is_not_trimmed() {
    let valid = create_token_with_payload("{}");
    assert!(parse(&format!(" {valid}")).is_err());
    assert!(parse(&format!("{valid}\n")).is_err());
}

// ============================================================================
// Base64URL Edge Cases
// ============================================================================

#[test]
fn test_invalid_base64_characters() {
    let valid = create_token_with_payload("{}");
    let parts: Vec<&str> = valid.split('.').collect();

    for bad in ["ab+c", "ab/c", "a b", "@@@@", "abc="] {
        let token = format!("{}.{}.{}", parts[0], bad, parts[2]);
        assert!(
            matches!(parse(&token), Err(Error::MalformedEncoding(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_missing_padding_is_fine() {
    // 1- and 2-byte remainders encode without '=' and must decode
    for payload in [r#"{"a":"b"}"#, r#"{"ab":"c"}"#, r#"{"abc":"d"}"#] {
        let token = create_token_with_payload(payload);
        assert!(!token.contains('='));
        assert!(verify(&token).is_ok(), "{payload}");
    }
}

#[test]
fn test_impossible_segment_length() {
    let valid = create_token_with_payload("{}");
    let parts: Vec<&str> = valid.split('.').collect();
    let token = format!("{}.{}.{}", parts[0], "Zm9vY", parts[2]);
    assert!(matches!(parse(&token), Err(Error::MalformedEncoding(_))));
}

// ============================================================================
// Header Edge Cases
// ============================================================================

#[test]
fn test_malformed_json_header() {
    for header in ["", "{", "[]", r#"{"alg":null}"#, r#"{"typ":"JWT"}"#] {
        let token = format!("{}.{}.{}", encode(header), encode("{}"), encode("sig"));
        let result = parse(&token);
        assert!(
            matches!(result, Err(Error::MalformedClaims(_)) | Err(Error::MalformedToken)),
            "{header:?} gave {result:?}"
        );
    }
}

#[test]
fn test_unsupported_algorithm() {
    for alg in ["HS1024", "ES512", "PS256", "", "hs256"] {
        let token = format!(
            "{}.{}.{}",
            encode(&format!(r#"{{"alg":"{alg}"}}"#)),
            encode("{}"),
            encode("sig")
        );
        let unverified = parse(&token).unwrap();
        assert!(matches!(
            unverified.algorithm(),
            Err(Error::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            unverified.verify(&HS256, &Key::symmetric(SECRET)),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }
}

// ============================================================================
// Payload Edge Cases
// ============================================================================

#[test]
fn test_invalid_json_payload() {
    for payload in ["not json", "[]", "42", r#""string""#, r#"{"a":"#] {
        let token = create_token_with_payload(payload);
        assert!(
            matches!(parse(&token), Err(Error::MalformedClaims(_))),
            "{payload:?}"
        );
    }
}

#[test]
fn test_unsupported_claim_shapes() {
    for payload in [
        r#"{"flag":true}"#,
        r#"{"n":null}"#,
        r#"{"f":1.5}"#,
        r#"{"obj":{"a":"b"}}"#,
        r#"{"aud":["a",1]}"#,
    ] {
        let token = create_token_with_payload(payload);
        assert!(
            matches!(parse(&token), Err(Error::MalformedClaims(_))),
            "{payload:?}"
        );
    }
}

#[test]
fn test_empty_payload_object() {
    let claims = verify(&create_token_with_payload("{}"))
        .unwrap()
        .validate(&ValidationData::new())
        .unwrap();
    assert!(claims.is_empty());
}

// ============================================================================
// Time Claim Edge Cases
// ============================================================================

#[test]
fn test_invalid_time_claim_types() {
    for payload in [r#"{"exp":"9999999999"}"#, r#"{"iat":[1]}"#, r#"{"nbf":"soon"}"#] {
        let token = create_token_with_payload(payload);
        assert!(
            matches!(parse(&token), Err(Error::MalformedClaims(_))),
            "{payload:?}"
        );
    }
}

#[test]
fn test_large_timestamps() {
    let token = create_token_with_payload(&format!(r#"{{"exp":{}}}"#, i64::MAX - 1));
    let claims = verify(&token)
        .unwrap()
        .validate(&ValidationData::new().leeway(u64::MAX))
        .unwrap();
    assert_eq!(claims.expiration(), Some(i64::MAX - 1));

    let token = create_token_with_payload(&format!(r#"{{"exp":{}}}"#, u64::MAX));
    assert!(matches!(parse(&token), Err(Error::MalformedClaims(_))));
}

#[test]
fn test_negative_timestamps() {
    let token = create_token_with_payload(r#"{"exp":-1}"#);
    let result = verify(&token).unwrap().validate(&ValidationData::new());
    assert!(matches!(
        result,
        Err(Error::ValidationFailure(ValidationFailure::Expired { .. }))
    ));
}

#[test]
fn test_expiry_timeline() {
    let now = 1_700_000_000;
    let token = create_token_with_payload(&format!(r#"{{"exp":{}}}"#, now + 3600));
    let verified = verify(&token).unwrap();

    for (at, ok) in [(now, true), (now + 3599, true), (now + 3600, false), (now + 4000, false)] {
        let result = verified
            .clone()
            .validate(&ValidationData::new().current_time(at));
        assert_eq!(result.is_ok(), ok, "at {at}");
    }
}

#[test]
fn test_nbf_edge_cases() {
    let now = 1_700_000_000;
    let token = create_token_with_payload(&format!(r#"{{"nbf":{}}}"#, now + 100));
    let verified = verify(&token).unwrap();

    let err = verified
        .clone()
        .validate(&ValidationData::new().current_time(now))
        .unwrap_err();
    assert_eq!(err.failed_constraint(), Some(ConstraintKind::NotBefore));

    assert!(verified
        .clone()
        .validate(&ValidationData::new().current_time(now + 100))
        .is_ok());
    assert!(verified
        .validate(&ValidationData::new().current_time(now).leeway(100))
        .is_ok());
}

#[test]
fn test_audience_edge_cases() {
    let token = create_token_with_payload(r#"{"aud":[]}"#);
    let err = verify(&token)
        .unwrap()
        .validate(&ValidationData::new().audience("api"))
        .unwrap_err();
    assert_eq!(err.failed_constraint(), Some(ConstraintKind::AudienceContains));

    // Containment is exact, not substring
    let token = create_token_with_payload(r#"{"aud":"https://api.example.com"}"#);
    assert!(verify(&token)
        .unwrap()
        .validate(&ValidationData::new().audience("api.example.com"))
        .is_err());
}

#[test]
fn test_require_exp_tightens_policy() {
    let token = create_token_with_payload(r#"{"sub":"user"}"#);
    let verified = verify(&token).unwrap();

    assert!(verified.clone().validate(&ValidationData::new()).is_ok());
    assert_eq!(
        verified
            .validate(&ValidationData::new().require("exp"))
            .unwrap_err(),
        Error::ValidationFailure(ValidationFailure::MissingClaim("exp".to_string()))
    );
}

// ============================================================================
// Unicode and Special Characters
// ============================================================================

#[test]
fn test_unicode_in_claims() {
    let key = Key::symmetric(SECRET);
    let token = TokenBuilder::new()
        .subject("用户")
        .claim("name", "José")
        .claim("quote", "\"escaped\" \\ and \n newline")
        .build(&HS256, &key)
        .unwrap();

    let claims = load_and_verify(token.as_str(), &HS256, &key, &ValidationData::new()).unwrap();
    assert_eq!(claims.subject(), Some("用户"));
    assert_eq!(claims.get("name").and_then(ClaimValue::as_str), Some("José"));
    assert_eq!(
        claims.get("quote").and_then(ClaimValue::as_str),
        Some("\"escaped\" \\ and \n newline")
    );
}

// ============================================================================
// Large Token Edge Cases
// ============================================================================

#[test]
fn test_large_payload_within_limits() {
    // Roughly 20KB of claims
    let body: String = (0..1000)
        .map(|i| format!(r#""key{i}":"value{i}","#))
        .collect();
    let payload = format!(r#"{{{body}"end":"value"}}"#);

    let claims = verify(&create_token_with_payload(&payload))
        .unwrap()
        .validate(&ValidationData::empty())
        .unwrap();
    assert_eq!(claims.len(), 1001);
}

#[test]
fn test_payload_over_limit() {
    let body: String = (0..5000)
        .map(|i| format!(r#""key{i:05}":"value-value-{i:05}","#))
        .collect();
    let payload = format!(r#"{{{body}"end":"value"}}"#);

    let result = parse(&create_token_with_payload(&payload));
    assert!(matches!(
        result,
        Err(Error::TokenTooLarge { .. }) | Err(Error::MalformedEncoding(_))
    ));
}
