mod validator;
mod value;

pub use validator::{validate, Constraint, ValidationData};
pub use value::ClaimValue;

use crate::error::{Error, Result};
use miniserde::json::{Object, Value};
use std::collections::BTreeMap;

/// Registered claim names from RFC 7519 Section 4.1
pub mod registered {
    pub const ISSUER: &str = "iss";
    pub const SUBJECT: &str = "sub";
    pub const AUDIENCE: &str = "aud";
    pub const EXPIRATION: &str = "exp";
    pub const NOT_BEFORE: &str = "nbf";
    pub const ISSUED_AT: &str = "iat";
    pub const JWT_ID: &str = "jti";
}

use registered::*;

/// The claims carried by a token
///
/// Claim names are unique. Iteration and serialization follow name order, so
/// the same logical content always serializes (and therefore signs) to the
/// same bytes regardless of the order claims were set in.
///
/// # Examples
///
/// ```ignore
/// let claims = engine.load_and_verify(token_str, &engine.validation_data())?;
///
/// println!("Subject: {:?}", claims.subject());
/// println!("Audiences: {:?}", claims.audience());
/// println!("uid: {:?}", claims.get("uid").and_then(ClaimValue::as_integer));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claims: BTreeMap<String, ClaimValue>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim, returning the value it replaced
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.claims.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ClaimValue> {
        self.claims.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the issuer (iss claim)
    pub fn issuer(&self) -> Option<&str> {
        self.get(ISSUER).and_then(ClaimValue::as_str)
    }

    /// Get the subject (sub claim)
    pub fn subject(&self) -> Option<&str> {
        self.get(SUBJECT).and_then(ClaimValue::as_str)
    }

    /// Get every audience (aud claim), empty when absent
    pub fn audience(&self) -> Vec<&str> {
        self.get(AUDIENCE)
            .map(ClaimValue::strings)
            .unwrap_or_default()
    }

    /// Get the expiration time (exp claim) as Unix timestamp
    pub fn expiration(&self) -> Option<i64> {
        self.get(EXPIRATION).and_then(ClaimValue::as_integer)
    }

    /// Get the not-before time (nbf claim) as Unix timestamp
    pub fn not_before(&self) -> Option<i64> {
        self.get(NOT_BEFORE).and_then(ClaimValue::as_integer)
    }

    /// Get the issued-at time (iat claim) as Unix timestamp
    pub fn issued_at(&self) -> Option<i64> {
        self.get(ISSUED_AT).and_then(ClaimValue::as_integer)
    }

    /// Get the JWT ID (jti claim)
    pub fn jwt_id(&self) -> Option<&str> {
        self.get(JWT_ID).and_then(ClaimValue::as_str)
    }

    /// Check that registered claims hold the types RFC 7519 gives them
    pub(crate) fn check_registered(&self) -> Result<()> {
        for (name, value) in &self.claims {
            let ok = match name.as_str() {
                ISSUER | SUBJECT | JWT_ID => matches!(value, ClaimValue::String(_)),
                EXPIRATION | NOT_BEFORE | ISSUED_AT => matches!(value, ClaimValue::Integer(_)),
                AUDIENCE => !matches!(value, ClaimValue::Integer(_)),
                _ => true,
            };
            if !ok {
                return Err(Error::MalformedClaims(format!(
                    "claim '{name}' cannot be a {}",
                    value.type_name()
                )));
            }
        }
        Ok(())
    }

    /// Serialize as a JSON object with keys in name order
    pub fn to_json(&self) -> String {
        let mut object = Object::new();
        for (name, value) in &self.claims {
            object.insert(name.clone(), value.to_json());
        }
        miniserde::json::to_string(&Value::Object(object))
    }

    /// Parse a JSON payload
    ///
    /// The payload must be a JSON object whose values are strings, integers
    /// or lists of strings, with registered claims of the right type.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = miniserde::json::from_str(json)
            .map_err(|e| Error::MalformedClaims(format!("Failed to parse payload: {e}")))?;

        let object = match value {
            Value::Object(object) => object,
            _ => {
                return Err(Error::MalformedClaims(
                    "payload is not a JSON object".to_string(),
                ))
            }
        };

        let mut claims = ClaimSet::new();
        for (name, value) in object.iter() {
            claims.insert(name.clone(), ClaimValue::from_json(name, value)?);
        }
        claims.check_registered()?;

        Ok(claims)
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = (&'a String, &'a ClaimValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ClaimValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}
