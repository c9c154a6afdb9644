use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use miniserde::json::{Object, Value};
use miniserde::Deserialize;

/// Token type tag written into every issued header
pub const TOKEN_TYPE: &str = "JWT";

/// Token header: algorithm identifier plus type tag
///
/// Parsed headers may carry other fields (`kid`, `cty`, ...); they are
/// ignored. The algorithm is kept as the literal header text so that unknown
/// names can be reported back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    algorithm: String,
    token_type: Option<String>,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
    typ: Option<String>,
}

impl Header {
    /// Header for a token signed with `algorithm`
    pub fn new(algorithm: &str) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            token_type: Some(TOKEN_TYPE.to_string()),
        }
    }

    /// The algorithm name exactly as written in the header
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Parse algorithm from header
    pub fn algorithm_id(&self) -> Result<AlgorithmId> {
        AlgorithmId::from_str(&self.algorithm)
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Serialize as `{"alg":..,"typ":..}`
    pub(crate) fn to_json(&self) -> String {
        let mut object = Object::new();
        object.insert("alg".to_string(), Value::String(self.algorithm.clone()));
        if let Some(typ) = &self.token_type {
            object.insert("typ".to_string(), Value::String(typ.clone()));
        }
        miniserde::json::to_string(&Value::Object(object))
    }

    pub(crate) fn from_json(json: &str) -> Result<Self> {
        let raw: RawHeader = miniserde::json::from_str(json)
            .map_err(|e| Error::MalformedClaims(format!("Failed to parse header: {e}")))?;

        Ok(Self {
            algorithm: raw.alg,
            token_type: raw.typ,
        })
    }
}
