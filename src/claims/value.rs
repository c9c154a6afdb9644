use crate::error::{Error, Result};
use miniserde::json::{Array, Number, Value};

/// A single claim value
///
/// Tokens carry strings, integers (timestamps are seconds since the Unix
/// epoch) and string sets (multi-valued `aud`). Any other JSON shape in a
/// payload is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimValue {
    String(String),
    Integer(i64),
    StringSet(Vec<String>),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Strings held by this value: one for `String`, all for `StringSet`
    pub fn strings(&self) -> Vec<&str> {
        match self {
            ClaimValue::String(s) => vec![s.as_str()],
            ClaimValue::StringSet(set) => set.iter().map(String::as_str).collect(),
            ClaimValue::Integer(_) => Vec::new(),
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            ClaimValue::String(_) => "string",
            ClaimValue::Integer(_) => "integer",
            ClaimValue::StringSet(_) => "string set",
        }
    }

    pub(crate) fn to_json(&self) -> Value {
        match self {
            ClaimValue::String(s) => Value::String(s.clone()),
            ClaimValue::Integer(i) => Value::Number(Number::I64(*i)),
            ClaimValue::StringSet(set) => {
                let mut array = Array::new();
                for item in set {
                    array.push(Value::String(item.clone()));
                }
                Value::Array(array)
            }
        }
    }

    pub(crate) fn from_json(name: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(ClaimValue::String(s.clone())),
            Value::Number(Number::I64(i)) => Ok(ClaimValue::Integer(*i)),
            Value::Number(Number::U64(u)) => i64::try_from(*u)
                .map(ClaimValue::Integer)
                .map_err(|_| Error::MalformedClaims(format!("claim '{name}' is out of range"))),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(Error::MalformedClaims(format!(
                        "claim '{name}' must contain only strings"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(ClaimValue::StringSet),
            _ => Err(Error::MalformedClaims(format!(
                "claim '{name}' must be a string, an integer or a list of strings"
            ))),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(i64::from(value))
    }
}

impl From<u32> for ClaimValue {
    fn from(value: u32) -> Self {
        ClaimValue::Integer(i64::from(value))
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(value: Vec<String>) -> Self {
        ClaimValue::StringSet(value)
    }
}

impl From<Vec<&str>> for ClaimValue {
    fn from(value: Vec<&str>) -> Self {
        ClaimValue::StringSet(value.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_integers() {
        assert_eq!(
            ClaimValue::from_json("exp", &Value::Number(Number::U64(42))).unwrap(),
            ClaimValue::Integer(42)
        );
        assert_eq!(
            ClaimValue::from_json("exp", &Value::Number(Number::I64(-1))).unwrap(),
            ClaimValue::Integer(-1)
        );
        assert!(matches!(
            ClaimValue::from_json("exp", &Value::Number(Number::U64(u64::MAX))),
            Err(Error::MalformedClaims(_))
        ));
        assert!(matches!(
            ClaimValue::from_json("exp", &Value::Number(Number::F64(1.5))),
            Err(Error::MalformedClaims(_))
        ));
    }

    #[test]
    fn test_json_rejects_other_shapes() {
        assert!(ClaimValue::from_json("x", &Value::Null).is_err());
        assert!(ClaimValue::from_json("x", &Value::Bool(true)).is_err());

        let mut mixed = Array::new();
        mixed.push(Value::String("a".into()));
        mixed.push(Value::Number(Number::U64(1)));
        assert!(ClaimValue::from_json("aud", &Value::Array(mixed)).is_err());
    }

    #[test]
    fn test_strings() {
        assert_eq!(ClaimValue::from("a").strings(), vec!["a"]);
        assert_eq!(ClaimValue::from(vec!["a", "b"]).strings(), vec!["a", "b"]);
        assert!(ClaimValue::from(7i64).strings().is_empty());
    }
}
