
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ValueKind
///
/// Declared type of a map column.
/// Header type tokens: `I` → Int, `C` or `S` → Text, `F` → Float.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ValueKind {
    Float,
    Int,
    Text,
}

impl ValueKind {
    /// Resolve a header type token; unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "I" => Some(Self::Int),
            "C" | "S" => Some(Self::Text),
            "F" => Some(Self::Float),
            _ => None,
        }
    }

    /// Canonical header token for this kind.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Float => "F",
            Self::Int => "I",
            Self::Text => "S",
        }
    }

    /// Parse one data token as a value of this kind.
    pub fn parse(self, token: &str) -> Result<Value, ValueError> {
        let unparseable = || ValueError::Unparseable {
            kind: self,
            token: token.to_string(),
        };

        match self {
            Self::Int => token.parse::<i64>().map(Value::Int).map_err(|_| unparseable()),
            Self::Float => match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Value::Float(v)),
                _ => Err(unparseable()),
            },
            Self::Text => Ok(Value::Text(token.to_string())),
        }
    }
}

///
/// ValueError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueError {
    #[error("expected {expected} value, found {found}")]
    KindMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("'{token}' is not a valid {kind} value")]
    Unparseable { kind: ValueKind, token: String },
}

///
/// Value
///
/// One cell of a map row.
/// Floats are always finite; the parser rejects `inf` and `NaN`.
///
/// Serialized untagged so records read naturally as JSON.
///

#[derive(Clone, Debug, Deserialize, Display, From, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Float(f64),
    #[display("{_0}")]
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Extract an integer, rejecting every other variant.
    ///
    /// No numeric widening or narrowing happens here: a `Float(3.0)` is not
    /// an integer key.
    pub fn try_int(&self) -> Result<i64, ValueError> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(ValueError::KindMismatch {
                expected: ValueKind::Int,
                found: other.kind(),
            }),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
