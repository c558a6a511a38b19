mod lookup;
mod record;


use crate::{
    error::ErrorClass,
    value::{Value, ValueError},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

// re-exports
pub use record::Record;

///
/// LookupError
///
/// Failures of a single key-set lookup; the map itself is unaffected.
/// A miss is not an error (see `Record::is_valid`).
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum LookupError {
    #[error("key column '{column}': {source}")]
    KeyKind {
        column: String,
        #[source]
        source: ValueError,
    },

    #[error("unknown map key name '{0}'")]
    UnknownColumn(String),
}

impl LookupError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Lookup
    }
}

///
/// DetectorElements
///
/// Sparse column name → value set used for composite key lookups.
/// Entries naming non-key columns are accepted and ignored.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DetectorElements(BTreeMap<String, Value>);

impl DetectorElements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DetectorElements
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
