mod decode;


use crate::value::{Value, ValueError};
use derive_more::{Deref, Display, From};
use serde::Serialize;
use thiserror::Error as ThisError;

// re-exports
pub use decode::{DecodedRow, RowDecoder};

///
/// RowError
/// Data line decode failures.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RowError {
    #[error("line {line}: expected {expected} values, found {found}")]
    Arity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: column '{column}': {source}")]
    InvalidValue {
        line: usize,
        column: String,
        #[source]
        source: ValueError,
    },
}

///
/// RowId
///
/// Position of a row in its `RowStore`.
///

#[derive(
    Clone, Copy, Debug, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct RowId(usize);

impl RowId {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

///
/// Row
///
/// Decoded values of one data line, aligned positionally with the schema.
///

#[derive(Clone, Debug, Deref, PartialEq, Serialize)]
pub struct Row(Vec<Value>);

impl Row {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

///
/// RowStore
///
/// Append-only row storage; rows are never mutated or removed.
///

#[derive(Clone, Debug, Default)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub(crate) fn push(&mut self, row: Row) -> RowId {
        let id = RowId(self.rows.len());
        self.rows.push(row);

        id
    }

    #[must_use]
    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.0)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowId, &Row)> {
        self.rows.iter().enumerate().map(|(idx, row)| (RowId(idx), row))
    }
}
