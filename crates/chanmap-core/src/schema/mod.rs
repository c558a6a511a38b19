mod parse;

#[cfg(test)]
mod tests;

use crate::value::ValueKind;
use derive_more::Display;
use std::collections::HashMap;
use thiserror::Error as ThisError;

// re-exports
pub use parse::parse_header;

///
/// HeaderSection
///
/// The four header lines, in the order they must appear.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum HeaderSection {
    #[display("column count")]
    ColumnCount,
    #[display("column names")]
    Names,
    #[display("column types")]
    Types,
    #[display("key flags")]
    KeyFlags,
}

///
/// SchemaError
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("line {line}: invalid column count '{token}'")]
    ColumnCount { line: usize, token: String },

    #[error("line {line}: column '{name}' is declared more than once")]
    DuplicateColumn { line: usize, name: String },

    #[error("line {line}: invalid key flag '{token}' for column '{name}'")]
    KeyFlag {
        line: usize,
        name: String,
        token: String,
    },

    #[error("line {line}: map keys must be integer; column '{name}' is {kind}")]
    KeyKind {
        line: usize,
        name: String,
        kind: ValueKind,
    },

    #[error("reverse key column '{name}' must be Int, found {kind}")]
    ReverseKeyKind { name: String, kind: ValueKind },

    #[error("line {line}: {section} expects {expected} tokens, found {found}")]
    TokenCount {
        line: usize,
        section: HeaderSection,
        expected: usize,
        found: usize,
    },

    #[error("map header is incomplete: missing {missing}")]
    TruncatedHeader { missing: HeaderSection },

    #[error("line {line}: unknown type token '{token}' for column '{name}'")]
    UnknownType {
        line: usize,
        name: String,
        token: String,
    },
}

///
/// Column
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ValueKind,

    /// Slot in the key tuple; `Some` only for flagged key columns.
    pub key_ordinal: Option<usize>,
}

impl Column {
    #[must_use]
    pub const fn is_key(&self) -> bool {
        self.key_ordinal.is_some()
    }
}

///
/// ColumnSchema
///
/// Column layout declared by a map file header.
/// Built once per load and immutable afterwards.
///

#[derive(Clone, Debug, Default)]
pub struct ColumnSchema {
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
    keys: Vec<usize>,
}

impl ColumnSchema {
    // Callers guarantee unique names and dense key ordinals in file order.
    pub(crate) fn new(columns: Vec<Column>) -> Self {
        let by_name = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| (column.name.clone(), idx))
            .collect();
        let keys = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.is_key())
            .map(|(idx, _)| idx)
            .collect();

        Self {
            columns,
            by_name,
            keys,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column index for a name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|idx| &self.columns[idx])
    }

    /// Number of flagged key columns (may exceed the supported maximum
    /// until the load finishes and rejects the file).
    #[must_use]
    pub const fn key_arity(&self) -> usize {
        self.keys.len()
    }

    /// Key columns in key-ordinal order.
    pub fn key_columns(&self) -> impl Iterator<Item = &Column> {
        self.keys.iter().map(|&idx| &self.columns[idx])
    }

    #[must_use]
    pub fn key_names(&self) -> Vec<&str> {
        self.key_columns().map(|column| column.name.as_str()).collect()
    }
}
