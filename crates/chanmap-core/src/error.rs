use crate::{
    MAX_KEY_COLUMNS,
    index::KeyTuple,
    row::{RowError, RowId},
    schema::SchemaError,
};
use std::{fmt, io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// LoadError
///
/// Fatal failures while populating a `ChannelMap`.
/// A map that returned one of these is in an unspecified state and must be
/// discarded rather than loaded again.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("map is already loaded; construct a new map to load another file")]
    AlreadyLoaded,

    #[error("line {line}: key tuple {key} already maps to row {existing}")]
    DuplicateKeyTuple {
        line: usize,
        key: KeyTuple,
        existing: RowId,
    },

    #[error("line {line}: reverse key {channel} already maps to row {existing}")]
    DuplicateReverseKey {
        line: usize,
        channel: i64,
        existing: RowId,
    },

    #[error("cannot open map file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read map data: {source}")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("too many map keys: {count} (limit {MAX_KEY_COLUMNS}); names: {}", .names.join(" "))]
    TooManyKeyColumns { count: usize, names: Vec<String> },
}

impl LoadError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::AlreadyLoaded => ErrorClass::InvariantViolation,
            Self::DuplicateKeyTuple { .. } | Self::DuplicateReverseKey { .. } => {
                ErrorClass::Conflict
            }
            Self::Open { .. } | Self::Read { .. } => ErrorClass::Io,
            Self::Row(_) => ErrorClass::Row,
            Self::Schema(_) => ErrorClass::Schema,
            Self::TooManyKeyColumns { .. } => ErrorClass::Cardinality,
        }
    }
}

///
/// ErrorClass
/// Error taxonomy shared by load and lookup failures.
/// Lets callers tell a bad file shape apart from a bad schema without
/// matching on individual variants.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Io,
    Schema,
    Row,
    Cardinality,
    Conflict,
    Lookup,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Io => "io",
            Self::Schema => "schema",
            Self::Row => "row",
            Self::Cardinality => "cardinality",
            Self::Conflict => "conflict",
            Self::Lookup => "lookup",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}
