//! Core runtime for chanmap: the self-describing map file parser, typed row
//! values, the composite-key and reverse-key indexes, and the query surface
//! exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod index;
pub mod map;
pub mod obs;
pub mod query;
pub mod row;
pub mod schema;
pub mod source;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Maximum number of key columns a map file may flag.
///
/// The primary index key is a fixed-width tuple with one slot per key
/// column, so wider composite keys cannot be represented.
pub const MAX_KEY_COLUMNS: usize = 4;

/// Fill value for key tuple slots past the declared key arity.
pub const KEY_SENTINEL: i64 = 0;

/// Column whose value feeds the reverse index unless configured otherwise.
pub const DEFAULT_REVERSE_KEY_COLUMN: &str = "offlchan";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, decoders, or index internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::{DuplicateKeyPolicy, LoadConfig},
        map::ChannelMap,
        query::{DetectorElements, Record},
        value::{Value, ValueKind},
    };
}
