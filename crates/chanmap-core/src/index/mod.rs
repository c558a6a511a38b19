
use crate::{KEY_SENTINEL, MAX_KEY_COLUMNS, config::DuplicateKeyPolicy, row::RowId};
use serde::Serialize;
use std::{
    collections::{HashMap, hash_map::Entry},
    fmt::{self, Display},
    hash::Hash,
};

///
/// KeyTuple
///
/// Fixed-width composite key for the primary index.
/// Slots past the declared key arity hold `KEY_SENTINEL`, so every row of a
/// map shares the same trailing coordinates.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct KeyTuple([i64; MAX_KEY_COLUMNS]);

impl KeyTuple {
    pub const EMPTY: Self = Self([KEY_SENTINEL; MAX_KEY_COLUMNS]);

    #[must_use]
    pub const fn new(slots: [i64; MAX_KEY_COLUMNS]) -> Self {
        Self(slots)
    }

    /// Build a tuple from leading key values; `None` past `MAX_KEY_COLUMNS`.
    #[must_use]
    pub fn from_prefix(values: &[i64]) -> Option<Self> {
        if values.len() > MAX_KEY_COLUMNS {
            return None;
        }

        let mut key = Self::EMPTY;
        key.0[..values.len()].copy_from_slice(values);

        Some(key)
    }

    #[must_use]
    pub const fn slots(&self) -> &[i64; MAX_KEY_COLUMNS] {
        &self.0
    }

    /// Write one slot; returns false when `ordinal` is outside the tuple.
    pub fn set(&mut self, ordinal: usize, value: i64) -> bool {
        match self.0.get_mut(ordinal) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl Default for KeyTuple {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Display for KeyTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "({a}, {b}, {c}, {d})")
    }
}

///
/// InsertOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    Inserted,

    /// Last-write-wins replaced an earlier row; that row stays in the row
    /// store but is no longer reachable through this index.
    Replaced { previous: RowId },

    /// The policy refused the insert; the index is unchanged.
    Rejected { existing: RowId },
}

///
/// UniqueIndex
///
/// Single-valued mapping from key to row id.
///

#[derive(Clone, Debug)]
pub struct UniqueIndex<K> {
    entries: HashMap<K, RowId>,
}

/// Composite hardware key → row.
pub type PrimaryIndex = UniqueIndex<KeyTuple>;

/// Reverse-key (logical channel) → row.
pub type ReverseIndex = UniqueIndex<i64>;

impl<K: Eq + Hash> UniqueIndex<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<RowId> {
        self.entries.get(key).copied()
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, RowId)> {
        self.entries.iter().map(|(key, row)| (key, *row))
    }

    pub(crate) fn insert(
        &mut self,
        key: K,
        row: RowId,
        policy: DuplicateKeyPolicy,
    ) -> InsertOutcome {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(row);
                InsertOutcome::Inserted
            }
            Entry::Occupied(slot) if policy == DuplicateKeyPolicy::Reject => {
                InsertOutcome::Rejected {
                    existing: *slot.get(),
                }
            }
            Entry::Occupied(mut slot) => InsertOutcome::Replaced {
                previous: slot.insert(row),
            },
        }
    }
}

impl<K: Eq + Hash> Default for UniqueIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
