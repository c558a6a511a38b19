//! Load observability.
//!
//! Structured log events go through `tracing`; callers that want numbers
//! instead of log lines read a `MapStats` snapshot.

use serde::{Deserialize, Serialize};

///
/// MapStats
/// Point-in-time counters for a loaded map.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MapStats {
    pub rows: u64,
    pub columns: u64,
    pub key_arity: u64,
    pub primary_entries: u64,
    pub reverse_entries: u64,

    /// Key tuples whose earlier row was displaced by last-write-wins.
    pub replaced_primary_keys: u64,

    /// Reverse keys whose earlier row was displaced by last-write-wins.
    pub replaced_reverse_keys: u64,
}

impl MapStats {
    /// Rows that no key tuple resolves to.
    #[must_use]
    pub const fn unreachable_rows(&self) -> u64 {
        self.rows.saturating_sub(self.primary_entries)
    }
}

///
/// LoadCounters
///

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LoadCounters {
    pub(crate) replaced_primary_keys: u64,
    pub(crate) replaced_reverse_keys: u64,
}

impl LoadCounters {
    pub(crate) const fn record_primary_replace(&mut self) {
        self.replaced_primary_keys = self.replaced_primary_keys.saturating_add(1);
    }

    pub(crate) const fn record_reverse_replace(&mut self) {
        self.replaced_reverse_keys = self.replaced_reverse_keys.saturating_add(1);
    }
}
