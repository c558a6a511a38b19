use crate::DEFAULT_REVERSE_KEY_COLUMN;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// DuplicateKeyPolicy
///
/// What a load does when a key tuple or reverse key repeats.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// The later row replaces the earlier one in the index.
    #[default]
    #[display("last_write_wins")]
    LastWriteWins,

    /// The load fails at the first repeated key.
    #[display("reject")]
    Reject,
}

///
/// LoadConfig
///
/// Every field is optional when deserialized.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct LoadConfig {
    pub duplicate_keys: DuplicateKeyPolicy,

    /// Name of the Int column that feeds the reverse index.
    pub reverse_key_column: String,
}

impl LoadConfig {
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    #[must_use]
    pub fn with_reverse_key_column(mut self, name: impl Into<String>) -> Self {
        self.reverse_key_column = name.into();
        self
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::default(),
            reverse_key_column: DEFAULT_REVERSE_KEY_COLUMN.to_string(),
        }
    }
}
