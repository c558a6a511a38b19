
use crate::{
    MAX_KEY_COLUMNS,
    config::LoadConfig,
    error::LoadError,
    index::{InsertOutcome, PrimaryIndex, ReverseIndex},
    obs::{LoadCounters, MapStats},
    row::{DecodedRow, Row, RowDecoder, RowId, RowStore},
    schema::{ColumnSchema, parse_header},
    source::{LogicalLine, LogicalLines},
};
use derive_more::Display;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info, warn};

///
/// MapState
///
/// There is no failed state: a map whose load returned an error is left in
/// an unspecified mix and must be dropped.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum MapState {
    #[default]
    Empty,
    Loaded,
}

///
/// ChannelMap
///
/// Load-once, read-many map built from a self-describing map file.
/// Owns the schema, the row store, and both indexes.
///

#[derive(Clone, Debug, Default)]
pub struct ChannelMap {
    config: LoadConfig,
    state: MapState,
    schema: ColumnSchema,
    pub(crate) rows: RowStore,
    pub(crate) primary: PrimaryIndex,
    pub(crate) reverse: ReverseIndex,
    pub(crate) reverse_column: Option<usize>,
    counters: LoadCounters,
}

impl ChannelMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: LoadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Open and load `path` into a fresh map.
    pub fn from_path(path: impl AsRef<Path>, config: LoadConfig) -> Result<Self, LoadError> {
        let mut map = Self::with_config(config);
        map.load(path)?;

        Ok(map)
    }

    /// Load map text from any buffered reader into a fresh map.
    pub fn from_reader<R: BufRead>(reader: R, config: LoadConfig) -> Result<Self, LoadError> {
        let mut map = Self::with_config(config);
        map.load_from_reader(reader)?;

        Ok(map)
    }

    /// Populate an empty map from the file at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        if self.state == MapState::Loaded {
            return Err(LoadError::AlreadyLoaded);
        }

        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading channel map");

        self.load_from_reader(BufReader::new(file))
    }

    /// Populate an empty map from map text.
    ///
    /// The whole input is consumed before the key column limit is checked,
    /// so an over-keyed file is read to the end and then rejected.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> Result<(), LoadError> {
        if self.state == MapState::Loaded {
            return Err(LoadError::AlreadyLoaded);
        }

        let mut lines = LogicalLines::new(reader);
        let schema = parse_header(&mut lines)?;
        let decoder = RowDecoder::new(&schema, &self.config.reverse_key_column)?;
        self.reverse_column = decoder.reverse_column();

        for line in lines {
            let line = line.map_err(|source| LoadError::Read { source })?;
            let decoded = decoder.decode(&line)?;
            self.ingest(&line, decoded)?;
        }

        let key_arity = schema.key_arity();
        if key_arity > MAX_KEY_COLUMNS {
            return Err(LoadError::TooManyKeyColumns {
                count: key_arity,
                names: schema.key_names().into_iter().map(str::to_string).collect(),
            });
        }

        self.schema = schema;
        self.state = MapState::Loaded;

        let stats = self.stats();
        info!(
            rows = stats.rows,
            columns = stats.columns,
            key_arity = stats.key_arity,
            primary_entries = stats.primary_entries,
            reverse_entries = stats.reverse_entries,
            replaced_primary_keys = stats.replaced_primary_keys,
            replaced_reverse_keys = stats.replaced_reverse_keys,
            "channel map loaded"
        );

        Ok(())
    }

    // Append one decoded row and index it under the configured policy.
    fn ingest(&mut self, line: &LogicalLine, decoded: DecodedRow) -> Result<(), LoadError> {
        let DecodedRow {
            row,
            key,
            reverse_key,
        } = decoded;
        let policy = self.config.duplicate_keys;
        let id = self.rows.push(row);

        if let Some(key) = key {
            match self.primary.insert(key, id, policy) {
                InsertOutcome::Inserted => {}
                InsertOutcome::Replaced { previous } => {
                    self.counters.record_primary_replace();
                    warn!(line = line.number, %key, %previous, row = %id, "key tuple overwritten");
                }
                InsertOutcome::Rejected { existing } => {
                    return Err(LoadError::DuplicateKeyTuple {
                        line: line.number,
                        key,
                        existing,
                    });
                }
            }
        }

        if let Some(channel) = reverse_key {
            match self.reverse.insert(channel, id, policy) {
                InsertOutcome::Inserted => {}
                InsertOutcome::Replaced { previous } => {
                    self.counters.record_reverse_replace();
                    warn!(line = line.number, channel, %previous, row = %id, "reverse key overwritten");
                }
                InsertOutcome::Rejected { existing } => {
                    return Err(LoadError::DuplicateReverseKey {
                        line: line.number,
                        channel,
                        existing,
                    });
                }
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn state(&self) -> MapState {
        self.state
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state == MapState::Loaded
    }

    #[must_use]
    pub const fn config(&self) -> &LoadConfig {
        &self.config
    }

    #[must_use]
    pub const fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Key column names in key-tuple order.
    #[must_use]
    pub fn key_names(&self) -> Vec<&str> {
        self.schema.key_names()
    }

    /// Name of the reverse-key column, when the schema has one.
    #[must_use]
    pub fn reverse_key_column(&self) -> Option<&str> {
        self.reverse_column
            .map(|_| self.config.reverse_key_column.as_str())
    }

    /// Number of stored rows, including rows displaced from the indexes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id)
    }

    pub fn rows(&self) -> impl Iterator<Item = (RowId, &Row)> {
        self.rows.iter()
    }

    /// Whether a logical channel is present in the reverse index.
    #[must_use]
    pub fn contains_channel(&self, channel: i64) -> bool {
        self.reverse.contains(&channel)
    }

    #[must_use]
    pub fn stats(&self) -> MapStats {
        let count = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);

        MapStats {
            rows: count(self.rows.len()),
            columns: count(self.schema.len()),
            key_arity: count(self.schema.key_arity()),
            primary_entries: count(self.primary.len()),
            reverse_entries: count(self.reverse.len()),
            replaced_primary_keys: self.counters.replaced_primary_keys,
            replaced_reverse_keys: self.counters.replaced_reverse_keys,
        }
    }
}
