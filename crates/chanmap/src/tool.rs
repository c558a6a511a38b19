//! Host-facing service boundary.
//!
//! A host framework owns configuration and lifetime; it hands over a
//! `ToolConfig`, gets back a `ChannelMapTool`, and only ever calls the two
//! lookups on it.

use crate::error::Error;
use chanmap_core::{
    config::LoadConfig,
    map::ChannelMap,
    query::{DetectorElements, LookupError, Record},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

///
/// ChannelMapTool
///
/// Object-safe lookup service over a loaded map.
///

pub trait ChannelMapTool: Send + Sync {
    /// Composite-key lookup; see `ChannelMap::lookup_by_detector_elements`.
    fn chan_info_from_detector_elements(
        &self,
        elements: &DetectorElements,
    ) -> Result<Record, LookupError>;

    /// Reverse-key lookup; see `ChannelMap::lookup_by_channel`.
    fn chan_info_from_channel(&self, channel: i64) -> Record;
}

impl ChannelMapTool for ChannelMap {
    fn chan_info_from_detector_elements(
        &self,
        elements: &DetectorElements,
    ) -> Result<Record, LookupError> {
        self.lookup_by_detector_elements(elements)
    }

    fn chan_info_from_channel(&self, channel: i64) -> Record {
        self.lookup_by_channel(channel)
    }
}

///
/// ToolConfig
///
/// Parameter set a host passes when constructing the tool.
/// Load options sit at the same level as `file_name`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ToolConfig {
    pub file_name: PathBuf,

    #[serde(flatten)]
    pub load: LoadConfig,
}

impl ToolConfig {
    #[must_use]
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            load: LoadConfig::default(),
        }
    }

    /// Load the configured map file.
    pub fn build(&self) -> Result<ChannelMap, Error> {
        let map = ChannelMap::from_path(&self.file_name, self.load.clone())?;
        info!(
            file_name = %self.file_name.display(),
            rows = map.len(),
            duplicate_keys = %self.load.duplicate_keys,
            "channel map tool ready"
        );

        Ok(map)
    }

    /// Load the configured map file behind the service trait.
    pub fn build_tool(&self) -> Result<Box<dyn ChannelMapTool>, Error> {
        Ok(Box::new(self.build()?))
    }
}
