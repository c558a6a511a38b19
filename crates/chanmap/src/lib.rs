//! ## Crate layout
//! - `core`: map file parser, typed values, indexes, and the query surface.
//! - `error`: public error type with a stable class taxonomy.
//! - `tool`: host-facing service trait and its config-driven construction.
//!
//! The `prelude` module mirrors what a host needs to load a map and run
//! lookups against it.

pub use chanmap_core as core;

pub mod error;
pub mod tool;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            config::{DuplicateKeyPolicy, LoadConfig},
            map::ChannelMap,
            query::{DetectorElements, Record},
            value::{Value, ValueKind},
        },
        error::Error,
        tool::{ChannelMapTool, ToolConfig},
    };
}
