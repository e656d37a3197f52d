//! Bridge configuration.
//!
//! Hosts embed these knobs in their own configuration files; everything
//! has a serde default so a partial (or empty) table parses.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ORPHAN_CAPACITY;

/// Tuning knobs for the bridge and its consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// How many parentless trace children the forest parks before
    /// promoting the oldest to a root.
    #[serde(default = "default_orphan_capacity")]
    pub orphan_capacity: usize,
    /// Emit a `log::debug!` line for every routed envelope. Off by
    /// default; useful when debugging a transport integration.
    #[serde(default)]
    pub log_routing: bool,
}

fn default_orphan_capacity() -> usize {
    DEFAULT_ORPHAN_CAPACITY
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            orphan_capacity: DEFAULT_ORPHAN_CAPACITY,
            log_routing: false,
        }
    }
}
