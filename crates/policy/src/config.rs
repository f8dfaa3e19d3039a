//! Configuration for the IPV replacement policy.
//!
//! This module defines the construction-time parameters of the policy. It provides:
//! 1. **Defaults:** Baseline geometry and the built-in 16-way promotion table.
//! 2. **Structure:** [`PolicyConfig`], deserializable from JSON.
//! 3. **Validation:** Conversion into a checked [`PromotionTable`].
//!
//! A configuration document looks like:
//!
//! ```json
//! { "sets": 64, "ways": 16, "ipv": [0,0,1,0,3,0,1,0,1,7,5,1,0,0,1,11,14] }
//! ```
//!
//! Every field is optional. Without `ipv`, the built-in 16-way table is used.

use serde::Deserialize;

use crate::cache::PromotionTable;
use crate::common::ConfigError;

/// Default configuration constants for the policy.
mod defaults {
    /// Default number of sets (a single set).
    pub const SETS: usize = 1;

    /// Default associativity, matching the built-in promotion table.
    pub const WAYS: usize = 16;
}

/// Replacement policy configuration.
///
/// Holds the cache geometry the policy manages and, optionally, a custom
/// insertion/promotion vector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Number of sets whose ranks the policy tracks.
    #[serde(default = "PolicyConfig::default_sets")]
    pub sets: usize,

    /// Associativity (number of ways per set).
    #[serde(default = "PolicyConfig::default_ways")]
    pub ways: usize,

    /// Insertion/promotion vector of `ways + 1` entries; `None` selects the
    /// built-in 16-way table.
    #[serde(default)]
    pub ipv: Option<Vec<u64>>,
}

impl PolicyConfig {
    /// Returns the default number of sets.
    fn default_sets() -> usize {
        defaults::SETS
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Creates a configuration with an explicit geometry and table.
    pub fn new(sets: usize, ways: usize, ipv: Vec<u64>) -> Self {
        Self {
            sets,
            ways,
            ipv: Some(ipv),
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed. The
    /// geometry itself is checked later, by [`PolicyConfig::promotion_table`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the geometry and builds the promotion table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSets`] for an empty cache,
    /// [`ConfigError::TooManySlots`] if `sets * ways` overflows, or any error
    /// produced by [`PromotionTable::new`] for the table itself.
    pub fn promotion_table(&self) -> Result<PromotionTable, ConfigError> {
        if self.sets == 0 {
            return Err(ConfigError::ZeroSets);
        }
        if self.sets.checked_mul(self.ways).is_none() {
            return Err(ConfigError::TooManySlots {
                sets: self.sets,
                ways: self.ways,
            });
        }
        match &self.ipv {
            Some(entries) => PromotionTable::new(self.ways, entries.clone()),
            None => PromotionTable::new(self.ways, PromotionTable::DEFAULT_16_WAY.to_vec()),
        }
    }
}

impl Default for PolicyConfig {
    /// Creates the default configuration.
    ///
    /// One 16-way set using the built-in promotion table.
    fn default() -> Self {
        Self {
            sets: defaults::SETS,
            ways: defaults::WAYS,
            ipv: None,
        }
    }
}
