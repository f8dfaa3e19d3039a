//! Insertion/Promotion Vector (IPV) table.
//!
//! The table maps an insertion class to the rank a line receives. For a cache
//! with `W` ways it holds `W + 1` entries:
//!
//! - `table[slot]` for `slot < W` is the rank given to the line in `slot`
//!   when it is touched (a hit).
//! - `table[W]` is the rank given to a freshly filled (cold) line.
//!
//! Ranks are positions in a `W`-deep recency stack, so every entry must be
//! below `W`. An all-zero table degenerates to classic LRU.

use crate::common::ConfigError;

/// Validated, immutable promotion table for one associativity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionTable {
    ways: usize,
    entries: Box<[u64]>,
}

impl PromotionTable {
    /// Built-in table for a 16-way cache; index 16 is the cold-insertion rank.
    pub const DEFAULT_16_WAY: [u64; 17] = [0, 0, 1, 0, 3, 0, 1, 0, 1, 7, 5, 1, 0, 0, 1, 11, 14];

    /// Validates `entries` against the associativity and builds the table.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `entries` - Exactly `ways + 1` ranks, each below `ways`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroWays`] if `ways` is zero.
    /// - [`ConfigError::TableLength`] if `entries.len() != ways + 1`.
    /// - [`ConfigError::RankOutOfRange`] if any entry is `>= ways`.
    pub fn new(ways: usize, entries: Vec<u64>) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        let expected = ways + 1;
        if entries.len() != expected {
            return Err(ConfigError::TableLength {
                ways,
                expected,
                actual: entries.len(),
            });
        }
        if let Some((class, &rank)) = entries
            .iter()
            .enumerate()
            .find(|&(_, &rank)| rank >= ways as u64)
        {
            return Err(ConfigError::RankOutOfRange { class, rank, ways });
        }
        Ok(Self {
            ways,
            entries: entries.into_boxed_slice(),
        })
    }

    /// Builds the all-zero table: insert and promote to rank 0, i.e. plain LRU.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWays`] if `ways` is zero.
    pub fn lru(ways: usize) -> Result<Self, ConfigError> {
        Self::new(ways, vec![0; ways + 1])
    }

    /// Associativity this table was validated for.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Rank assigned to a line on a cold fill (`table[ways]`).
    pub fn insertion_rank(&self) -> u64 {
        self.entries[self.ways]
    }

    /// Rank assigned when the line occupying `slot` is touched (`table[slot]`).
    ///
    /// # Panics
    ///
    /// Panics if `slot >= ways`.
    pub fn promotion_rank(&self, slot: usize) -> u64 {
        assert!(slot < self.ways, "slot {slot} outside a {}-way table", self.ways);
        self.entries[slot]
    }

    /// All `ways + 1` entries in class order.
    pub fn as_slice(&self) -> &[u64] {
        &self.entries
    }
}

impl Default for PromotionTable {
    fn default() -> Self {
        Self {
            ways: Self::DEFAULT_16_WAY.len() - 1,
            entries: Box::new(Self::DEFAULT_16_WAY),
        }
    }
}
