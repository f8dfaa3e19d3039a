//! Insertion/Promotion Vector (IPV) Replacement Policy.
//!
//! A generalization of LRU. Every way of a set carries a rank, a position in a
//! recency stack where rank 0 is the most protected and the highest rank is the
//! next victim. Plain LRU inserts and promotes to rank 0; IPV instead looks the
//! target rank up in a [`PromotionTable`]:
//!
//! - On a fill, the new line enters at `table[ways]`.
//! - On a hit, the line in slot `s` moves to `table[s]`.
//!
//! In both cases every other way whose rank lies between the target rank and
//! the line's previous position is aged by one, preserving their relative order.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `reset()` / `touch()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(C) where C is the number of candidates
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Workloads whose reuse matches the tuned table (e.g. scans
//!   mixed with a hot working set, where low insertion priority avoids pollution)
//! - **Worst Case:** A table tuned for a different reuse pattern

use tracing::{debug, trace};

use super::ReplacementPolicy;
use crate::cache::{LineMeta, PromotionTable, RankStore, Replaceable};
use crate::common::{ConfigError, PolicyError};
use crate::config::PolicyConfig;

/// IPV Policy state.
#[derive(Debug, Clone)]
pub struct IpvPolicy {
    /// Rank vectors for every instantiated set.
    store: RankStore,
    /// Insertion/promotion ranks, validated against the associativity.
    table: PromotionTable,
}

impl IpvPolicy {
    /// Creates a new IPV policy from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry (`sets`, `ways`) and optional promotion table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry or the table is invalid.
    pub fn new(config: &PolicyConfig) -> Result<Self, ConfigError> {
        let table = config.promotion_table()?;
        Self::with_table(config.sets, table)
    }

    /// Creates a new IPV policy for `sets` sets using an already-validated table.
    ///
    /// The associativity is taken from the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSets`] if `sets` is zero, or
    /// [`ConfigError::TooManySlots`] if `sets * ways` overflows.
    pub fn with_table(sets: usize, table: PromotionTable) -> Result<Self, ConfigError> {
        if sets == 0 {
            return Err(ConfigError::ZeroSets);
        }
        let store = RankStore::new(sets, table.ways())?;
        debug!(
            sets,
            ways = table.ways(),
            insertion_rank = table.insertion_rank(),
            "IPV replacement policy configured"
        );
        Ok(Self { store, table })
    }

    /// Instantiates every remaining way-slot, grouped by set.
    ///
    /// Equivalent to calling [`instantiate`](ReplacementPolicy::instantiate)
    /// until the configured sets are exhausted. The first group is partial if
    /// some lines of its set were already instantiated.
    pub fn instantiate_all(&mut self) -> Vec<Vec<LineMeta>> {
        let ways = self.table.ways();
        let mut sets: Vec<Vec<LineMeta>> = Vec::new();
        while let Ok(line) = self.store.instantiate() {
            if line.slot() == 0 || sets.is_empty() {
                sets.push(Vec::with_capacity(ways));
            }
            if let Some(group) = sets.last_mut() {
                group.push(line);
            }
        }
        sets
    }

    /// Promotion table in use.
    pub const fn table(&self) -> &PromotionTable {
        &self.table
    }

    /// Rank vector of `set`, or `None` if the set has no lines yet.
    pub fn ranks(&self, set: usize) -> Option<&[u64]> {
        self.store.row(set)
    }

    /// Current rank of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` was not issued by this policy.
    pub fn rank(&self, line: LineMeta) -> u64 {
        self.store.get(line)
    }

    /// Underlying rank store.
    pub const fn store(&self) -> &RankStore {
        &self.store
    }

    /// Verifies the rank store invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Invariant`] describing the first violation.
    pub fn check_invariants(&self) -> Result<(), PolicyError> {
        self.store.check_invariants()
    }
}

impl ReplacementPolicy for IpvPolicy {
    fn instantiate(&mut self) -> Result<LineMeta, PolicyError> {
        self.store.instantiate()
    }

    /// Inserts a cold line at `table[ways]`.
    ///
    /// Ways ranked in `[table[ways], ways)` are aged by one first.
    fn reset(&mut self, line: LineMeta) {
        let rank = self.table.insertion_rank();
        let aged = self.store.promote(line, rank, self.table.ways() as u64);
        trace!(set = line.set(), slot = line.slot(), rank, aged, "line inserted");
    }

    /// Promotes a hit line to `table[slot]`.
    ///
    /// Ways ranked in `[table[slot], old_rank)` are aged by one first. A line
    /// already at or above its promotion rank ages nothing.
    fn touch(&mut self, line: LineMeta) {
        let rank = self.table.promotion_rank(line.slot());
        let old_rank = self.store.get(line);
        let aged = self.store.promote(line, rank, old_rank);
        trace!(set = line.set(), slot = line.slot(), old_rank, rank, aged, "line promoted");
    }

    /// Returns the candidate with the strictly highest rank.
    ///
    /// Ties go to the candidate that appears first.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty or spans more than one set.
    fn get_victim<'a, E: Replaceable>(&self, candidates: &'a [E]) -> &'a E {
        let Some((first, rest)) = candidates.split_first() else {
            panic!("get_victim called with no replacement candidates");
        };
        debug_assert!(
            candidates.len() <= self.table.ways(),
            "{} candidates for a {}-way set",
            candidates.len(),
            self.table.ways()
        );

        let set = first.replacement_data().set();
        let mut victim = first;
        let mut max = self.store.get(first.replacement_data());
        for candidate in rest {
            let line = candidate.replacement_data();
            assert_eq!(line.set(), set, "victim candidates span several sets");
            let rank = self.store.get(line);
            if rank > max {
                max = rank;
                victim = candidate;
            }
        }
        trace!(set, slot = victim.replacement_data().slot(), rank = max, "victim selected");
        victim
    }

    /// Leaves the ranks untouched.
    ///
    /// The invalidated line keeps its last rank, so a stale high-ranked line
    /// stays a likely victim for the next fill.
    fn invalidate(&mut self, line: LineMeta) {
        trace!(set = line.set(), slot = line.slot(), "line invalidated");
    }
}
