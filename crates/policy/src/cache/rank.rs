//! Per-set rank storage.
//!
//! Ranks for every way of every set live in one flat arena, row-major by set:
//! the rank of `(set, slot)` is at `set * ways + slot`. A row is materialized
//! (all zero) the first time a line of that set is instantiated, so the arena
//! grows in steps of `ways` as the driver hands out handles.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `instantiate()`: amortized O(1), O(W) when a new row is created
//!   - `promote()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(S × W) where S is the number of sets

use tracing::trace;

use super::LineMeta;
use crate::common::{ConfigError, PolicyError};

/// Arena of rank vectors, one row of `ways` ranks per instantiated set.
#[derive(Debug, Clone)]
pub struct RankStore {
    ranks: Vec<u64>,
    sets: usize,
    ways: usize,
    /// `sets * ways`, the number of handles that may be issued.
    slots: usize,
    /// Number of line handles issued so far; the creation-order cursor.
    issued: usize,
}

impl RankStore {
    /// Creates an empty store for `sets` sets of `ways` ways.
    ///
    /// No rows exist until the first line of a set is instantiated. The
    /// associativity must already be validated (`ways >= 1`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooManySlots`] if `sets * ways` overflows.
    pub(crate) fn new(sets: usize, ways: usize) -> Result<Self, ConfigError> {
        let slots = sets
            .checked_mul(ways)
            .ok_or(ConfigError::TooManySlots { sets, ways })?;
        Ok(Self {
            ranks: Vec::new(),
            sets,
            ways,
            slots,
            issued: 0,
        })
    }

    /// Issues the handle for the next way-slot in creation order.
    ///
    /// Slots are assigned `0..ways` within a set, then the next set begins.
    /// The first handle of a set creates that set's all-zero row.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::SetsExhausted`] once every slot of every set has
    /// been issued.
    pub(crate) fn instantiate(&mut self) -> Result<LineMeta, PolicyError> {
        if self.issued == self.slots {
            return Err(PolicyError::SetsExhausted {
                sets: self.sets,
                ways: self.ways,
            });
        }
        let set = self.issued / self.ways;
        let slot = self.issued % self.ways;
        if slot == 0 {
            self.ranks.resize(self.ranks.len() + self.ways, 0);
            trace!(set, ways = self.ways, "rank vector created");
        }
        self.issued += 1;
        Ok(LineMeta::new(set, slot))
    }

    /// Number of sets the store was sized for.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Number of ways per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of line handles issued so far.
    pub const fn issued(&self) -> usize {
        self.issued
    }

    /// Rank vector of `set`, or `None` if no line of that set exists yet.
    pub fn row(&self, set: usize) -> Option<&[u64]> {
        let start = set.checked_mul(self.ways)?;
        self.ranks.get(start..start.checked_add(self.ways)?)
    }

    /// Current rank of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` was not issued by this store.
    pub fn get(&self, line: LineMeta) -> u64 {
        self.ranks[self.index(line)]
    }

    /// Moves `line` to `rank`, first aging every way of its set whose rank lies
    /// in `[rank, ceiling)` by one.
    ///
    /// Returns the number of ways aged (the target itself included when its
    /// old rank was in range).
    ///
    /// # Panics
    ///
    /// Panics if `line` was not issued by this store.
    pub(crate) fn promote(&mut self, line: LineMeta, rank: u64, ceiling: u64) -> usize {
        let start = line.set() * self.ways;
        let row = &mut self.ranks[start..start + self.ways];
        let aged = age_range(row, rank, ceiling);
        row[line.slot()] = rank;
        aged
    }

    /// Verifies row geometry and the rank bound.
    ///
    /// Every materialized row must be complete and hold ranks no greater than
    /// `ways`, and no more handles than slots may have been issued.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Invariant`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), PolicyError> {
        if self.issued > self.slots {
            return Err(PolicyError::Invariant(format!(
                "{} handles issued for {} slots",
                self.issued, self.slots
            )));
        }
        let rows = self.issued.div_ceil(self.ways);
        if self.ranks.len() != rows * self.ways {
            return Err(PolicyError::Invariant(format!(
                "arena holds {} ranks, expected {} rows of {}",
                self.ranks.len(),
                rows,
                self.ways
            )));
        }
        let bound = self.ways as u64;
        if let Some(pos) = self.ranks.iter().position(|&r| r > bound) {
            return Err(PolicyError::Invariant(format!(
                "set {} slot {} has rank {} above {bound}",
                pos / self.ways,
                pos % self.ways,
                self.ranks[pos]
            )));
        }
        Ok(())
    }

    fn index(&self, line: LineMeta) -> usize {
        debug_assert!(line.slot() < self.ways, "slot {} in a {}-way store", line.slot(), self.ways);
        line.set() * self.ways + line.slot()
    }
}

/// Increments every rank in `[floor, ceiling)`; returns how many changed.
fn age_range(row: &mut [u64], floor: u64, ceiling: u64) -> usize {
    let mut aged = 0;
    for rank in row.iter_mut().filter(|r| (floor..ceiling).contains(&**r)) {
        *rank += 1;
        aged += 1;
    }
    aged
}
