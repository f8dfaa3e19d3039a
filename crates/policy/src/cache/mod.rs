//! Replacement state for a set-associative cache.
//!
//! This module holds the pieces the replacement policy is built from. The cache
//! array, tag storage and set indexing belong to the driver; this side only
//! tracks per-way ranks and decides victims. It provides:
//! 1. **Line Handles:** [`LineMeta`], the `(set, slot)` handle a driver keeps per line.
//! 2. **Rank Store:** [`RankStore`], the arena of per-set rank vectors.
//! 3. **Promotion Table:** [`PromotionTable`], the validated insertion/promotion vector.
//! 4. **Policies:** the [`ReplacementPolicy`](policies::ReplacementPolicy) trait and its IPV implementation.

/// Cache replacement policy implementations.
pub mod policies;

/// Arena of per-set rank vectors.
pub mod rank;

/// Insertion/Promotion Vector table.
pub mod table;

pub use rank::RankStore;
pub use table::PromotionTable;

/// Replacement metadata for one physical way-slot.
///
/// Issued by [`ReplacementPolicy::instantiate`](policies::ReplacementPolicy::instantiate)
/// in creation order and handed back by the driver on every access to that line.
/// It names the slot only; the ranks themselves stay in the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineMeta {
    set: usize,
    slot: usize,
}

impl LineMeta {
    pub(crate) const fn new(set: usize, slot: usize) -> Self {
        Self { set, slot }
    }

    /// Set this line belongs to.
    pub const fn set(self) -> usize {
        self.set
    }

    /// Way-slot within the set; also the line's promotion class.
    pub const fn slot(self) -> usize {
        self.slot
    }
}

/// A driver-side cache entry that carries replacement metadata.
///
/// Implement this for the driver's line type so victim selection can return
/// the entry itself rather than a bare handle.
pub trait Replaceable {
    /// Replacement metadata of this entry.
    fn replacement_data(&self) -> LineMeta;
}

impl Replaceable for LineMeta {
    fn replacement_data(&self) -> LineMeta {
        *self
    }
}

impl<T: Replaceable + ?Sized> Replaceable for &T {
    fn replacement_data(&self) -> LineMeta {
        (**self).replacement_data()
    }
}
