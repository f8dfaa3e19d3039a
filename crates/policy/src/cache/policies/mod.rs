//! Cache Replacement Policies.
//!
//! Implements algorithms for selecting victim lines in set-associative caches.
//!
//! # Policies
//!
//! - `Ipv`: Insertion/Promotion Vector, a table-driven generalization of LRU.

/// Insertion/Promotion Vector replacement policy.
pub mod ipv;

pub use ipv::IpvPolicy;

use super::{LineMeta, Replaceable};
use crate::common::PolicyError;

/// Trait for cache replacement policies.
///
/// The driver calls exactly one of these per access outcome, always passing a
/// handle previously returned by [`instantiate`](ReplacementPolicy::instantiate).
/// The driver serializes all calls for a given set.
pub trait ReplacementPolicy: Send + Sync {
    /// Creates the replacement metadata for the next physical way-slot.
    ///
    /// Called once per slot at cache construction, in a fixed order.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::SetsExhausted`] once every configured slot has
    /// metadata.
    fn instantiate(&mut self) -> Result<LineMeta, PolicyError>;

    /// Updates the policy state when a line is filled after a miss.
    ///
    /// # Arguments
    ///
    /// * `line` - Metadata of the way that received the new line.
    fn reset(&mut self, line: LineMeta);

    /// Updates the policy state when a line is hit.
    ///
    /// # Arguments
    ///
    /// * `line` - Metadata of the way that was hit.
    fn touch(&mut self, line: LineMeta);

    /// Selects a victim line to evict.
    ///
    /// # Arguments
    ///
    /// * `candidates` - Eviction candidates, all from the same set.
    ///
    /// # Returns
    ///
    /// A reference to the chosen entry of `candidates`.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty or spans more than one set.
    fn get_victim<'a, E: Replaceable>(&self, candidates: &'a [E]) -> &'a E;

    /// Updates the policy state when a line is invalidated.
    ///
    /// # Arguments
    ///
    /// * `line` - Metadata of the way that was invalidated.
    fn invalidate(&mut self, line: LineMeta);
}
