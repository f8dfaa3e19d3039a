//! Configuration and policy error definitions.
//!
//! This module defines the error types reported by the replacement policy. It provides:
//! 1. **Configuration Errors:** Problems detected once, when a policy is constructed.
//! 2. **Policy Errors:** Failures of an individual operation on an already-built policy.
//!
//! A driver calling `get_victim` with no candidates is a driver bug and panics
//! instead of producing an error value.

use thiserror::Error;

/// Errors raised while validating a [`PolicyConfig`](crate::config::PolicyConfig)
/// or a [`PromotionTable`](crate::cache::PromotionTable).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The associativity was zero; a set needs at least one way.
    #[error("associativity must be at least 1 way")]
    ZeroWays,

    /// The set count was zero.
    #[error("cache must have at least 1 set")]
    ZeroSets,

    /// `sets * ways` does not fit in the address space.
    #[error("{sets} sets x {ways} ways overflows the slot count")]
    TooManySlots {
        /// Configured set count.
        sets: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// The promotion table does not hold exactly one entry per way plus the
    /// cold-insertion entry.
    #[error("promotion table for {ways} ways needs {expected} entries, got {actual}")]
    TableLength {
        /// Configured associativity.
        ways: usize,
        /// Required table length (`ways + 1`).
        expected: usize,
        /// Length of the supplied table.
        actual: usize,
    },

    /// A promotion table entry names a rank outside the recency stack.
    #[error("promotion table class {class} maps to rank {rank}, which is not below {ways}")]
    RankOutOfRange {
        /// Insertion class (table index) holding the bad entry.
        class: usize,
        /// The offending rank.
        rank: u64,
        /// Configured associativity.
        ways: usize,
    },

    /// The configuration document could not be parsed.
    #[error("invalid policy configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by policy operations after construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Every way-slot of every configured set already has a line handle.
    #[error("all {sets} sets x {ways} ways are already instantiated")]
    SetsExhausted {
        /// Configured set count.
        sets: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// Internal rank-store invariant violated; carries a description.
    #[error("rank store invariant violated: {0}")]
    Invariant(String),
}
