//! Insertion/Promotion Vector (IPV) cache replacement policy.
//!
//! This crate implements a pluggable replacement policy for set-associative
//! cache models with the following:
//! 1. **Rank Store:** One rank vector per set, one rank per way, in a flat arena.
//! 2. **Promotion Table:** A validated table giving the rank for each insertion class.
//! 3. **Policy:** `instantiate`, `reset`, `touch`, `get_victim` and `invalidate`,
//!    driven by an external cache model.
//! 4. **Configuration:** Geometry and table, with defaults and JSON loading.
//!
//! # Example
//!
//! ```
//! use ipv_policy::cache::policies::{IpvPolicy, ReplacementPolicy};
//! use ipv_policy::config::PolicyConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PolicyConfig::new(1, 4, vec![0, 1, 2, 1, 3]);
//! let mut policy = IpvPolicy::new(&config)?;
//! let lines = policy.instantiate_all();
//! let set = &lines[0];
//!
//! policy.reset(set[0]);
//! policy.reset(set[1]);
//! assert_eq!(policy.ranks(0), Some(&[4, 3, 0, 0][..]));
//! assert_eq!(policy.get_victim(set), &set[0]);
//! # Ok(())
//! # }
//! ```

/// Line handles, rank storage, promotion table and policies.
pub mod cache;
/// Error types.
pub mod common;
/// Policy configuration (defaults, JSON loading, validation).
pub mod config;

/// Main policy type; construct with `IpvPolicy::new`.
pub use crate::cache::policies::IpvPolicy;
/// Driver-facing policy interface.
pub use crate::cache::policies::ReplacementPolicy;
/// Per-line replacement metadata handle.
pub use crate::cache::LineMeta;
/// Configuration type; use `PolicyConfig::default()` or `PolicyConfig::from_json`.
pub use crate::config::PolicyConfig;
