//! Common types shared by the configuration layer and the policy engine.
//!
//! At the moment this is the error taxonomy: configuration errors reported at
//! construction time and policy errors reported by individual operations.

/// Error types for configuration and policy operations.
pub mod error;

pub use error::{ConfigError, PolicyError};
