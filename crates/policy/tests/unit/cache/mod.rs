//! Tests for the `cache` module.



/// Randomized properties over arbitrary tables and operation sequences.
pub mod properties;
