//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters, so the
//! learning code never reaches for a process-wide generator.

pub mod randomness;

pub use randomness::RandomSource;
