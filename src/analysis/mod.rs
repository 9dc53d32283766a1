//! Analysis of generated levels

/// Spawn gate rates and their binomial consistency checks
pub mod statistics;
