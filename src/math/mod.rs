//! Mathematical utilities for the generation passes

/// Probability gates, weighted draws and binomial tail approximations
pub mod probability;
