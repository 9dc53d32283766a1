//! Procedural 2D platformer level generation
//!
//! A level is built from a one-row slice of Perlin noise: the heights are
//! smoothed into walkable plateaus, typed with materials and water, filled
//! down to a fixed floor, then given floating platforms, spawnpoints,
//! decorations and autotiled variants. The result is a [`spatial::Tilemap`]
//! that external collaborators query for collisions and consume spawnpoints
//! from.

#![forbid(unsafe_code)]

/// Spawn statistics across generated levels
pub mod analysis;
/// Generation passes and the pipeline that orders them
pub mod generation;
/// Input/output operations and error handling
pub mod io;
/// Probability gates and binomial approximations
pub mod math;
/// Coordinates, tiles and the tilemap store
pub mod spatial;

pub use io::error::{MapError, Result};
