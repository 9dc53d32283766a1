//! Spatial data structures for the generated level
//!
//! This module contains:
//! - Grid and pixel coordinate types
//! - Tile records for the grid and off-grid layers
//! - The tilemap store and its collaborator queries

/// Grid and pixel coordinates
pub mod coordinates;
/// Coordinate-keyed tile store and neighborhood queries
pub mod tilemap;
/// Tile kinds, spawn kinds and tile records
pub mod tiles;

pub use coordinates::{GridCoordinate, PixelPosition, PixelRect};
pub use tilemap::Tilemap;
pub use tiles::{OffgridTile, SpawnKind, Tile, TileKind};
