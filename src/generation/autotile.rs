//! Bitmask autotiling for grid tiles and off-grid clumps
//!
//! Each auto-tiled tile looks at its neighbors and records two masks: the
//! directions holding a tile of the same kind, and the directions holding no
//! tile at all. A neighbor of a different kind sets neither bit. The cardinal
//! part of the first mask selects an edge variant; the full 8-direction
//! masks detect the two concave corners.

use std::collections::HashSet;

use log::debug;

use crate::spatial::coordinates::{GridCoordinate, PixelPosition};
use crate::spatial::tilemap::Tilemap;
use crate::spatial::tiles::{OffgridTile, TileKind};

/// Neighbor to the left
pub const LEFT: u8 = 1;
/// Neighbor above
pub const UP: u8 = 2;
/// Neighbor below
pub const DOWN: u8 = 4;
/// Neighbor to the right
pub const RIGHT: u8 = 8;
/// Diagonal neighbor up and left
pub const UP_LEFT: u8 = 16;
/// Diagonal neighbor up and right
pub const UP_RIGHT: u8 = 32;
/// Diagonal neighbor down and left
pub const DOWN_LEFT: u8 = 64;
/// Diagonal neighbor down and right
pub const DOWN_RIGHT: u8 = 128;

const CARDINALS: u8 = LEFT | UP | DOWN | RIGHT;

/// Concave corner opening to the upper left
pub const CORNER_UP_LEFT_VARIANT: u8 = 9;
/// Concave corner opening to the upper right
pub const CORNER_UP_RIGHT_VARIANT: u8 = 10;
/// Variant of any tile sitting under water
pub const SUBMERGED_VARIANT: u8 = 3;

const DIRECTIONS: [(u8, i32, i32); 8] = [
    (LEFT, -1, 0),
    (UP, 0, -1),
    (DOWN, 0, 1),
    (RIGHT, 1, 0),
    (UP_LEFT, -1, -1),
    (UP_RIGHT, 1, -1),
    (DOWN_LEFT, -1, 1),
    (DOWN_RIGHT, 1, 1),
];

// Cardinal same-kind masks with a drawn edge variant
const BASE_VARIANTS: [(u8, u8); 13] = [
    (RIGHT | DOWN, 0),
    (RIGHT | DOWN | LEFT, 1),
    (LEFT | DOWN, 2),
    (LEFT | UP | DOWN, 3),
    (LEFT | UP, 4),
    (LEFT | UP | RIGHT, 5),
    (RIGHT | UP, 6),
    (RIGHT | UP | DOWN, 7),
    (CARDINALS, 8),
    (RIGHT | LEFT, 1),
    (LEFT, 2),
    (UP | DOWN, 3),
    (UP, 5),
];

/// Same-kind and empty neighbor directions of one tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborMask {
    /// Directions holding a tile of the same kind
    pub present: u8,
    /// Directions holding no tile
    pub empty: u8,
}

impl NeighborMask {
    /// Classify the eight neighbors of `at` against `kind`
    pub fn around(tilemap: &Tilemap, at: GridCoordinate, kind: TileKind) -> Self {
        DIRECTIONS
            .iter()
            .fold(Self::default(), |mut mask, &(bit, dx, dy)| {
                match tilemap.kind_at(at.offset(dx, dy)) {
                    Some(neighbor) if neighbor == kind => mask.present |= bit,
                    Some(_) => {}
                    None => mask.empty |= bit,
                }
                mask
            })
    }
}

/// Edge variant for a cardinal same-kind mask
///
/// Diagonal bits are ignored. Returns `None` for masks without a drawn
/// variant, such as an isolated tile or one with only a right neighbor.
pub fn base_variant(present: u8) -> Option<u8> {
    let cardinal = present & CARDINALS;
    BASE_VARIANTS
        .iter()
        .find(|&&(mask, _)| mask == cardinal)
        .map(|&(_, variant)| variant)
}

/// Variant for a tile given its full masks and current variant
///
/// The concave corners override the edge lookup when every neighbor but one
/// upper diagonal matches and that diagonal cell is empty.
pub fn resolve_variant(mask: NeighborMask, current: u8) -> u8 {
    let corner = |missing: u8| mask.present == !missing && mask.empty == missing;

    if corner(UP_LEFT) {
        CORNER_UP_LEFT_VARIANT
    } else if corner(UP_RIGHT) {
        CORNER_UP_RIGHT_VARIANT
    } else {
        base_variant(mask.present).unwrap_or(current)
    }
}

/// Recompute variants of every grid tile from its neighbors
///
/// All variants are computed against the unmodified map and applied in a
/// second step. Any tile other than a spawnpoint with water directly above
/// becomes [`SUBMERGED_VARIANT`].
pub fn autotile_grid(tilemap: &mut Tilemap) {
    let view: &Tilemap = tilemap;
    let updates: Vec<(GridCoordinate, u8)> = view
        .tiles()
        .filter_map(|tile| {
            let mut variant = tile.variant;
            if tile.kind.is_autotiled() {
                let mask = NeighborMask::around(view, tile.pos, tile.kind);
                variant = resolve_variant(mask, variant);
            }
            if tile.kind != TileKind::Spawnpoint && view.is_water(tile.pos.above()) {
                variant = SUBMERGED_VARIANT;
            }
            (variant != tile.variant).then_some((tile.pos, variant))
        })
        .collect();

    debug!("autotiled grid: {} variants changed", updates.len());
    for (pos, variant) in updates {
        if let Some(tile) = tilemap.get_mut(pos) {
            tile.variant = variant;
        }
    }
}

/// Stitch off-grid clumps of auto-tiled kinds into continuous shapes
///
/// Neighbors are other off-grid tiles of the same kind exactly one tile away
/// along a cardinal direction. Auto-tiled tiles are then moved to the front of
/// the sequence in reverse order so they draw behind everything else.
pub fn autotile_offgrid(tilemap: &mut Tilemap) {
    let (mut clumps, others): (Vec<OffgridTile>, Vec<OffgridTile>) = tilemap
        .offgrid()
        .iter()
        .partition(|tile| tile.kind.is_autotiled());

    let positions: HashSet<(TileKind, PixelPosition)> =
        clumps.iter().map(|tile| (tile.kind, tile.pos)).collect();

    for tile in &mut clumps {
        let present = DIRECTIONS
            .iter()
            .filter(|&&(bit, dx, dy)| {
                bit & CARDINALS != 0
                    && positions.contains(&(tile.kind, tile.pos.offset_tiles(dx, dy)))
            })
            .fold(0, |mask, &(bit, _, _)| mask | bit);
        if let Some(variant) = base_variant(present) {
            tile.variant = variant;
        }
    }

    debug!("autotiled {} off-grid clump tiles", clumps.len());
    clumps.reverse();
    clumps.extend(others);
    tilemap.replace_offgrid(clumps);
}

/// Autotile the grid, then the off-grid layer
pub fn autotile(tilemap: &mut Tilemap) {
    autotile_grid(tilemap);
    autotile_offgrid(tilemap);
}
