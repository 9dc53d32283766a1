//! Decoration scattering on the off-grid layer
//!
//! Background pieces are pushed before foreground pieces because the
//! off-grid sequence is also the draw order.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::generation::heightmap::HeightProfile;
use crate::generation::spawnpoints::{FlatRun, is_flat_run};
use crate::io::configuration::DEPTH_FLOOR;
use crate::math::probability::one_in;
use crate::spatial::coordinates::{GridCoordinate, PixelPosition};
use crate::spatial::tilemap::Tilemap;
use crate::spatial::tiles::{OffgridTile, TileKind};

const TREE_FIRST_COLUMN: usize = 10;
const TREE_RIGHT_MARGIN: usize = 15;
const TREE_COOLDOWN: u32 = 15;
const TREE_JITTER: RangeInclusive<i32> = 1..=5;
/// Pixels between a tree sprite's top edge and the surface it stands on
const TREE_RISE_PX: i32 = 147;

const OVERHANG_FIRST_INDEX: usize = 10;
const OVERHANG_TAIL: usize = 15;
/// Only undersides above this row grow foliage
const OVERHANG_MAX_ROW: i32 = -2;
const OVERHANG_JITTER: RangeInclusive<i32> = -2..=2;
const SHORT_VINE_LIFT_PX: i32 = 5;

const CLUMP_FIRST_INDEX: usize = 20;
const CLUMP_TAIL: usize = 10;
const CLUMP_ONE_IN: u32 = 11;
const CLUMP_WIDTH: RangeInclusive<i32> = 2..=6;
const CLUMP_HEIGHT: RangeInclusive<i32> = 2..=4;
/// Rows above and below the top row where a clump may be anchored
const CLUMP_ROWS_ABOVE: i32 = 1;
const CLUMP_ROWS_BELOW: i32 = 15;
const CLUMP_VARIANT: u8 = 1;

const DECOR_JITTER: RangeInclusive<i32> = 1..=3;
const GRASS_DECOR: RangeInclusive<u8> = 0..=7;
const STONE_DECOR: RangeInclusive<u8> = 8..=11;
const GRASSY_STONE_DECOR: [u8; 6] = [11, 12, 13, 14, 6, 7];

/// Whether `at` has an open underside and `length` occupied cells from it to the right
///
/// Undersides on the depth floor never count.
fn has_flat_bottom(occupied: &BTreeSet<GridCoordinate>, at: GridCoordinate, length: i32) -> bool {
    at.y != DEPTH_FLOOR
        && !occupied.contains(&at.below())
        && (0..length).all(|dx| occupied.contains(&at.offset(dx, 0)))
}

fn place_trees<R: Rng + ?Sized>(
    profile: &HeightProfile,
    tilemap: &mut Tilemap,
    rng: &mut R,
) -> usize {
    let mut cooldown = 0_u32;
    let mut trees = Vec::new();
    let last = profile.width().saturating_sub(TREE_RIGHT_MARGIN);

    for surface in (TREE_FIRST_COLUMN..last).filter_map(|x| profile.surface(x)) {
        if cooldown == 0 && is_flat_run(tilemap, surface, FlatRun::Four) && one_in(rng, 2) {
            let corner = surface.to_pixel();
            let pos = PixelPosition::new(
                corner.x + rng.random_range(TREE_JITTER),
                corner.y - TREE_RISE_PX,
            );
            trees.push(OffgridTile::new(TileKind::BgFoliage, 0, pos));
            cooldown = TREE_COOLDOWN;
        }
        cooldown = cooldown.saturating_sub(1);
    }

    let placed = trees.len();
    for tree in trees {
        tilemap.push_offgrid(tree);
    }
    placed
}

fn place_overhangs<R: Rng + ?Sized>(tilemap: &mut Tilemap, rng: &mut R) -> usize {
    let occupied: BTreeSet<GridCoordinate> = tilemap.coordinates().collect();
    let sorted: Vec<GridCoordinate> = occupied.iter().copied().collect();
    let last = sorted.len().saturating_sub(OVERHANG_TAIL);
    let mut vines = Vec::new();

    for &at in sorted.get(OVERHANG_FIRST_INDEX..last).unwrap_or_default() {
        if at.y >= OVERHANG_MAX_ROW {
            continue;
        }
        let underside = at.below().to_pixel();
        if has_flat_bottom(&occupied, at, 3) && one_in(rng, 5) {
            let pos = PixelPosition::new(
                underside.x + rng.random_range(OVERHANG_JITTER),
                underside.y - SHORT_VINE_LIFT_PX,
            );
            vines.push(OffgridTile::new(TileKind::BgFoliage, rng.random_range(1..=3), pos));
        } else if has_flat_bottom(&occupied, at, 4) && one_in(rng, 8) {
            let pos =
                PixelPosition::new(underside.x + rng.random_range(OVERHANG_JITTER), underside.y);
            vines.push(OffgridTile::new(TileKind::BgFoliage, rng.random_range(4..=5), pos));
        }
    }

    let placed = vines.len();
    for vine in vines {
        tilemap.push_offgrid(vine);
    }
    placed
}

fn place_grass_clumps<R: Rng + ?Sized>(tilemap: &mut Tilemap, rng: &mut R) -> usize {
    let Some(top) = tilemap.top_row() else {
        return 0;
    };
    let columns: Vec<i32> = tilemap
        .coordinates()
        .map(|coord| coord.x)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let last = columns.len().saturating_sub(CLUMP_TAIL);

    let mut width = rng.random_range(CLUMP_WIDTH);
    let mut height = rng.random_range(CLUMP_HEIGHT);
    let mut clumps = 0;
    let mut cells = Vec::new();

    for &x in columns.get(CLUMP_FIRST_INDEX..last).unwrap_or_default() {
        let row = rng.random_range(top - CLUMP_ROWS_ABOVE..=top + CLUMP_ROWS_BELOW);
        if !one_in(rng, CLUMP_ONE_IN) {
            continue;
        }

        let anchor = GridCoordinate::new(x, row).to_pixel();
        for dx in 0..width {
            for dy in 0..height {
                let pos = anchor.offset_tiles(dx, -dy);
                cells.push(OffgridTile::new(TileKind::BgGrass, CLUMP_VARIANT, pos));
            }
        }
        clumps += 1;
        width = rng.random_range(CLUMP_WIDTH);
        height = rng.random_range(CLUMP_HEIGHT);
    }

    for cell in cells {
        tilemap.push_offgrid(cell);
    }
    clumps
}

/// Scatter background trees, overhang foliage and grass clumps
///
/// Trees stand on flat-4 surface columns in `[10, W - 15)` behind a 15-tick
/// cooldown. Overhang foliage hangs under open undersides high above the
/// floor. Grass clumps are rectangular `BgGrass` blocks anchored near the top
/// row and stitched together later by the autotiler.
pub fn place_background<R: Rng + ?Sized>(
    profile: &HeightProfile,
    tilemap: &mut Tilemap,
    rng: &mut R,
) {
    let trees = place_trees(profile, tilemap, rng);
    let vines = place_overhangs(tilemap, rng);
    let clumps = place_grass_clumps(tilemap, rng);
    debug!("background decoration: {trees} trees, {vines} vines, {clumps} grass clumps");
}

/// Decoration variants and gate for a surface material
fn decor_for<R: Rng + ?Sized>(kind: TileKind, rng: &mut R) -> Option<u8> {
    match kind {
        TileKind::Grass => one_in(rng, 3).then(|| rng.random_range(GRASS_DECOR)),
        TileKind::Stone => one_in(rng, 4).then(|| rng.random_range(STONE_DECOR)),
        TileKind::GrassyStone => one_in(rng, 5)
            .then(|| GRASSY_STONE_DECOR.choose(rng).copied())
            .flatten(),
        _ => None,
    }
}

/// Attach small decorations to solid tiles with open space above
///
/// Each decoration sits one tile up with a 1 to 3 pixel horizontal jitter.
pub fn place_foreground<R: Rng + ?Sized>(tilemap: &mut Tilemap, rng: &mut R) {
    let exposed: Vec<(TileKind, GridCoordinate)> = tilemap
        .tiles()
        .filter(|tile| tile.kind.is_solid() && !tilemap.contains(tile.pos.above()))
        .map(|tile| (tile.kind, tile.pos))
        .collect();

    let mut decor = Vec::new();
    for (kind, at) in exposed {
        if let Some(variant) = decor_for(kind, rng) {
            let corner = at.above().to_pixel();
            let pos = PixelPosition::new(corner.x + rng.random_range(DECOR_JITTER), corner.y);
            decor.push(OffgridTile::new(TileKind::Decor, variant, pos));
        }
    }

    debug!("foreground decoration: {} pieces", decor.len());
    for piece in decor {
        tilemap.push_offgrid(piece);
    }
}

/// Run both decoration passes, background first
pub fn decorate<R: Rng + ?Sized>(profile: &HeightProfile, tilemap: &mut Tilemap, rng: &mut R) {
    place_background(profile, tilemap, rng);
    place_foreground(tilemap, rng);
}

