//! Surface material typing and ground fill

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::generation::heightmap::HeightProfile;
use crate::io::configuration::DEPTH_FLOOR;
use crate::math::probability::one_in;
use crate::spatial::coordinates::GridCoordinate;
use crate::spatial::tilemap::Tilemap;
use crate::spatial::tiles::{Tile, TileKind};

/// Columns between armed material changes
pub const TYPE_CHANGE_PERIOD: usize = 30;

/// Columns inspected (inclusive) before flooding a basin
pub const WATER_LOOKAHEAD: usize = 11;

/// No material change or water run starts this close to a map edge
pub const EDGE_MARGIN: usize = 10;

/// Variant of filled ground and solid surface tiles
pub const GROUND_VARIANT: u8 = 1;

/// Water variant of the column that opens a run
pub const WATER_OPENING_VARIANT: u8 = 0;
/// Water variant inside a run
pub const WATER_BODY_VARIANT: u8 = 1;
/// Water variant where the run meets a height change
pub const WATER_SLOPE_VARIANT: u8 = 2;

/// Endless supply of solid materials that never repeats itself back to back
#[derive(Debug, Clone, Default)]
pub struct MaterialCycle {
    current: Option<TileKind>,
}

impl MaterialCycle {
    /// Start a cycle with no previous material
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Pick a solid material different from the last one returned
    pub fn next_material<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TileKind {
        let choices: Vec<TileKind> = TileKind::SOLID
            .iter()
            .copied()
            .filter(|&kind| Some(kind) != self.current)
            .collect();
        let material = choices.choose(rng).copied().unwrap_or(TileKind::Grass);
        self.current = Some(material);
        material
    }
}

#[derive(Debug, Clone, Copy)]
struct WaterRun {
    material_before: TileKind,
    length: usize,
}

/// Whether the lookahead from `start` rises before it falls
///
/// Scans the next [`WATER_LOOKAHEAD`] columns (inclusive) for the first
/// height change. A rise (smaller y) closes the basin; a fall or a window that
/// never changes does not. A window running past the map end never floods.
fn basin_closes(heights: &[i32], start: usize) -> bool {
    heights
        .get(start..start + WATER_LOOKAHEAD)
        .and_then(|window| {
            window.windows(2).find_map(|pair| match pair {
                [a, b] if a > b => Some(true),
                [a, b] if a < b => Some(false),
                _ => None,
            })
        })
        .unwrap_or(false)
}

/// Write one surface tile per column, choosing materials and water runs
///
/// Material changes are armed every [`TYPE_CHANGE_PERIOD`] columns and fire at
/// the next height change outside water. A water run opens on a flat column
/// below sea level (y > 0) that stepped down from its left neighbor, when a
/// fair coin passes and the basin closes ahead. It ends at the first column
/// that rises, which reverts to the material preceding the run.
pub fn type_surface<R: Rng + ?Sized>(profile: &HeightProfile, tilemap: &mut Tilemap, rng: &mut R) {
    let heights = profile.heights();
    let width = heights.len();

    let mut cycle = MaterialCycle::new();
    let mut material = cycle.next_material(rng);
    let mut change_armed = false;
    let mut water: Option<WaterRun> = None;
    let mut water_runs = 0_usize;

    for (x, &height) in heights.iter().enumerate() {
        let previous = x.checked_sub(1).and_then(|i| heights.get(i)).copied();
        let next = heights.get(x + 1).copied();
        let away_from_right_edge = x + EDGE_MARGIN < width;

        if (x + 1) % TYPE_CHANGE_PERIOD == 0 {
            change_armed = true;
        }
        if change_armed
            && water.is_none()
            && away_from_right_edge
            && previous.is_some_and(|p| p != height)
        {
            material = cycle.next_material(rng);
            change_armed = false;
        }

        if x > EDGE_MARGIN
            && away_from_right_edge
            && water.is_none()
            && next == Some(height)
            && height > 0
            && previous.is_some_and(|p| height > p)
            && one_in(rng, 2)
            && basin_closes(heights, x)
        {
            let material_before = previous
                .and_then(|p| tilemap.kind_at(GridCoordinate::new(x as i32 - 1, p)))
                .unwrap_or(material);
            water = Some(WaterRun {
                material_before,
                length: 0,
            });
            water_runs += 1;
        }

        let mut water_variant = WATER_BODY_VARIANT;
        if let Some(run) = water.as_mut() {
            run.length += 1;
            if previous.is_some_and(|p| height < p) {
                material = run.material_before;
                water = None;
            } else if next.is_some_and(|n| n != height) {
                water_variant = WATER_SLOPE_VARIANT;
            }
        }

        let pos = GridCoordinate::new(x as i32, height);
        let tile = match water {
            Some(run) if run.length == 1 => Tile::new(TileKind::Water, WATER_OPENING_VARIANT, pos),
            Some(_) => Tile::new(TileKind::Water, water_variant, pos),
            None => Tile::new(material, GROUND_VARIANT, pos),
        };
        tilemap.insert(tile);
    }

    debug!("typed {width} surface columns with {water_runs} water runs");
}

/// Extrude every surface tile down to the depth floor
///
/// Filled cells copy the surface kind with [`GROUND_VARIANT`].
pub fn fill_ground(profile: &HeightProfile, tilemap: &mut Tilemap) {
    let mut filled = 0_usize;

    for surface in profile.columns() {
        let Some(kind) = tilemap.kind_at(surface) else {
            continue;
        };
        for y in (surface.y + 1)..=DEPTH_FLOOR {
            tilemap.insert(Tile::new(kind, GROUND_VARIANT, GridCoordinate::new(surface.x, y)));
            filled += 1;
        }
    }

    debug!("filled {filled} ground cells");
}
