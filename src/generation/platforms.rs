//! Floating platform placement with terrain clearance validation

use std::ops::RangeInclusive;

use log::debug;
use rand::Rng;

use crate::generation::heightmap::HeightProfile;
use crate::generation::surface::{GROUND_VARIANT, MaterialCycle};
use crate::math::probability::one_in;
use crate::spatial::coordinates::GridCoordinate;
use crate::spatial::tilemap::Tilemap;
use crate::spatial::tiles::{Tile, TileKind};

/// Columns between platform material changes
pub const PLATFORM_TYPE_PERIOD: usize = 20;

/// Empty rows required between a platform and the lowest terrain under it
pub const PLATFORM_CLEARANCE: i32 = 2;

const FIRST_COLUMN: usize = 6;
const RIGHT_MARGIN: usize = 10;
const PROPOSAL_ONE_IN: u32 = 4;
const RISE: RangeInclusive<i32> = 3..=8;
const WIDTH: RangeInclusive<i32> = 2..=8;
const THICKNESS: RangeInclusive<i32> = 2..=5;

// Clearance is checked from this many columns left of the platform
const WINDOW_LEFT: usize = 3;

/// Cells covered by an accepted platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformFootprint {
    /// Leftmost column
    pub left: i32,
    /// Lowest row of the block
    pub bottom: i32,
    /// Columns covered
    pub width: i32,
    /// Rows covered, extending upward from `bottom`
    pub thickness: i32,
    /// Platform material
    pub kind: TileKind,
}

impl PlatformFootprint {
    /// Highest row of the block
    pub const fn top(&self) -> i32 {
        self.bottom - self.thickness + 1
    }

    /// Every covered cell
    pub fn cells(&self) -> impl Iterator<Item = GridCoordinate> {
        let footprint = *self;
        (0..footprint.width).flat_map(move |dx| {
            (0..footprint.thickness)
                .map(move |dy| GridCoordinate::new(footprint.left + dx, footprint.bottom - dy))
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct PlatformSize {
    width: i32,
    thickness: i32,
}

impl PlatformSize {
    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            width: rng.random_range(WIDTH),
            thickness: rng.random_range(THICKNESS),
        }
    }
}

/// Whether the terrain under columns `[x - 3, x + width]` stays clear of `bottom`
fn has_clearance(heights: &[i32], x: usize, width: i32, bottom: i32) -> bool {
    let start = x.saturating_sub(WINDOW_LEFT);
    let end = x + width.max(0) as usize;
    heights
        .get(start..=end.min(heights.len().saturating_sub(1)))
        .and_then(|window| window.iter().min())
        .is_some_and(|&lowest| lowest > bottom + PLATFORM_CLEARANCE)
}

/// Stamp floating platforms above the terrain
///
/// Walks columns `6..width - 10`; each column proposes a platform behind a
/// 1-in-4 gate, raised 3 to 8 rows above its surface. Accepted platforms are
/// stamped immediately and a new size is drawn, so at most one proposal is
/// pending at any time.
pub fn place_platforms<R: Rng + ?Sized>(
    profile: &HeightProfile,
    tilemap: &mut Tilemap,
    rng: &mut R,
) -> Vec<PlatformFootprint> {
    let heights = profile.heights();
    let mut cycle = MaterialCycle::new();
    let mut material = cycle.next_material(rng);
    let mut size = PlatformSize::draw(rng);
    let mut placed = Vec::new();

    for x in FIRST_COLUMN..heights.len().saturating_sub(RIGHT_MARGIN) {
        if (x + 1) % PLATFORM_TYPE_PERIOD == 0 {
            material = cycle.next_material(rng);
        }
        let Some(&height) = heights.get(x) else {
            continue;
        };
        if !one_in(rng, PROPOSAL_ONE_IN) {
            continue;
        }

        let bottom = height - rng.random_range(RISE);
        if !has_clearance(heights, x, size.width, bottom) {
            continue;
        }

        let footprint = PlatformFootprint {
            left: x as i32,
            bottom,
            width: size.width,
            thickness: size.thickness,
            kind: material,
        };
        for cell in footprint.cells() {
            tilemap.insert(Tile::new(material, GROUND_VARIANT, cell));
        }
        placed.push(footprint);
        size = PlatformSize::draw(rng);
    }

    debug!("placed {} floating platforms", placed.len());
    placed
}
