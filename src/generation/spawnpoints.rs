//! Spawnpoint placement: mandatory player/portal markers and optional scatter
//!
//! Mandatory markers fail the whole attempt when no flat run exists. Optional
//! markers are collected in a read-only scan and applied afterwards, so the
//! scan never observes its own placements through the tilemap.

use std::collections::BTreeSet;

use log::debug;
use rand::Rng;

use crate::generation::heightmap::HeightProfile;
use crate::io::error::{MapError, Result};
use crate::math::probability::{one_in, weighted_choice};
use crate::spatial::coordinates::GridCoordinate;
use crate::spatial::tilemap::Tilemap;
use crate::spatial::tiles::{SpawnKind, Tile};

/// Gate for each enemy roll
pub const ENEMY_ONE_IN: u32 = 4;

/// Gate for each normal chest roll
pub const CHEST_ONE_IN: u32 = 8;

/// Relative weights of the common, uncommon and rare enemy tiers
pub const ENEMY_TIER_WEIGHTS: [u32; 3] = [5, 2, 1];

/// Scanned tiles between two enemies
pub const ENEMY_COOLDOWN: u32 = 30;

/// Scanned tiles between two normal chests
pub const CHEST_COOLDOWN: u32 = 60;

const CHEST_INITIAL_COOLDOWN: u32 = 50;

/// Columns searched for the player start
const PLAYER_COLUMNS: std::ops::Range<usize> = 5..11;

/// Portal search window, counted back from the right edge
const PORTAL_FROM_RIGHT: usize = 16;
const PORTAL_TO_RIGHT: usize = 4;

/// Percentage of map width kept free of enemies and chests on each side
const BAND_MARGIN_PERCENT: i32 = 15;

/// Length of a flat run around a surface tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatRun {
    /// The tile and its right neighbor
    Two,
    /// The tile and both horizontal neighbors
    Three,
    /// The tile and the four tiles to its right
    Four,
}

impl FlatRun {
    const fn offsets(self) -> &'static [i32] {
        match self {
            Self::Two => &[1],
            Self::Three => &[-1, 1],
            Self::Four => &[1, 2, 3, 4],
        }
    }
}

fn flat_run_with(
    occupied: impl Fn(GridCoordinate) -> bool,
    at: GridCoordinate,
    run: FlatRun,
) -> bool {
    run.offsets().iter().all(|&dx| {
        let side = at.offset(dx, 0);
        occupied(side) && !occupied(side.above())
    })
}

/// Whether the tile at `at` sits on a flat run with nothing directly above it
pub fn is_flat_run(tilemap: &Tilemap, at: GridCoordinate, run: FlatRun) -> bool {
    flat_run_with(|coord| tilemap.contains(coord), at, run)
}

fn is_occupied(
    tilemap: &Tilemap,
    claimed: &BTreeSet<GridCoordinate>,
    coord: GridCoordinate,
) -> bool {
    tilemap.contains(coord) || claimed.contains(&coord)
}

/// Positions of the two markers every level needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandatorySpawns {
    /// Player start marker
    pub player: GridCoordinate,
    /// Exit portal marker
    pub portal: GridCoordinate,
}

/// Place the player start and the exit portal
///
/// The player goes one row above the first flat-2 surface column in
/// `[5, 11)`. The portal goes two rows above the first flat-3 surface column
/// found scanning `[W - 16, W - 4)` right to left.
///
/// # Errors
///
/// Returns `MapError::MissingSpawnpoint` with attempt 0 when either search
/// finds no flat run; the caller supplies the attempt number.
pub fn place_mandatory(
    profile: &HeightProfile,
    tilemap: &mut Tilemap,
) -> Result<MandatorySpawns> {
    let player = PLAYER_COLUMNS
        .filter_map(|x| profile.surface(x))
        .find(|&surface| is_flat_run(tilemap, surface, FlatRun::Two))
        .map(GridCoordinate::above)
        .ok_or(MapError::MissingSpawnpoint {
            kind: SpawnKind::Player,
            attempt: 0,
        })?;
    tilemap.insert(Tile::spawnpoint(SpawnKind::Player, player));

    let width = profile.width();
    let window = width.saturating_sub(PORTAL_FROM_RIGHT)..width.saturating_sub(PORTAL_TO_RIGHT);
    let portal = window
        .rev()
        .filter_map(|x| profile.surface(x))
        .find(|&surface| is_flat_run(tilemap, surface, FlatRun::Three))
        .map(|surface| surface.offset(0, -2))
        .ok_or(MapError::MissingSpawnpoint {
            kind: SpawnKind::Portal,
            attempt: 0,
        })?;
    tilemap.insert(Tile::spawnpoint(SpawnKind::Portal, portal));

    debug!("player spawn at {player}, portal at {portal}");
    Ok(MandatorySpawns { player, portal })
}

/// Gate rolls and placements made by one optional placement pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Enemy gates rolled
    pub enemy_rolls: usize,
    /// Enemies placed
    pub enemies_placed: usize,
    /// Chest gates rolled
    pub chest_rolls: usize,
    /// Normal chests placed
    pub chests_placed: usize,
    /// Placed enemies per tier, aligned with [`SpawnKind::ENEMIES`]
    pub enemy_tiers: [usize; 3],
    /// Rare chest marker, if the highest row had headroom
    pub rare_chest: Option<GridCoordinate>,
}

/// Columns strictly inside the band that may hold enemies and chests
#[derive(Debug, Clone, Copy)]
struct MiddleBand {
    margin: i32,
    right_column: i32,
}

impl MiddleBand {
    fn of(tilemap: &Tilemap) -> Option<Self> {
        let right_column = tilemap.coordinates().map(|coord| coord.x).max()?;
        let margin = (right_column + 1) * BAND_MARGIN_PERCENT / 100;
        Some(Self {
            margin,
            right_column,
        })
    }

    const fn contains(&self, x: i32) -> bool {
        x > self.margin && x + self.margin < self.right_column
    }
}

/// Scatter the rare chest, enemies and normal chests over solid ground
///
/// Solid tiles are scanned in map order. A tile qualifies only when both
/// cells above it are free; both cooldowns tick once per scanned tile, and a
/// gate is rolled only while its cooldown is zero and the run conditions
/// hold. Placements are applied after the scan in the order they were made.
pub fn place_optional<R: Rng + ?Sized>(tilemap: &mut Tilemap, rng: &mut R) -> SpawnReport {
    let mut report = SpawnReport::default();
    let view: &Tilemap = tilemap;
    let Some(band) = MiddleBand::of(view) else {
        return report;
    };
    let top_row = view
        .tiles()
        .filter(|tile| tile.spawn_kind().is_none())
        .map(|tile| tile.pos.y)
        .min();

    let mut claimed: BTreeSet<GridCoordinate> = BTreeSet::new();
    let mut placements: Vec<Tile> = Vec::new();
    let mut enemy_cooldown = ENEMY_COOLDOWN;
    let mut chest_cooldown = CHEST_INITIAL_COOLDOWN;

    let solid: Vec<GridCoordinate> = view
        .tiles()
        .filter(|tile| tile.kind.is_solid())
        .map(|tile| tile.pos)
        .collect();

    for at in solid {
        let has_headroom = !is_occupied(view, &claimed, at.above())
            && !is_occupied(view, &claimed, at.offset(0, -2));

        if has_headroom {
            let mut claim = |tile: Tile, claimed: &mut BTreeSet<GridCoordinate>| {
                claimed.insert(tile.pos);
                placements.push(tile);
            };

            if report.rare_chest.is_none() && top_row == Some(at.y) {
                let chest = at.offset(1, -1);
                claim(Tile::spawnpoint(SpawnKind::RareChest, chest), &mut claimed);
                report.rare_chest = Some(chest);
            }

            let in_band = band.contains(at.x) && !view.is_water(at);
            let mut enemy_placed = false;

            if in_band
                && enemy_cooldown == 0
                && flat_run_with(|coord| is_occupied(view, &claimed, coord), at, FlatRun::Two)
            {
                report.enemy_rolls += 1;
                if one_in(rng, ENEMY_ONE_IN) {
                    let tier = weighted_choice(rng, &ENEMY_TIER_WEIGHTS);
                    if let (Some(&kind), Some(count)) =
                        (SpawnKind::ENEMIES.get(tier), report.enemy_tiers.get_mut(tier))
                    {
                        *count += 1;
                        report.enemies_placed += 1;
                        enemy_placed = true;
                        enemy_cooldown = ENEMY_COOLDOWN;
                        claim(Tile::spawnpoint(kind, at.above()), &mut claimed);
                    }
                }
            }

            // An enemy already holds the cell a chest would take
            if in_band
                && !enemy_placed
                && chest_cooldown == 0
                && flat_run_with(|coord| is_occupied(view, &claimed, coord), at, FlatRun::Three)
            {
                report.chest_rolls += 1;
                if one_in(rng, CHEST_ONE_IN) {
                    report.chests_placed += 1;
                    chest_cooldown = CHEST_COOLDOWN;
                    claim(Tile::spawnpoint(SpawnKind::Chest, at.above()), &mut claimed);
                }
            }
        }

        enemy_cooldown = enemy_cooldown.saturating_sub(1);
        chest_cooldown = chest_cooldown.saturating_sub(1);
    }

    for tile in placements {
        tilemap.insert(tile);
    }

    debug!(
        "optional spawns: {} enemies from {} rolls, {} chests from {} rolls, rare chest {}",
        report.enemies_placed,
        report.enemy_rolls,
        report.chests_placed,
        report.chest_rolls,
        if report.rare_chest.is_some() { "placed" } else { "skipped" }
    );
    report
}
