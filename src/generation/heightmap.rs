//! Terrain height profile: noise sampling and smoothing passes
//!
//! Raw Perlin samples are far too jagged to walk on. Four ordered passes turn
//! them into plateaus and short steps:
//! 1. singleton break-up widens one-column spikes into plateaus
//! 2. large-jump splitting inserts steps into cliffs and drops rows below the
//!    depth floor
//! 3. singleton removal drops columns that still match neither neighbor
//! 4. edge trim leaves both map ends flat

use log::debug;
use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::io::configuration::{DEPTH_FLOOR, NOISE_AMPLITUDE};
use crate::math::probability::one_in;
use crate::spatial::coordinates::GridCoordinate;

/// Height difference at which a cliff gets intermediate steps
pub const LARGE_JUMP: i32 = 4;

/// Extra copies of the following column a spike may absorb
const SINGLETON_EXTENSIONS: usize = 5;

/// Gate for each extra copy
const SINGLETON_EXTENSION_ONE_IN: u32 = 4;

// Keeps samples off the integer lattice, where Perlin noise is always zero
const ROW_PHASE: f64 = 0.5;

/// One-row slice of a seeded Perlin noise field
#[derive(Debug, Clone)]
pub struct NoiseHeightProfile {
    perlin: Perlin,
    octaves: u32,
    width: usize,
}

impl NoiseHeightProfile {
    /// Create a sampler for `width` columns
    ///
    /// `octaves` sets how many noise periods span the map horizontally.
    pub fn new(seed: u32, octaves: u32, width: usize) -> Self {
        Self {
            perlin: Perlin::new(seed),
            octaves,
            width,
        }
    }

    /// Number of columns produced per sample
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Sample raw integer heights along one noise row
    ///
    /// Identical seed and row always produce identical heights.
    pub fn sample(&self, row: u32) -> Vec<i32> {
        let frequency = f64::from(self.octaves) / self.width.max(1) as f64;
        let row_coordinate = f64::from(row) + ROW_PHASE;

        (0..self.width)
            .map(|column| {
                let value = self
                    .perlin
                    .get([row_coordinate, column as f64 * frequency]);
                (value * NOISE_AMPLITUDE).round() as i32
            })
            .collect()
    }
}

/// Surface height of every column, indexed from x = 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightProfile {
    heights: Vec<i32>,
}

impl HeightProfile {
    /// Wrap a finished height sequence
    pub const fn from_heights(heights: Vec<i32>) -> Self {
        Self { heights }
    }

    /// Profile of constant height
    pub fn flat(width: usize, height: i32) -> Self {
        Self {
            heights: vec![height; width],
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.heights.len()
    }

    /// Whether the profile has no columns
    pub const fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Surface heights in column order
    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    /// Surface height of a column
    pub fn height(&self, x: usize) -> Option<i32> {
        self.heights.get(x).copied()
    }

    /// Surface cell of a column
    pub fn surface(&self, x: usize) -> Option<GridCoordinate> {
        self.height(x)
            .map(|height| GridCoordinate::new(x as i32, height))
    }

    /// Surface cells in column order
    pub fn columns(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.heights
            .iter()
            .enumerate()
            .map(|(x, &height)| GridCoordinate::new(x as i32, height))
    }

    /// Whether the first two and the last two columns share height
    pub fn has_flat_edges(&self) -> bool {
        matches!(self.heights.as_slice(), [a, b, ..] if a == b)
            && matches!(self.heights.as_slice(), [.., y, z] if y == z)
    }
}

/// Widen single-column spikes into plateaus
///
/// A column that differs from both the previously emitted height and the
/// next raw height is emitted twice, then the next height is emitted up to
/// five more times, each behind a 1-in-4 gate. The first and last columns
/// pass through unchanged.
pub fn break_up_singletons<R: Rng + ?Sized>(raw: &[i32], rng: &mut R) -> Vec<i32> {
    let mut widened = Vec::with_capacity(raw.len() * 2);

    for (x, &height) in raw.iter().enumerate() {
        let previous = widened.last().copied();
        widened.push(height);

        let Some(&next) = raw.get(x + 1) else {
            continue;
        };
        if previous.is_none_or(|p| p == height) || next == height {
            continue;
        }

        widened.push(height);
        for _ in 0..SINGLETON_EXTENSIONS {
            if one_in(rng, SINGLETON_EXTENSION_ONE_IN) {
                widened.push(next);
            }
        }
    }

    widened
}

/// Break steep cliffs into steps and discard rows below the depth floor
///
/// Each jump of [`LARGE_JUMP`] or more gets two intermediate columns one row
/// closer to the next height.
pub fn split_large_jumps(heights: &[i32]) -> Vec<i32> {
    let mut stepped = Vec::with_capacity(heights.len() + heights.len() / 2);

    for (x, &height) in heights.iter().enumerate() {
        stepped.push(height);
        if let Some(&next) = heights.get(x + 1) {
            let diff = height - next;
            if diff.abs() >= LARGE_JUMP {
                let step = height - diff.signum();
                stepped.extend([step, step]);
            }
        }
    }

    stepped.retain(|&height| height <= DEPTH_FLOOR);
    stepped
}

/// Keep only interior columns that match at least one neighbor
///
/// Reads the input once left to right; the end columns have a single
/// neighbor and are dropped.
pub fn remove_singletons(heights: &[i32]) -> Vec<i32> {
    heights
        .windows(3)
        .filter_map(|window| match window {
            [left, centre, right] if centre == left || centre == right => Some(*centre),
            _ => None,
        })
        .collect()
}

/// Drop columns from both ends until each end abuts an equal neighbor
///
/// Returns an empty slice when fewer than two columns remain.
pub fn trim_edges(heights: &[i32]) -> &[i32] {
    let mut trimmed = heights;

    while let [first, second, ..] = trimmed {
        if first == second {
            break;
        }
        trimmed = trimmed
            .split_first()
            .map(|(_, rest)| rest)
            .unwrap_or_default();
    }

    while let [.., second_last, last] = trimmed {
        if second_last == last {
            break;
        }
        trimmed = trimmed
            .split_last()
            .map(|(_, rest)| rest)
            .unwrap_or_default();
    }

    if trimmed.len() < 2 { &[] } else { trimmed }
}

/// Run all smoothing passes in order and re-index from x = 0
pub fn smooth<R: Rng + ?Sized>(raw: &[i32], rng: &mut R) -> HeightProfile {
    let widened = break_up_singletons(raw, rng);
    let stepped = split_large_jumps(&widened);
    let plateaus = remove_singletons(&stepped);
    let trimmed = trim_edges(&plateaus);

    debug!(
        "smoothed heightmap: raw={} widened={} stepped={} plateaus={} final={}",
        raw.len(),
        widened.len(),
        stepped.len(),
        plateaus.len(),
        trimmed.len()
    );

    HeightProfile::from_heights(trimmed.to_vec())
}
