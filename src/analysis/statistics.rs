//! Spawn gate statistics aggregated across generated levels
//!
//! Each level reports how often the enemy and chest gates were rolled and how
//! often they passed. Over many levels the pass rates should approach the gate
//! probabilities; the binomial tails quantify how surprising a deviation is.

use std::fmt;

use crate::generation::spawnpoints::{
    CHEST_ONE_IN, ENEMY_ONE_IN, ENEMY_TIER_WEIGHTS, SpawnReport,
};
use crate::math::probability::binomial_two_sided_tail;

/// Running totals of spawn reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnRateSummary {
    /// Levels recorded
    pub levels: usize,
    /// Enemy gates rolled
    pub enemy_rolls: usize,
    /// Enemies placed
    pub enemies_placed: usize,
    /// Chest gates rolled
    pub chest_rolls: usize,
    /// Normal chests placed
    pub chests_placed: usize,
    /// Enemies placed per tier
    pub enemy_tiers: [usize; 3],
    /// Levels that received a rare chest
    pub rare_chests: usize,
}

fn rate(hits: usize, trials: usize) -> Option<f64> {
    (trials > 0).then(|| hits as f64 / trials as f64)
}

impl SpawnRateSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one level's report
    pub fn record(&mut self, report: &SpawnReport) {
        self.levels += 1;
        self.enemy_rolls += report.enemy_rolls;
        self.enemies_placed += report.enemies_placed;
        self.chest_rolls += report.chest_rolls;
        self.chests_placed += report.chests_placed;
        for (total, &count) in self.enemy_tiers.iter_mut().zip(&report.enemy_tiers) {
            *total += count;
        }
        if report.rare_chest.is_some() {
            self.rare_chests += 1;
        }
    }

    /// Observed enemy gate pass rate
    pub fn enemy_rate(&self) -> Option<f64> {
        rate(self.enemies_placed, self.enemy_rolls)
    }

    /// Observed chest gate pass rate
    pub fn chest_rate(&self) -> Option<f64> {
        rate(self.chests_placed, self.chest_rolls)
    }

    /// Two-sided tail of the enemy placements under a 1-in-4 gate
    pub fn enemy_gate_tail(&self) -> f64 {
        binomial_two_sided_tail(
            self.enemy_rolls,
            1.0 / f64::from(ENEMY_ONE_IN),
            self.enemies_placed,
        )
    }

    /// Two-sided tail of the chest placements under a 1-in-8 gate
    pub fn chest_gate_tail(&self) -> f64 {
        binomial_two_sided_tail(
            self.chest_rolls,
            1.0 / f64::from(CHEST_ONE_IN),
            self.chests_placed,
        )
    }

    /// Two-sided tail of one enemy tier's share of all enemies
    ///
    /// Returns `None` for a tier index outside the three tiers.
    pub fn tier_tail(&self, tier: usize) -> Option<f64> {
        let weight = *ENEMY_TIER_WEIGHTS.get(tier)?;
        let total: u32 = ENEMY_TIER_WEIGHTS.iter().sum();
        let count = *self.enemy_tiers.get(tier)?;
        Some(binomial_two_sided_tail(
            self.enemies_placed,
            f64::from(weight) / f64::from(total),
            count,
        ))
    }

    /// Whether every gate and tier tail stays above `significance`
    pub fn is_consistent(&self, significance: f64) -> bool {
        self.enemy_gate_tail() >= significance
            && self.chest_gate_tail() >= significance
            && (0..ENEMY_TIER_WEIGHTS.len())
                .all(|tier| self.tier_tail(tier).is_some_and(|tail| tail >= significance))
    }
}

impl fmt::Display for SpawnRateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = |value: Option<f64>| value.map_or(0.0, |v| v * 100.0);
        let [common, uncommon, rare] = self.enemy_tiers;
        write!(
            f,
            "{} levels: enemies {}/{} rolls ({:.1}%), chests {}/{} rolls ({:.1}%), tiers {}/{}/{}, rare chests {}",
            self.levels,
            self.enemies_placed,
            self.enemy_rolls,
            percent(self.enemy_rate()),
            self.chests_placed,
            self.chest_rolls,
            percent(self.chest_rate()),
            common,
            uncommon,
            rare,
            self.rare_chests
        )
    }
}
