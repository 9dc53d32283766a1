//! Level generation pipeline with bounded whole-map retries
//!
//! Passes run in a fixed order against a fresh [`Tilemap`] per attempt. Only
//! the mandatory spawnpoint pass can fail; a failure discards the attempt and
//! the next one samples a new noise row.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::generation::autotile::autotile;
use crate::generation::decoration::decorate;
use crate::generation::heightmap::{HeightProfile, NoiseHeightProfile, smooth};
use crate::generation::platforms::{PlatformFootprint, place_platforms};
use crate::generation::spawnpoints::{SpawnReport, place_mandatory, place_optional};
use crate::generation::surface::{fill_ground, type_surface};
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_NOISE_SEED, DEFAULT_OCTAVES, DEFAULT_SEED, DEFAULT_WIDTH,
    MIN_WIDTH,
};
use crate::io::error::{MapError, Result, WithContext, invalid_parameter};
use crate::spatial::tiles::SpawnKind;
use crate::spatial::tilemap::Tilemap;

/// Parameters controlling one level generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Noise columns sampled per attempt, before smoothing
    pub width: usize,
    /// Seed of the terrain noise field
    pub noise_seed: u32,
    /// Noise periods across the sampled width
    pub octaves: u32,
    /// Seed of the generator's random stream
    pub seed: u64,
    /// Whole-pipeline attempts before giving up
    pub max_attempts: usize,
    /// Use flat terrain once every attempt has failed
    pub fallback_to_flat: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            noise_seed: DEFAULT_NOISE_SEED,
            octaves: DEFAULT_OCTAVES,
            seed: DEFAULT_SEED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fallback_to_flat: false,
        }
    }
}

impl GeneratorConfig {
    /// Check parameters before any work is done
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidParameter` for a width below the minimum,
    /// zero octaves or zero attempts
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_WIDTH {
            return Err(invalid_parameter(
                "width",
                &self.width,
                &format!("must be at least {MIN_WIDTH} columns"),
            ));
        }
        if self.octaves == 0 {
            return Err(invalid_parameter("octaves", &self.octaves, &"must be positive"));
        }
        if self.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &self.max_attempts,
                &"must be positive",
            ));
        }
        Ok(())
    }
}

/// A finished level and what it took to build it
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    /// Tiles and decorations
    pub tilemap: Tilemap,
    /// Smoothed surface heights
    pub profile: HeightProfile,
    /// Accepted floating platforms
    pub platforms: Vec<PlatformFootprint>,
    /// Optional spawnpoint rolls and placements
    pub spawn_report: SpawnReport,
    /// Attempts used, including the successful one
    pub attempts: usize,
    /// Whether the flat fallback produced this map
    pub used_fallback: bool,
}

/// Runs the generation passes with an owned random stream
pub struct MapGenerator<R = StdRng> {
    config: GeneratorConfig,
    noise: NoiseHeightProfile,
    rng: R,
}

impl MapGenerator<StdRng> {
    /// Create a generator seeded from `config.seed`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> MapGenerator<R> {
    /// Create a generator drawing from a caller-supplied random stream
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            noise: NoiseHeightProfile::new(config.noise_seed, config.octaves, config.width),
            rng,
        })
    }

    /// Configuration this generator was built with
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one level
    ///
    /// # Errors
    ///
    /// Returns `MapError::GenerationExhausted` when every attempt failed to
    /// place a mandatory spawnpoint and the flat fallback is disabled
    pub fn generate(&mut self) -> Result<GeneratedMap> {
        let mut last_missing = SpawnKind::Player;

        for attempt in 1..=self.config.max_attempts {
            let row = self.rng.random_range(1..=self.config.width as u32);
            let raw = self.noise.sample(row);
            let profile = smooth(&raw, &mut self.rng);
            debug!("attempt {attempt}: noise row {row}, {} columns", profile.width());

            match self.build(profile, attempt) {
                Ok(map) => {
                    info!(
                        "generated {} tiles and {} decorations in {attempt} attempt(s)",
                        map.tilemap.len(),
                        map.tilemap.offgrid().len()
                    );
                    return Ok(map);
                }
                Err(MapError::MissingSpawnpoint { kind, .. }) => {
                    warn!("attempt {attempt} discarded: no flat run for the {kind} spawnpoint");
                    last_missing = kind;
                }
                Err(other) => return Err(other),
            }
        }

        if !self.config.fallback_to_flat {
            return Err(MapError::GenerationExhausted {
                attempts: self.config.max_attempts,
                last_missing,
            });
        }

        warn!(
            "all {} attempts failed, falling back to flat terrain",
            self.config.max_attempts
        );
        let profile = HeightProfile::flat(self.config.width, 0);
        let mut map = self.build(profile, self.config.max_attempts + 1)?;
        map.used_fallback = true;
        Ok(map)
    }

    fn build(&mut self, profile: HeightProfile, attempt: usize) -> Result<GeneratedMap> {
        let mut tilemap = Tilemap::new();

        type_surface(&profile, &mut tilemap, &mut self.rng);
        fill_ground(&profile, &mut tilemap);
        let platforms = place_platforms(&profile, &mut tilemap, &mut self.rng);
        place_mandatory(&profile, &mut tilemap).with_attempt(attempt)?;
        let spawn_report = place_optional(&mut tilemap, &mut self.rng);
        decorate(&profile, &mut tilemap, &mut self.rng);
        autotile(&mut tilemap);

        Ok(GeneratedMap {
            tilemap,
            profile,
            platforms,
            spawn_report,
            attempts: attempt,
            used_fallback: false,
        })
    }
}

/// Generate one level with a freshly seeded generator
///
/// # Errors
///
/// Returns an error if the configuration is invalid or generation is exhausted
pub fn generate_level(config: GeneratorConfig) -> Result<GeneratedMap> {
    MapGenerator::new(config)?.generate()
}
