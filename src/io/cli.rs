//! Command-line interface for batch level generation

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use log::{info, warn};

use crate::analysis::statistics::SpawnRateSummary;
use crate::generation::pipeline::{GeneratorConfig, MapGenerator};
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_NOISE_SEED, DEFAULT_OCTAVES, DEFAULT_SEED, DEFAULT_WIDTH,
    OUTPUT_PREFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_preview_png;
use crate::io::progress::ProgressManager;

#[derive(Parser, Debug)]
#[command(name = "platformgen")]
#[command(
    author,
    version,
    about = "Generate 2D platformer levels from noise terrain"
)]
/// Command-line arguments for the level generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory receiving the generated levels
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Seed of the first level; later levels use consecutive seeds
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Noise columns sampled per attempt
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Seed of the terrain noise field
    #[arg(long, default_value_t = DEFAULT_NOISE_SEED)]
    pub noise_seed: u32,

    /// Noise periods across the map
    #[arg(short, long, default_value_t = DEFAULT_OCTAVES)]
    pub octaves: u32,

    /// Attempts per level before giving up
    #[arg(short = 'a', long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Use flat terrain when every attempt fails
    #[arg(short, long)]
    pub flat_fallback: bool,

    /// Also write a PNG preview next to each level
    #[arg(short, long)]
    pub preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate levels even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generator configuration for one seed
    pub const fn generator_config(&self, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            width: self.width,
            noise_seed: self.noise_seed,
            octaves: self.octaves,
            seed,
            max_attempts: self.max_attempts,
            fallback_to_flat: self.flat_fallback,
        }
    }
}

/// Orchestrates generation of a batch of seeds with progress tracking
pub struct BatchGenerator {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    summary: SpawnRateSummary,
}

impl BatchGenerator {
    /// Create a new batch generator with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            summary: SpawnRateSummary::new(),
        }
    }

    /// Spawn statistics of the levels generated so far
    pub const fn summary(&self) -> &SpawnRateSummary {
        &self.summary
    }

    /// Generate every requested seed and return the written level files
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a level cannot be
    /// generated, or an output file cannot be written
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        if self.cli.count == 0 {
            return Err(invalid_parameter("count", &self.cli.count, &"must be positive"));
        }
        self.cli.generator_config(self.cli.seed).validate()?;

        let seeds = self.collect_seeds();
        if seeds.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(seeds.len());
        }

        let mut written = Vec::with_capacity(seeds.len());
        for seed in seeds {
            written.push(self.process_seed(seed)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if self.summary.levels > 1 {
            info!("spawn rates: {}", self.summary);
        }

        Ok(written)
    }

    fn collect_seeds(&self) -> Vec<u64> {
        (0..self.cli.count as u64)
            .map(|offset| self.cli.seed.wrapping_add(offset))
            .filter(|&seed| self.should_generate(seed))
            .collect()
    }

    fn should_generate(&self, seed: u64) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.level_path(seed);
        if output_path.exists() {
            warn!("Skipping seed {seed}: {} exists", output_path.display());
            false
        } else {
            true
        }
    }

    fn process_seed(&mut self, seed: u64) -> Result<PathBuf> {
        let start_time = Instant::now();

        if let Some(ref pm) = self.progress_manager {
            pm.start_level(seed);
        }

        let mut generator = MapGenerator::new(self.cli.generator_config(seed))?;
        let map = generator.generate()?;
        self.summary.record(&map.spawn_report);

        let level_path = self.level_path(seed);
        map.tilemap.save(&level_path)?;

        if self.cli.preview {
            export_preview_png(&map.tilemap, self.preview_path(seed))?;
        }

        if map.used_fallback {
            warn!("seed {seed} used the flat terrain fallback");
        }
        info!("wrote {}", level_path.display());

        if let Some(ref pm) = self.progress_manager {
            pm.complete_level(seed, map.attempts, start_time.elapsed());
        }

        Ok(level_path)
    }

    fn level_path(&self, seed: u64) -> PathBuf {
        Self::output_path(&self.cli.output_dir, seed, "json")
    }

    fn preview_path(&self, seed: u64) -> PathBuf {
        Self::output_path(&self.cli.output_dir, seed, "png")
    }

    fn output_path(dir: &Path, seed: u64, extension: &str) -> PathBuf {
        dir.join(format!("{OUTPUT_PREFIX}{seed}.{extension}"))
    }
}
