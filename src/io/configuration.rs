//! Generation constants and runtime configuration defaults

/// Edge length of one grid cell in pixels
pub const TILE_SIZE_PX: i32 = 16;

// Ground is filled down to this row; heights below it are discarded
/// Deepest grid row (inclusive)
pub const DEPTH_FLOOR: i32 = 6;

/// Scale applied to raw noise samples before rounding to rows
pub const NOISE_AMPLITUDE: f64 = 10.0;

// Default values for configurable parameters
/// Number of noise columns sampled per attempt
pub const DEFAULT_WIDTH: usize = 100;

// Below this the spawn scan windows overlap and no map can succeed
/// Minimum accepted map width
pub const MIN_WIDTH: usize = 32;

/// Seed of the terrain noise field
pub const DEFAULT_NOISE_SEED: u32 = 10;

/// Horizontal frequency of the noise slice
pub const DEFAULT_OCTAVES: u32 = 80;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Whole-pipeline attempts before giving up on mandatory spawnpoints
pub const DEFAULT_MAX_ATTEMPTS: usize = 32;

// Output settings
/// Prefix of generated level file names
pub const OUTPUT_PREFIX: &str = "level_";
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
