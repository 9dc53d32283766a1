//! Level generation passes and the pipeline that runs them

/// Bitmask variant selection for grid tiles and off-grid clumps
pub mod autotile;
/// Foreground and background decoration scattering
pub mod decoration;
/// Noise sampling and heightmap smoothing
pub mod heightmap;
/// Pass ordering, seeding and retries
pub mod pipeline;
/// Floating platform placement
pub mod platforms;
/// Mandatory and optional spawnpoint placement
pub mod spawnpoints;
/// Surface materials, water runs and ground fill
pub mod surface;
