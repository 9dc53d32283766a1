//! Input/output: configuration, errors, persistence, previews and the CLI

/// Command-line interface and batch generation
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// PNG preview export
pub mod image;
/// JSON save and load of tilemaps
pub mod persistence;
/// Batch progress display
pub mod progress;
