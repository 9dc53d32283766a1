//! CLI entry point for procedural platformer level generation

use clap::Parser;
use platformgen::io::cli::{BatchGenerator, Cli};

fn main() -> platformgen::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut generator = BatchGenerator::new(cli);
    generator.process()?;
    Ok(())
}
