//! Tests for command-line parsing and batch generation

#[cfg(test)]
mod tests {
    use clap::Parser;
    use platformgen::MapError;
    use platformgen::io::cli::{BatchGenerator, Cli};
    use platformgen::io::configuration::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, DEFAULT_WIDTH};

    // Tests defaults apply when only the program name is given
    // Verified by changing the default count
    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(["platformgen"]).unwrap();
        assert_eq!(cli.output_dir.to_str(), Some("."));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.count, 1);
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests every flag reaches the generator configuration
    // Verified by ignoring the width flag
    #[test]
    fn test_arguments_map_to_config() {
        let cli = Cli::try_parse_from([
            "platformgen",
            "out",
            "--seed",
            "9",
            "-c",
            "3",
            "-w",
            "64",
            "--noise-seed",
            "4",
            "-o",
            "40",
            "-a",
            "5",
            "--flat-fallback",
            "--quiet",
            "--no-skip",
        ])
        .unwrap();

        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());

        let config = cli.generator_config(11);
        assert_eq!(config.seed, 11);
        assert_eq!(config.width, 64);
        assert_eq!(config.noise_seed, 4);
        assert_eq!(config.octaves, 40);
        assert_eq!(config.max_attempts, 5);
        assert!(config.fallback_to_flat);
    }

    // Tests malformed numbers are rejected by the parser
    // Verified by accepting negative counts
    #[test]
    fn test_invalid_arguments_rejected() {
        assert!(Cli::try_parse_from(["platformgen", "--count", "-1"]).is_err());
        assert!(Cli::try_parse_from(["platformgen", "--width", "wide"]).is_err());
    }

    // Tests a zero count or undersized width fails before generating
    // Verified by generating with the invalid configuration
    #[test]
    fn test_process_rejects_invalid_batches() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();

        let zero = Cli::try_parse_from(["platformgen", dir_arg, "-c", "0", "-q"]).unwrap();
        assert!(matches!(
            BatchGenerator::new(zero).process(),
            Err(MapError::InvalidParameter { parameter: "count", .. })
        ));

        let narrow = Cli::try_parse_from(["platformgen", dir_arg, "-w", "8", "-q"]).unwrap();
        assert!(matches!(
            BatchGenerator::new(narrow).process(),
            Err(MapError::InvalidParameter { parameter: "width", .. })
        ));
    }

    // Tests existing levels are skipped unless regeneration is requested
    // Verified by overwriting existing files
    #[test]
    fn test_existing_levels_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let existing = dir.path().join("level_7.json");
        std::fs::write(&existing, "placeholder").unwrap();

        let cli = Cli::try_parse_from(["platformgen", dir_arg, "-s", "7", "-q", "-f"]).unwrap();
        let mut batch = BatchGenerator::new(cli);
        assert!(batch.process().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "placeholder");
        assert_eq!(batch.summary().levels, 0);

        let cli =
            Cli::try_parse_from(["platformgen", dir_arg, "-s", "7", "-q", "-f", "-n"]).unwrap();
        let written = BatchGenerator::new(cli).process().unwrap();
        assert_eq!(written, vec![existing.clone()]);
        assert_ne!(std::fs::read_to_string(&existing).unwrap(), "placeholder");
    }
}
