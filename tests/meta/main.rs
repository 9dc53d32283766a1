//! Layout checks keeping `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    struct Layout {
        src: HashSet<String>,
        unit: HashSet<String>,
    }

    fn layout() -> Layout {
        let src_dir = Path::new("src");
        let unit_dir = Path::new("tests/unit");

        let src = collect_relative_paths(src_dir, src_dir).unwrap_or_else(|error| {
            assert!(src_dir.exists(), "Failed to read src directory: {error}");
            HashSet::new()
        });
        let unit = if unit_dir.exists() {
            collect_relative_paths(unit_dir, unit_dir).unwrap_or_default()
        } else {
            HashSet::new()
        };

        Layout { src, unit }
    }

    fn report(header: &str, lines: &[String]) -> String {
        format!("{header}:\n{}", lines.join("\n"))
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let Layout { src, unit } = layout();

        // Entry points and module organization files don't require separate test files
        let mut missing: Vec<String> = src
            .iter()
            .filter(|path| *path != "lib.rs" && *path != "main.rs" && !path.ends_with("mod.rs"))
            .filter(|path| !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();
        missing.sort();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files or directories without unit tests", &missing)
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let Layout { src, unit } = layout();

        let mut orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();
        orphaned.sort();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit test files or directories without sources", &orphaned)
        );
    }

    #[test]
    fn test_unit_modules_are_declared() {
        let unit_dir = Path::new("tests/unit");
        let mut undeclared = Vec::new();

        if let Err(error) = check_declarations(unit_dir, "main.rs", &mut undeclared) {
            assert!(unit_dir.exists(), "Failed to scan unit tests: {error}");
        }
        undeclared.sort();

        assert!(
            undeclared.is_empty(),
            "{}",
            report("Unit test files never compiled into the test binary", &undeclared)
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut files_without_tests = Vec::new();

        if let Err(error) = check_test_files(tests_dir, tests_dir, &mut files_without_tests) {
            assert!(tests_dir.exists(), "Failed to scan tests directory: {error}");
        }

        assert!(
            files_without_tests.is_empty(),
            "{}",
            report("Test files without any #[test] functions", &files_without_tests)
        );
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<HashSet<String>, io::Error> {
        let mut paths = HashSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|error| io::Error::other(error.to_string()))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.insert(relative);
                paths.extend(collect_relative_paths(&path, base)?);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }

        Ok(paths)
    }

    // Every sibling file and subdirectory needs a `mod` line in the module root
    fn check_declarations(
        dir: &Path,
        root_file: &str,
        undeclared: &mut Vec<String>,
    ) -> Result<(), io::Error> {
        let root = fs::read_to_string(dir.join(root_file))?;

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.is_dir() {
                check_declarations(&path, "mod.rs", undeclared)?;
            } else if stem == "main" || stem == "mod" {
                continue;
            }

            if !root.contains(&format!("mod {stem};")) {
                undeclared.push(format!("  - {}", path.display()));
            }
        }

        Ok(())
    }

    fn check_test_files(
        dir: &Path,
        base_dir: &Path,
        files_without_tests: &mut Vec<String>,
    ) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                check_test_files(&path, base_dir, files_without_tests)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            // Module organization and entry point files are excluded from test requirement
            if (path.parent() == Some(base_dir) && file_name == "main.rs") || file_name == "mod.rs"
            {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                files_without_tests.push(format!("  - {}", path.display()));
            }
        }

        Ok(())
    }
}
