//! File pattern resolution using glob

use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

use crate::error::CliError;

/// Resolve file patterns to file paths
///
/// Patterns are resolved in the order given so that verdicts line up with
/// the command line. A path matched by several patterns is read once.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        let mut matched = false;
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;

            if path.is_file() {
                matched = true;
                if !files.contains(&path) {
                    files.push(path);
                }
            }
        }

        if !matched {
            return Err(CliError::FileNotFound(pattern.clone()).into());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pattern(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_literal_paths_keep_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "走る").unwrap();
        fs::write(dir.path().join("a.txt"), "走る").unwrap();

        let files = resolve_patterns(&[pattern(&dir, "b.txt"), pattern(&dir, "a.txt")]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_glob_and_dedup() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.knp"), "EOS\n").unwrap();
        fs::write(dir.path().join("two.knp"), "EOS\n").unwrap();
        fs::create_dir(dir.path().join("nested.knp")).unwrap();

        let files =
            resolve_patterns(&[pattern(&dir, "*.knp"), pattern(&dir, "one.knp")]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_missing_file() {
        let err = resolve_patterns(&["/nonexistent/input.txt".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("File not found:"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid file pattern:"));
    }
}
