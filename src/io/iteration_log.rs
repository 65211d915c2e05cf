//! Per-iteration artifacts under `.devloop/iterations/`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::types::TestResult;

#[derive(Debug, Clone, Serialize)]
pub struct IterationMeta {
    pub iter: u32,
    pub passed: bool,
    pub exit_code: i32,
}

#[derive(Debug, Clone)]
pub struct IterationPaths {
    pub dir: PathBuf,
    pub meta_path: PathBuf,
    pub tests_log_path: PathBuf,
}

impl IterationPaths {
    pub fn new(iterations_dir: &Path, iter: u32) -> Self {
        let dir = iterations_dir.join(iter.to_string());
        Self {
            meta_path: dir.join("meta.json"),
            tests_log_path: dir.join("tests.log"),
            dir,
        }
    }
}

/// Write the artifacts for one iteration, overwriting any earlier artifacts
/// for the same iteration number.
pub fn write_iteration(
    iterations_dir: &Path,
    iter: u32,
    result: &TestResult,
) -> Result<IterationPaths> {
    let paths = IterationPaths::new(iterations_dir, iter);
    fs::create_dir_all(&paths.dir)
        .with_context(|| format!("create iteration dir {}", paths.dir.display()))?;

    let meta = IterationMeta {
        iter,
        passed: result.passed,
        exit_code: result.exit_code,
    };
    write_json(&paths.meta_path, &meta)?;
    write_text(&paths.tests_log_path, &result.output)?;

    Ok(paths)
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(value)?;
    buf.push('\n');
    write_text(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_paths_are_stable() {
        let paths = IterationPaths::new(Path::new("/proj/.devloop/iterations"), 3);

        assert!(paths.dir.ends_with(Path::new(".devloop/iterations/3")));
        assert!(paths.meta_path.ends_with("meta.json"));
        assert!(paths.tests_log_path.ends_with("tests.log"));
    }

    #[test]
    fn writes_meta_and_test_log() {
        let temp = tempfile::tempdir().expect("tempdir");
        let result = TestResult::from_exit(1, "1 failed".to_string());

        let paths = write_iteration(temp.path(), 2, &result).expect("write");

        let meta = fs::read_to_string(&paths.meta_path).expect("read meta");
        assert!(meta.contains("\"iter\": 2"));
        assert!(meta.contains("\"passed\": false"));
        let log = fs::read_to_string(&paths.tests_log_path).expect("read log");
        assert_eq!(log, "1 failed");
    }
}
