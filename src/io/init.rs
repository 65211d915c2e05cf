//! Project layout scaffolding and canonical paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// All canonical paths within a project root.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub src_dir: PathBuf,
    pub tests_dir: PathBuf,
    pub src_marker: PathBuf,
    pub tests_marker: PathBuf,
    pub requirements_path: PathBuf,
    pub instructions_path: PathBuf,
    pub config_path: PathBuf,
    pub report_path: PathBuf,
    pub iterations_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let src_dir = root.join("src");
        let tests_dir = root.join("tests");
        Self {
            src_marker: src_dir.join("__init__.py"),
            tests_marker: tests_dir.join("__init__.py"),
            requirements_path: root.join("PROJECT_REQUIREMENTS.md"),
            instructions_path: root.join("SYSTEM_INSTRUCTIONS.md"),
            config_path: root.join("devloop.toml"),
            report_path: root.join("COMPLETION_REPORT.md"),
            iterations_dir: root.join(".devloop").join("iterations"),
            src_dir,
            tests_dir,
            root,
        }
    }
}

/// Create the source/test layout if missing.
///
/// Idempotent: a second call leaves the same directory and marker-file set
/// as the first, and never clobbers existing files. Filesystem errors are
/// fatal to the run.
pub fn ensure_layout(paths: &ProjectPaths) -> Result<()> {
    create_dir(&paths.src_dir)?;
    create_dir(&paths.tests_dir)?;
    create_dir(&paths.iterations_dir)?;
    touch(&paths.src_marker)?;
    touch(&paths.tests_marker)?;
    debug!(root = %paths.root.display(), "project layout ensured");
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

fn touch(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, "").with_context(|| format!("write file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies ensure_layout creates the directories and marker files.
    #[test]
    fn layout_creates_directories_and_markers() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = ProjectPaths::new(temp.path());

        ensure_layout(&paths).expect("layout");

        assert!(paths.src_dir.is_dir());
        assert!(paths.tests_dir.is_dir());
        assert!(paths.iterations_dir.is_dir());
        assert!(paths.src_marker.is_file());
        assert!(paths.tests_marker.is_file());
    }

    /// Verifies ensure_layout is idempotent and preserves existing files.
    ///
    /// Writes content into a marker, re-runs the scaffolder, and confirms
    /// the file set and the content are unchanged.
    #[test]
    fn layout_is_idempotent_and_preserves_content() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = ProjectPaths::new(temp.path());

        ensure_layout(&paths).expect("first layout");
        fs::write(&paths.src_marker, "custom").expect("write marker");

        ensure_layout(&paths).expect("second layout");

        let marker = fs::read_to_string(&paths.src_marker).expect("read marker");
        assert_eq!(marker, "custom");
        assert!(paths.tests_marker.is_file());
    }

    #[test]
    fn paths_are_rooted_at_the_project_dir() {
        let paths = ProjectPaths::new("/proj");
        assert_eq!(paths.requirements_path, Path::new("/proj/PROJECT_REQUIREMENTS.md"));
        assert_eq!(paths.instructions_path, Path::new("/proj/SYSTEM_INSTRUCTIONS.md"));
        assert_eq!(paths.report_path, Path::new("/proj/COMPLETION_REPORT.md"));
        assert!(paths.iterations_dir.ends_with(Path::new(".devloop/iterations")));
    }
}
