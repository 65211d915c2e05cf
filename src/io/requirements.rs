//! Input documents consumed by the loop.
//!
//! Both documents are read once at loop startup. Absence is a fatal
//! precondition: there is no retry and no test execution happens first.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::io::init::ProjectPaths;

/// Read `PROJECT_REQUIREMENTS.md`.
pub fn load_requirements(paths: &ProjectPaths) -> Result<String> {
    read_required(&paths.requirements_path)
}

/// Read `SYSTEM_INSTRUCTIONS.md`.
pub fn load_instructions(paths: &ProjectPaths) -> Result<String> {
    read_required(&paths.instructions_path)
}

fn read_required(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(anyhow!("{} not found", path.display()));
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "document loaded");
    Ok(contents)
}
