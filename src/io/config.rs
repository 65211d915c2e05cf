//! Harness configuration stored at `devloop.toml` in the project root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Harness configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to values matching the pytest-based
/// reference workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoopConfig {
    /// Maximum number of test-and-debug iterations before giving up.
    pub max_iterations: u32,

    /// Wall-clock budget for one test-command invocation, in seconds.
    pub test_timeout_secs: u64,

    /// Truncate captured test output beyond this many bytes.
    pub output_limit_bytes: usize,

    /// Fixed delay between a debug prompt and the next test run, in seconds.
    /// A placeholder for the turnaround latency of a real assistant call.
    pub debug_delay_secs: u64,

    pub test: TestConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestConfig {
    /// Command to execute the test suite (e.g. `["pytest","tests/","-v"]`).
    pub command: Vec<String>,
    /// Extra arguments appended for the coverage run in the final report.
    pub coverage_args: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssistantConfig {
    /// Command to forward prompts to (prompt on stdin, reply on stdout).
    /// Empty selects the built-in stub bridge.
    pub command: Vec<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "pytest".to_string(),
                "tests/".to_string(),
                "-v".to_string(),
                "--tb=short".to_string(),
                "--color=yes".to_string(),
            ],
            coverage_args: vec!["--cov=src".to_string(), "--cov-report=term".to_string()],
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            test_timeout_secs: 60,
            output_limit_bytes: 1_000_000,
            debug_delay_secs: 2,
            test: TestConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(anyhow!("max_iterations must be > 0"));
        }
        if self.test_timeout_secs == 0 {
            return Err(anyhow!("test_timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if self.test.command.is_empty() || self.test.command[0].trim().is_empty() {
            return Err(anyhow!("test.command must be a non-empty array"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LoopConfig::default()`.
pub fn load_config(path: &Path) -> Result<LoopConfig> {
    if !path.exists() {
        let cfg = LoopConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LoopConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &LoopConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, LoopConfig::default());
        assert_eq!(cfg.max_iterations, 50);
        assert_eq!(cfg.test.command[0], "pytest");
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("devloop.toml");
        let cfg = LoopConfig {
            max_iterations: 3,
            debug_delay_secs: 0,
            ..LoopConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("devloop.toml");
        fs::write(&path, "max_iterations = 7\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.max_iterations, 7);
        assert_eq!(cfg.test_timeout_secs, 60);
    }

    #[test]
    fn zero_max_iterations_is_rejected() {
        let cfg = LoopConfig {
            max_iterations: 0,
            ..LoopConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_iterations"));
    }

    #[test]
    fn blank_test_command_is_rejected() {
        let mut cfg = LoopConfig::default();
        cfg.test.command = vec!["  ".to_string()];
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("test.command"));
    }
}
