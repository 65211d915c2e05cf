//! Core data types for the development loop.

use std::path::PathBuf;

use serde::Serialize;

/// Sentinel exit code for invocations that produced no real exit status
/// (timeout, spawn failure, child killed by signal).
pub const SENTINEL_EXIT_CODE: i32 = -1;

/// Normalized outcome of one test-command invocation.
///
/// Construction never fails: timeouts and invocation errors are folded into
/// a failed result, which keeps the iteration loop free of error-handling
/// branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    /// Whether the test command exited with code 0.
    pub passed: bool,
    /// Combined stdout and stderr, or a diagnostic message.
    pub output: String,
    /// The child's exit code, or [`SENTINEL_EXIT_CODE`].
    pub exit_code: i32,
}

impl TestResult {
    /// Result for a process that exited with `exit_code`.
    pub fn from_exit(exit_code: i32, output: String) -> Self {
        Self {
            passed: exit_code == 0,
            output,
            exit_code,
        }
    }

    /// Result for an invocation that never produced an exit status.
    pub fn invocation_failure(diagnostic: impl Into<String>) -> Self {
        Self {
            passed: false,
            output: diagnostic.into(),
            exit_code: SENTINEL_EXIT_CODE,
        }
    }
}

/// Reason why `run_loop` stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStop {
    /// The test suite passed.
    Passed,
    /// The iteration cap was reached without a passing run.
    Exhausted { max_iterations: u32 },
}

/// Summary of a loop invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOutcome {
    /// Number of test executions performed (1-indexed counter's final value).
    pub iterations: u32,
    pub stop: LoopStop,
    /// Path of the completion report, written only on success.
    pub report_path: Option<PathBuf>,
}
