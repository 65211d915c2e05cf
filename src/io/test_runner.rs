//! Test command invocation with a never-throw result contract.
//!
//! The [`TestRunner`] trait decouples the loop from the actual test command.
//! Implementations return a [`TestResult`], never an error: timeouts and
//! invocation failures are folded into a failed result so the loop can keep
//! iterating instead of crashing.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::core::types::TestResult;
use crate::io::config::LoopConfig;
use crate::io::process::run_command_with_timeout;

/// Parameters for one test-command invocation.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// Working directory for the test process (the project root).
    pub workdir: PathBuf,
    /// Command and arguments.
    pub command: Vec<String>,
    /// Maximum wall-clock time for the invocation.
    pub timeout: Duration,
    /// Truncate captured output beyond this many bytes.
    pub output_limit_bytes: usize,
}

/// Abstraction over test-suite execution backends.
pub trait TestRunner {
    /// Run the test command. Never fails; see the module docs.
    fn run(&self, request: &TestRequest) -> TestResult;
}

/// Runner that spawns the configured test command as a child process.
pub struct CommandTestRunner;

impl TestRunner for CommandTestRunner {
    #[instrument(skip_all, fields(timeout_secs = request.timeout.as_secs()))]
    fn run(&self, request: &TestRequest) -> TestResult {
        let Some((program, args)) = request.command.split_first() else {
            return TestResult::invocation_failure("test command is empty");
        };
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&request.workdir);

        let output =
            match run_command_with_timeout(cmd, request.timeout, request.output_limit_bytes) {
                Ok(output) => output,
                Err(err) => {
                    warn!(err = %err, "test command could not be invoked");
                    return TestResult::invocation_failure(format!(
                        "error running tests: {err:#}"
                    ));
                }
            };

        if output.timed_out {
            warn!(
                timeout_secs = request.timeout.as_secs(),
                "test command timed out"
            );
            return TestResult::invocation_failure(format!(
                "tests timed out after {} seconds",
                request.timeout.as_secs()
            ));
        }

        let text = output.combined_text();
        match output.status.code() {
            Some(code) => {
                info!(exit_code = code, "test command finished");
                TestResult::from_exit(code, text)
            }
            None => TestResult::invocation_failure(format!(
                "test command killed by signal\n{text}"
            )),
        }
    }
}

/// Build the configured test invocation for `root`.
///
/// `coverage` appends the coverage arguments used by the completion report.
pub fn test_request(root: &Path, config: &LoopConfig, coverage: bool) -> TestRequest {
    let mut command = config.test.command.clone();
    if coverage {
        command.extend(config.test.coverage_args.iter().cloned());
    }
    TestRequest {
        workdir: root.to_path_buf(),
        command,
        timeout: Duration::from_secs(config.test_timeout_secs),
        output_limit_bytes: config.output_limit_bytes,
    }
}
