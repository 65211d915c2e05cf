//! The test-and-debug development loop.

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::types::{LoopOutcome, LoopStop, TestResult};
use crate::io::assistant::AssistantBridge;
use crate::io::config::LoopConfig;
use crate::io::init::{ProjectPaths, ensure_layout};
use crate::io::iteration_log::write_iteration;
use crate::io::prompt::PromptEngine;
use crate::io::requirements::{load_instructions, load_requirements};
use crate::io::test_runner::{TestRunner, test_request};
use crate::report::write_report;

/// Observed state of one loop pass, handed to the `on_iteration` callback.
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    /// 1-indexed iteration number.
    pub iter: u32,
    pub result: TestResult,
}

/// Run the development loop in `root` until the test suite passes or the
/// iteration cap is reached.
///
/// Entry actions: scaffold the layout, load the requirements and
/// instructions documents (both fatal if missing, before any test
/// execution), and send the initial implementation prompt. The initial
/// reply is logged but never inspected; the first test run happens
/// unconditionally afterwards.
///
/// Terminal states are exactly two: [`LoopStop::Passed`] (report written)
/// and [`LoopStop::Exhausted`] (no report). Test failures never surface as
/// errors; only startup and filesystem problems do.
#[instrument(skip_all, fields(root = %root.display(), max_iterations = config.max_iterations))]
pub fn run_loop<A, T, F>(
    root: &Path,
    assistant: &A,
    test_runner: &T,
    config: &LoopConfig,
    mut on_iteration: F,
) -> Result<LoopOutcome>
where
    A: AssistantBridge + ?Sized,
    T: TestRunner + ?Sized,
    F: FnMut(&IterationOutcome),
{
    let paths = ProjectPaths::new(root);
    ensure_layout(&paths)?;

    let requirements = load_requirements(&paths)?;
    let instructions = load_instructions(&paths)?;
    info!(requirement_bytes = requirements.len(), "documents loaded");

    let engine = PromptEngine::new();
    let initial = engine.render_initial(&instructions, &requirements)?;
    let reply = assistant.send(&initial);
    debug!(reply_chars = reply.chars().count(), "initial prompt acknowledged");

    let mut iter = 0u32;
    loop {
        iter += 1;
        info!(iter, "running tests");

        let result = test_runner.run(&test_request(root, config, false));
        write_iteration(&paths.iterations_dir, iter, &result)
            .with_context(|| format!("write iteration {iter} artifacts"))?;
        on_iteration(&IterationOutcome {
            iter,
            result: result.clone(),
        });

        if result.passed {
            info!(iter, "test suite passed");
            let report_path = write_report(&paths, &result, iter, test_runner, config)?;
            return Ok(LoopOutcome {
                iterations: iter,
                stop: LoopStop::Passed,
                report_path: Some(report_path),
            });
        }

        if iter >= config.max_iterations {
            warn!(iter, "iteration cap reached without a passing run");
            return Ok(LoopOutcome {
                iterations: iter,
                stop: LoopStop::Exhausted {
                    max_iterations: config.max_iterations,
                },
                report_path: None,
            });
        }

        let debug_prompt = engine.render_debug(iter, &result.output)?;
        assistant.send(&debug_prompt);
        // Placeholder for the turnaround latency of a real assistant call.
        thread::sleep(Duration::from_secs(config.debug_delay_secs));
    }
}
