//! Completion report generation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::types::TestResult;
use crate::io::config::LoopConfig;
use crate::io::init::ProjectPaths;
use crate::io::test_runner::{TestRunner, test_request};

/// Write `COMPLETION_REPORT.md` for a successful run.
///
/// Re-runs the test command with coverage instrumentation. That run is
/// purely informational: its failure is not distinguished from the final
/// result's status. Overwrites any prior report.
#[instrument(skip_all, fields(iterations))]
pub fn write_report<T: TestRunner + ?Sized>(
    paths: &ProjectPaths,
    final_result: &TestResult,
    iterations: u32,
    test_runner: &T,
    config: &LoopConfig,
) -> Result<PathBuf> {
    let coverage = test_runner.run(&test_request(&paths.root, config, true));

    let report = render_report(iterations, final_result, &coverage);
    fs::write(&paths.report_path, report)
        .with_context(|| format!("write report {}", paths.report_path.display()))?;
    info!(path = %paths.report_path.display(), "completion report written");
    Ok(paths.report_path.clone())
}

fn render_report(iterations: u32, final_result: &TestResult, coverage: &TestResult) -> String {
    format!(
        "# Autonomous development complete\n\
         \n\
         iterations: {iterations}\n\
         final status: all tests passing\n\
         \n\
         ## Test results\n\
         \n\
         ```\n{final_output}\n```\n\
         \n\
         ## Coverage\n\
         \n\
         ```\n{coverage_output}\n```\n\
         \n\
         To verify: review the tests/ directory, run the configured test\n\
         command, and confirm all tests pass before deploying.\n",
        final_output = final_result.output.trim_end(),
        coverage_output = coverage.output.trim_end(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedTestRunner, TestProject};

    #[test]
    fn report_contains_iterations_and_both_outputs() {
        let project = TestProject::new().expect("project");
        let final_result = TestResult::from_exit(0, "4 passed".to_string());
        let runner = ScriptedTestRunner::new(vec![TestResult::from_exit(
            0,
            "coverage: 97%".to_string(),
        )]);

        let path = write_report(
            &project.paths(),
            &final_result,
            6,
            &runner,
            &LoopConfig::default(),
        )
        .expect("report");

        let report = fs::read_to_string(path).expect("read report");
        assert!(report.contains("iterations: 6"));
        assert!(report.contains("4 passed"));
        assert!(report.contains("coverage: 97%"));
        // The coverage invocation carries the coverage args.
        let requests = runner.requests();
        assert!(requests[0].command.contains(&"--cov=src".to_string()));
    }

    #[test]
    fn report_overwrites_a_prior_one() {
        let project = TestProject::new().expect("project");
        fs::write(&project.paths().report_path, "stale").expect("write stale");
        let final_result = TestResult::from_exit(0, "fresh run".to_string());
        let runner =
            ScriptedTestRunner::new(vec![TestResult::from_exit(0, String::new())]);

        write_report(
            &project.paths(),
            &final_result,
            1,
            &runner,
            &LoopConfig::default(),
        )
        .expect("report");

        let report = fs::read_to_string(&project.paths().report_path).expect("read");
        assert!(!report.contains("stale"));
        assert!(report.contains("fresh run"));
    }

    #[test]
    fn failed_coverage_run_still_produces_a_report() {
        let project = TestProject::new().expect("project");
        let final_result = TestResult::from_exit(0, "ok".to_string());
        let runner = ScriptedTestRunner::new(vec![TestResult::invocation_failure(
            "coverage plugin missing",
        )]);

        let path = write_report(
            &project.paths(),
            &final_result,
            2,
            &runner,
            &LoopConfig::default(),
        )
        .expect("report");

        let report = fs::read_to_string(path).expect("read");
        assert!(report.contains("coverage plugin missing"));
    }
}
