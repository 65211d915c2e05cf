//! Autonomous TDD loop harness.
//!
//! Drives an external coding-assistant CLI through a test-driven
//! development loop: scaffold, prompt, run tests, debug, repeat until the
//! suite is green or the iteration cap is reached.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use devloop::core::types::LoopStop;
use devloop::exit_codes;
use devloop::io::assistant::bridge_from_config;
use devloop::io::config::load_config;
use devloop::io::init::{ProjectPaths, ensure_layout};
use devloop::io::test_runner::{CommandTestRunner, TestRunner, test_request};
use devloop::logging;
use devloop::looping::run_loop;

#[derive(Parser)]
#[command(
    name = "devloop",
    version,
    about = "Autonomous TDD loop harness for an external coding assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the src/ and tests/ layout if missing (idempotent).
    Init {
        /// Project directory.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Run the test command once and print the normalized result.
    Test {
        /// Project directory.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Run the full development loop.
    Run {
        /// Project directory.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    logging::init();
    install_interrupt_handler();

    let cli = Cli::parse();
    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}

/// Report interrupts distinctly from other failures, then exit non-zero.
fn install_interrupt_handler() {
    if let Err(err) = ctrlc::set_handler(|| {
        eprintln!("\ninterrupted by user");
        std::process::exit(exit_codes::FAILURE);
    }) {
        tracing::warn!(err = %err, "could not install interrupt handler");
    }
}

fn dispatch(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { dir } => cmd_init(&dir),
        Command::Test { dir } => cmd_test(&dir),
        Command::Run { dir } => cmd_run(&dir),
    }
}

fn cmd_init(dir: &Path) -> Result<i32> {
    let paths = ProjectPaths::new(dir);
    ensure_layout(&paths)?;
    println!("project layout ready at {}", paths.root.display());
    Ok(exit_codes::OK)
}

fn cmd_test(dir: &Path) -> Result<i32> {
    let paths = ProjectPaths::new(dir);
    let config = load_config(&paths.config_path)?;
    let result = CommandTestRunner.run(&test_request(&paths.root, &config, false));
    println!("{}", result.output.trim_end());
    println!("passed: {} (exit code {})", result.passed, result.exit_code);
    Ok(if result.passed {
        exit_codes::OK
    } else {
        exit_codes::FAILURE
    })
}

fn cmd_run(dir: &Path) -> Result<i32> {
    let paths = ProjectPaths::new(dir);
    let config = load_config(&paths.config_path)?;
    let assistant = bridge_from_config(&config.assistant, &paths.root);

    let outcome = run_loop(
        &paths.root,
        assistant.as_ref(),
        &CommandTestRunner,
        &config,
        |iteration| {
            println!(
                "iteration {}/{}: {}",
                iteration.iter,
                config.max_iterations,
                if iteration.result.passed { "passed" } else { "failed" }
            );
        },
    )?;

    match outcome.stop {
        LoopStop::Passed => {
            println!("all tests passed after {} iteration(s)", outcome.iterations);
            if let Some(path) = outcome.report_path {
                println!("report written to {}", path.display());
            }
            Ok(exit_codes::OK)
        }
        LoopStop::Exhausted { max_iterations } => {
            println!("max iterations ({max_iterations}) reached; development incomplete");
            Ok(exit_codes::FAILURE)
        }
    }
}
