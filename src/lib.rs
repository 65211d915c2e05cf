//! Autonomous TDD loop harness.
//!
//! Drives an external coding-assistant CLI through a test-driven development
//! loop: scaffold the project layout, send an implementation prompt, run the
//! test suite, feed failures back as debug prompts, and repeat until the
//! suite passes or an iteration cap is reached. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure data types and decisions. No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, process execution,
//!   the assistant bridge). Behind traits to enable scripted fakes in tests.
//!
//! [`looping`] and [`report`] coordinate core logic with I/O to implement
//! the CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod looping;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
