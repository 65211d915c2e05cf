//! I/O helpers for devloop commands.

pub mod assistant;
pub mod config;
pub mod init;
pub mod iteration_log;
pub mod process;
pub mod prompt;
pub mod requirements;
pub mod test_runner;
