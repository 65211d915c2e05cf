//! Stable exit codes for devloop CLI commands.

/// Run finished with the test suite passing.
pub const OK: i32 = 0;
/// Iteration cap exhausted, fatal error, or user interrupt.
pub const FAILURE: i32 = 1;
