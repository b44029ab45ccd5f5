//! Command-line interface: argument parsing and command dispatch.
//!
//! The commands are thin glue: they collect paths, pick a manifest, and call
//! into the engine. All real invariants live in `engine`.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};

/// Process exit codes.
///
/// `NothingToDo` covers the normal negative outcomes (no manifest found, no
/// managed files) that are reported but are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    NothingToDo = 3,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}
