//! Terminal front end for the `mips-core` simulator.

use env_logger as _;
#[cfg(test)]
use tempfile as _;

/// REPL error type.
pub mod errors;
pub use errors::ReplError;

/// Instruction summary printed by `HELP`.
pub mod help;
pub use help::help_text;

/// Fixed-width register table printed by `DEBUG`.
pub mod table;
pub use table::render_registers;

/// Line-driven session loop.
pub mod session;
pub use session::{Command, Session, SessionEnd};
