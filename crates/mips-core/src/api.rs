//! Host-facing session API used by the REPL and the WebAssembly bindings.

use std::fmt;

use crate::error::{SimError, ERROR_PREFIX};
use crate::execute::step_line;
use crate::state::ProgramState;
use crate::trace::TraceRecord;

/// Default limit of usable characters per input line.
pub const DEFAULT_MAX_LINE_CHARS: usize = 63;

/// Immutable configuration of a simulator session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SimulatorConfig {
    /// Lines longer than this many characters are truncated before decoding.
    pub max_line_chars: usize,
    /// Whether hosts should print trace records of executed instructions.
    pub tracing_enabled: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_line_chars: DEFAULT_MAX_LINE_CHARS,
            tracing_enabled: true,
        }
    }
}

/// Result of one cycle, tagged with the PC the line was fetched at.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// The instruction executed and produced a trace record.
    Executed {
        /// PC of the executed line.
        pc: u32,
        /// Trace record of the instruction.
        record: TraceRecord,
    },
    /// The line was rejected; no register was written.
    Rejected {
        /// PC of the rejected line.
        pc: u32,
        /// Reason for the rejection.
        error: SimError,
    },
}

impl StepOutcome {
    /// Returns the trace record of an executed line.
    #[must_use]
    pub const fn record(&self) -> Option<&TraceRecord> {
        match self {
            Self::Executed { record, .. } => Some(record),
            Self::Rejected { .. } => None,
        }
    }

    /// Returns the error of a rejected line.
    #[must_use]
    pub const fn error(&self) -> Option<&SimError> {
        match self {
            Self::Executed { .. } => None,
            Self::Rejected { error, .. } => Some(error),
        }
    }

    /// PC the line was fetched at.
    #[must_use]
    pub const fn pc(&self) -> u32 {
        match self {
            Self::Executed { pc, .. } | Self::Rejected { pc, .. } => *pc,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executed { record, .. } => write!(f, "{record}"),
            Self::Rejected { error, .. } => write!(f, "{ERROR_PREFIX}{error}"),
        }
    }
}

/// One simulator session: configuration plus the state it mutates.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    state: ProgramState,
}

impl Simulator {
    /// Creates a session with a zeroed state.
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            state: ProgramState::default(),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Returns the architectural state.
    #[must_use]
    pub const fn state(&self) -> &ProgramState {
        &self.state
    }

    /// Returns the architectural state for direct manipulation.
    pub const fn state_mut(&mut self) -> &mut ProgramState {
        &mut self.state
    }

    /// Resets PC and registers to zero.
    pub fn reset(&mut self) {
        self.state = ProgramState::default();
    }

    /// Executes one input line.
    pub fn execute_line(&mut self, line: &str) -> StepOutcome {
        let line = self.truncate(line);
        let pc = self.state.pc();

        let outcome = match step_line(&mut self.state, line) {
            Ok(record) => StepOutcome::Executed { pc, record },
            Err(error) => StepOutcome::Rejected { pc, error },
        };

        match &outcome {
            StepOutcome::Executed { record, .. } => {
                log::debug!("pc={pc} {line:?} -> {record} (next pc={})", self.state.pc());
            }
            StepOutcome::Rejected { error, .. } => {
                log::debug!(
                    "pc={pc} {line:?} rejected ({:?}): {error} (next pc={})",
                    error.class(),
                    self.state.pc()
                );
            }
        }

        outcome
    }

    fn truncate<'a>(&self, line: &'a str) -> &'a str {
        let limit = self.config.max_line_chars;
        match line.char_indices().nth(limit) {
            Some((cut, _)) => {
                log::warn!(
                    "line longer than {limit} characters truncated: {:?}",
                    &line[cut..]
                );
                &line[..cut]
            }
            None => line,
        }
    }
}
