//! Decode/execute engine for a line-driven 32-register RISC instruction simulator.

/// Diagnostic taxonomy and user-facing messages.
pub mod error;
pub use error::{ErrorClass, SimError, ERROR_PREFIX};

/// Architectural state: register file and program counter.
pub mod state;
pub use state::{
    canonical_index, resolve, ProgramState, RegisterFile, RegisterGroup, RegisterSlot,
    INSTRUCTION_BYTES, REGISTER_COUNT,
};

/// Mnemonic, format and code tables of the supported instruction set.
pub mod encoding;
pub use encoding::{
    InstructionFormat, OpcodeEncoding, OpcodeEntry, OperandForm, OPCODE_ENCODING_TABLE,
    R_FORMAT_OPCODE,
};

/// Line tokenizer.
pub mod tokenizer;
pub use tokenizer::{tokenize, ParsedInstruction, MAX_OPERANDS};

/// Mnemonic decoder.
pub mod decoder;
pub use decoder::Decoder;

/// Machine-word trace records.
pub mod trace;
pub use trace::{TraceRecord, TRACE_PREFIX};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{commit_execution, execute_instruction, step_line, ExecuteState, RegisterWrite};

/// Public host-facing session API.
pub mod api;
pub use api::{Simulator, SimulatorConfig, StepOutcome, DEFAULT_MAX_LINE_CHARS};

#[cfg(test)]
use proptest as _;
