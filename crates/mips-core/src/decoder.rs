//! Mnemonic decoder and executor dispatch.

use crate::encoding::OpcodeEncoding;
use crate::error::SimError;
use crate::execute::{execute_instruction, ExecuteState};
use crate::state::RegisterFile;
use crate::tokenizer::ParsedInstruction;

/// Maps mnemonics onto the executor of their instruction.
///
/// Operand counts are validated by the executors, so a known mnemonic with
/// bad operands is reported as an operand error rather than a decode error.
pub struct Decoder;

impl Decoder {
    /// Decodes a mnemonic.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownInstruction`] when the mnemonic is not in the
    /// opcode table.
    pub fn decode(mnemonic: &str) -> Result<OpcodeEncoding, SimError> {
        OpcodeEncoding::from_mnemonic(mnemonic)
            .ok_or_else(|| SimError::UnknownInstruction(mnemonic.to_string()))
    }

    /// Decodes a tokenized line and runs its executor.
    ///
    /// # Errors
    ///
    /// Returns the decode error or the executor's operand error.
    pub fn dispatch(
        parsed: &ParsedInstruction<'_>,
        registers: &RegisterFile,
    ) -> Result<ExecuteState, SimError> {
        let encoding = Self::decode(parsed.mnemonic)?;
        execute_instruction(encoding, &parsed.operands, registers)
    }
}
