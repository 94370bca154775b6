//! Operand validation and conversion shared by the executors.

use crate::error::SimError;
use crate::state::{RegisterFile, RegisterSlot};

/// Checks the operand count of an instruction.
pub(super) const fn expect_operands(operands: &[&str], expected: usize) -> Result<(), SimError> {
    if operands.len() == expected {
        Ok(())
    } else {
        Err(SimError::ArgumentCountMismatch {
            expected,
            actual: operands.len(),
        })
    }
}

/// Resolves a register operand together with its current value.
pub(super) fn read_operand(
    registers: &RegisterFile,
    name: &str,
) -> Result<(RegisterSlot, i32), SimError> {
    let slot = RegisterSlot::resolve(name)?;
    Ok((slot, registers.read(slot)))
}

/// Parses a base-10 signed integer that must span the whole operand.
pub(super) fn parse_decimal(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Parses an I-format immediate.
pub(super) fn parse_immediate(text: &str) -> Result<i32, SimError> {
    parse_decimal(text)
        .and_then(|value| i32::try_from(value).ok())
        .ok_or_else(|| SimError::InvalidImmediate(text.to_string()))
}

/// Parses a branch target; reported as an immediate like any I-format field.
pub(super) fn parse_branch_target(text: &str) -> Result<u32, SimError> {
    parse_decimal(text)
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| SimError::InvalidImmediate(text.to_string()))
}

/// Parses a jump address.
pub(super) fn parse_address(text: &str) -> Result<u32, SimError> {
    parse_decimal(text)
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| SimError::InvalidAddress(text.to_string()))
}
