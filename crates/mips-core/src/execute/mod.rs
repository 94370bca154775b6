//! Instruction execution pipeline.
//!
//! Every cycle runs the same sequence:
//! 1. Reset `$zero`
//! 2. Tokenize the line
//! 3. Dispatch the mnemonic to its executor
//! 4. Resolve and validate operands, compute the result and the next PC
//! 5. Commit the register write
//! 6. Advance the PC (explicit target, or the next word)
//!
//! Executors only compute an [`ExecuteState`]; nothing is written until
//! [`commit_execution`], so a rejected instruction leaves no partial effects.

#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

mod helpers;

use crate::decoder::Decoder;
use crate::encoding::OpcodeEncoding;
use crate::error::SimError;
use crate::state::{ProgramState, RegisterFile, RegisterSlot};
use crate::tokenizer::tokenize;
use crate::trace::TraceRecord;

use helpers::{
    expect_operands, parse_address, parse_branch_target, parse_immediate, read_operand,
};

/// A pending register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Destination register.
    pub slot: RegisterSlot,
    /// Value to store.
    pub value: i32,
}

/// Side effects computed by an executor, applied by [`commit_execution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteState {
    /// Register write, if the instruction has a destination.
    pub dest: Option<RegisterWrite>,
    /// Next PC when a jump or taken branch overrides the sequential advance.
    pub next_pc: Option<u32>,
    /// Trace record of the instruction.
    pub record: TraceRecord,
}

impl ExecuteState {
    const fn new(record: TraceRecord) -> Self {
        Self {
            dest: None,
            next_pc: None,
            record,
        }
    }
}

#[derive(Clone, Copy)]
enum AluOp {
    Add,
    AddUnsigned,
    Sub,
    SubUnsigned,
    Mult,
    And,
    Or,
}

impl AluOp {
    const fn apply(self, lhs: i32, rhs: i32) -> i32 {
        match self {
            Self::Add => lhs.wrapping_add(rhs),
            Self::AddUnsigned => (lhs as u32).wrapping_add(rhs as u32) as i32,
            Self::Sub => lhs.wrapping_sub(rhs),
            Self::SubUnsigned => (lhs as u32).wrapping_sub(rhs as u32) as i32,
            Self::Mult => lhs.wrapping_mul(rhs),
            Self::And => lhs & rhs,
            Self::Or => lhs | rhs,
        }
    }
}

#[derive(Clone, Copy)]
enum BranchOp {
    Eq,
    Ne,
    Le,
    Gt,
}

impl BranchOp {
    const fn taken(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
        }
    }
}

/// Runs the executor for `encoding` against the current register values.
///
/// # Errors
///
/// Returns the operand error of the first operand that fails validation.
pub fn execute_instruction(
    encoding: OpcodeEncoding,
    operands: &[&str],
    registers: &RegisterFile,
) -> Result<ExecuteState, SimError> {
    match encoding {
        OpcodeEncoding::Add => execute_alu(encoding, operands, registers, AluOp::Add),
        OpcodeEncoding::Addu => execute_alu(encoding, operands, registers, AluOp::AddUnsigned),
        OpcodeEncoding::Sub => execute_alu(encoding, operands, registers, AluOp::Sub),
        OpcodeEncoding::Subu => execute_alu(encoding, operands, registers, AluOp::SubUnsigned),
        OpcodeEncoding::Mult => execute_alu(encoding, operands, registers, AluOp::Mult),
        OpcodeEncoding::And => execute_alu(encoding, operands, registers, AluOp::And),
        OpcodeEncoding::Or => execute_alu(encoding, operands, registers, AluOp::Or),
        OpcodeEncoding::Addi => execute_alu_immediate(encoding, operands, registers, AluOp::Add),
        OpcodeEncoding::Andi => execute_alu_immediate(encoding, operands, registers, AluOp::And),
        OpcodeEncoding::Ori => execute_alu_immediate(encoding, operands, registers, AluOp::Or),
        OpcodeEncoding::Beq => execute_branch(encoding, operands, registers, BranchOp::Eq),
        OpcodeEncoding::Bne => execute_branch(encoding, operands, registers, BranchOp::Ne),
        OpcodeEncoding::Blez => execute_branch(encoding, operands, registers, BranchOp::Le),
        OpcodeEncoding::Bgtz => execute_branch(encoding, operands, registers, BranchOp::Gt),
        OpcodeEncoding::J => execute_jump(encoding, operands),
    }
}

fn execute_alu(
    encoding: OpcodeEncoding,
    operands: &[&str],
    registers: &RegisterFile,
    op: AluOp,
) -> Result<ExecuteState, SimError> {
    expect_operands(operands, 3)?;

    let rd = RegisterSlot::resolve(operands[0])?;
    let (rs, lhs) = read_operand(registers, operands[1])?;
    let (rt, rhs) = read_operand(registers, operands[2])?;

    let mut exec = ExecuteState::new(TraceRecord::register(encoding, rd, rs, rt));
    exec.dest = Some(RegisterWrite {
        slot: rd,
        value: op.apply(lhs, rhs),
    });
    Ok(exec)
}

fn execute_alu_immediate(
    encoding: OpcodeEncoding,
    operands: &[&str],
    registers: &RegisterFile,
    op: AluOp,
) -> Result<ExecuteState, SimError> {
    expect_operands(operands, 3)?;

    let rt = RegisterSlot::resolve(operands[0])?;
    let (rs, lhs) = read_operand(registers, operands[1])?;
    let immediate = parse_immediate(operands[2])?;

    let mut exec = ExecuteState::new(TraceRecord::immediate(encoding, rt, rs, immediate));
    exec.dest = Some(RegisterWrite {
        slot: rt,
        value: op.apply(lhs, immediate),
    });
    Ok(exec)
}

fn execute_branch(
    encoding: OpcodeEncoding,
    operands: &[&str],
    registers: &RegisterFile,
    op: BranchOp,
) -> Result<ExecuteState, SimError> {
    expect_operands(operands, 3)?;

    let (_, lhs) = read_operand(registers, operands[0])?;
    let (_, rhs) = read_operand(registers, operands[1])?;
    let target = parse_branch_target(operands[2])?;

    let mut exec = ExecuteState::new(TraceRecord::jump(encoding, target));
    if op.taken(lhs, rhs) {
        exec.next_pc = Some(target);
    }
    Ok(exec)
}

fn execute_jump(encoding: OpcodeEncoding, operands: &[&str]) -> Result<ExecuteState, SimError> {
    expect_operands(operands, 1)?;

    let address = parse_address(operands[0])?;

    let mut exec = ExecuteState::new(TraceRecord::jump(encoding, address));
    exec.next_pc = Some(address);
    Ok(exec)
}

/// Applies the side effects of a successful execution and advances the PC.
pub fn commit_execution(state: &mut ProgramState, exec: &ExecuteState) {
    if let Some(write) = exec.dest {
        state.registers_mut().write(write.slot, write.value);
    }

    state.advance(exec.next_pc);
}

/// Runs one full cycle for an input line.
///
/// Rejected lines still advance the PC by one word, except for unknown
/// mnemonics, which leave it untouched.
///
/// # Errors
///
/// Returns the tokenizer, decoder or operand error that rejected the line.
pub fn step_line(state: &mut ProgramState, line: &str) -> Result<TraceRecord, SimError> {
    if let Some(discarded) = state.begin_cycle() {
        log::trace!("discarded {discarded} written to $zero");
    }

    let executed = tokenize(line).and_then(|parsed| Decoder::dispatch(&parsed, state.registers()));

    match executed {
        Ok(exec) => {
            commit_execution(state, &exec);
            Ok(exec.record)
        }
        Err(error) => {
            if !error.suppresses_pc_advance() {
                state.advance(None);
            }
            Err(error)
        }
    }
}
