//! Architectural state: program counter and register file.

/// Register file storage and register-name resolution.
pub mod registers;

pub use registers::{
    canonical_index, resolve, RegisterFile, RegisterGroup, RegisterSlot, REGISTER_COUNT,
};

/// Byte distance between consecutive instructions.
pub const INSTRUCTION_BYTES: u32 = 4;

/// Program counter plus register file, mutated in place by every cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ProgramState {
    program_counter: u32,
    registers: RegisterFile,
}

impl ProgramState {
    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u32 {
        self.program_counter
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: u32) {
        self.program_counter = value;
    }

    /// Borrows the register file.
    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Mutably borrows the register file.
    pub const fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    /// Starts a cycle by forcing `$zero` back to 0.
    ///
    /// Returns the value a previous instruction left in `$zero`, if any.
    pub fn begin_cycle(&mut self) -> Option<i32> {
        self.registers.reset_zero()
    }

    /// Ends a cycle: jumps to `target` when an instruction set one, otherwise
    /// moves to the next instruction.
    pub const fn advance(&mut self, target: Option<u32>) {
        self.program_counter = match target {
            Some(address) => address,
            None => self.program_counter.wrapping_add(INSTRUCTION_BYTES),
        };
    }
}
