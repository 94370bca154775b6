//! Supported mnemonics with their instruction format and encoding numbers.

/// Primary opcode shared by every R-format instruction.
pub const R_FORMAT_OPCODE: u8 = 0x0;

/// Instruction formats of the architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum InstructionFormat {
    /// Three registers and a function code.
    Register,
    /// Two registers and a 16-bit immediate (including branches).
    Immediate,
    /// A single absolute address.
    Jump,
}

/// Operand shape expected by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandForm {
    /// `rd, rs, rt`.
    ThreeRegisters,
    /// `rt, rs, immediate`.
    RegistersImmediate,
    /// `rs, rt, address`.
    RegistersTarget,
    /// `address`.
    Address,
}

impl OperandForm {
    /// Number of operands for this form.
    #[must_use]
    pub const fn operand_count(self) -> usize {
        match self {
            Self::ThreeRegisters | Self::RegistersImmediate | Self::RegistersTarget => 3,
            Self::Address => 1,
        }
    }

    /// Operand placeholders shown by the help listing.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::ThreeRegisters => "registrador0, registrador1, registrador2",
            Self::RegistersImmediate => "registrador0, registrador1, imediato",
            Self::RegistersTarget => "registrador0, registrador1, endereço",
            Self::Address => "endereço",
        }
    }
}

/// Supported instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum OpcodeEncoding {
    Add,
    Sub,
    Addu,
    Subu,
    Mult,
    And,
    Or,
    Addi,
    Andi,
    Ori,
    Beq,
    Bne,
    Blez,
    Bgtz,
    J,
}

/// One row of [`OPCODE_ENCODING_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    /// Mnemonic, matched case-sensitively.
    pub mnemonic: &'static str,
    /// Instruction selected by the mnemonic.
    pub encoding: OpcodeEncoding,
    /// Instruction format.
    pub format: InstructionFormat,
    /// Operand shape.
    pub operands: OperandForm,
    /// `funct` field for R-format rows, primary opcode otherwise.
    pub code: u8,
}

const fn entry(
    mnemonic: &'static str,
    encoding: OpcodeEncoding,
    format: InstructionFormat,
    operands: OperandForm,
    code: u8,
) -> OpcodeEntry {
    OpcodeEntry {
        mnemonic,
        encoding,
        format,
        operands,
        code,
    }
}

/// Canonical mnemonic table, grouped by format in help-listing order.
pub const OPCODE_ENCODING_TABLE: [OpcodeEntry; 15] = {
    use InstructionFormat::{Immediate, Jump, Register};
    use OperandForm::{Address, RegistersImmediate, RegistersTarget, ThreeRegisters};

    [
        entry("ADD", OpcodeEncoding::Add, Register, ThreeRegisters, 0x20),
        entry("SUB", OpcodeEncoding::Sub, Register, ThreeRegisters, 0x22),
        entry("ADDU", OpcodeEncoding::Addu, Register, ThreeRegisters, 0x21),
        entry("SUBU", OpcodeEncoding::Subu, Register, ThreeRegisters, 0x23),
        entry("MULT", OpcodeEncoding::Mult, Register, ThreeRegisters, 0x18),
        entry("AND", OpcodeEncoding::And, Register, ThreeRegisters, 0x24),
        entry("OR", OpcodeEncoding::Or, Register, ThreeRegisters, 0x25),
        entry("ADDI", OpcodeEncoding::Addi, Immediate, RegistersImmediate, 0x08),
        entry("ANDI", OpcodeEncoding::Andi, Immediate, RegistersImmediate, 0x0C),
        entry("ORI", OpcodeEncoding::Ori, Immediate, RegistersImmediate, 0x0D),
        entry("BEQ", OpcodeEncoding::Beq, Immediate, RegistersTarget, 0x04),
        entry("BNE", OpcodeEncoding::Bne, Immediate, RegistersTarget, 0x05),
        entry("BLEZ", OpcodeEncoding::Blez, Immediate, RegistersTarget, 0x06),
        entry("BGTZ", OpcodeEncoding::Bgtz, Immediate, RegistersTarget, 0x07),
        entry("J", OpcodeEncoding::J, Jump, Address, 0x02),
    ]
};

impl OpcodeEncoding {
    /// Looks up a mnemonic (case-sensitive).
    #[must_use]
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        OPCODE_ENCODING_TABLE
            .iter()
            .find(|entry| entry.mnemonic == mnemonic)
            .map(|entry| entry.encoding)
    }

    /// Returns the table row for this instruction.
    #[must_use]
    pub const fn entry(self) -> OpcodeEntry {
        OPCODE_ENCODING_TABLE[self as usize]
    }

    /// Returns the canonical mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        self.entry().mnemonic
    }

    /// Returns the instruction format.
    #[must_use]
    pub const fn format(self) -> InstructionFormat {
        self.entry().format
    }

    /// Returns the operand shape.
    #[must_use]
    pub const fn operands(self) -> OperandForm {
        self.entry().operands
    }

    /// Primary opcode field (0 for every R-format instruction).
    #[must_use]
    pub const fn opcode(self) -> u8 {
        match self.format() {
            InstructionFormat::Register => R_FORMAT_OPCODE,
            InstructionFormat::Immediate | InstructionFormat::Jump => self.entry().code,
        }
    }

    /// `funct` field of an R-format instruction.
    #[must_use]
    pub const fn funct(self) -> Option<u8> {
        match self.format() {
            InstructionFormat::Register => Some(self.entry().code),
            InstructionFormat::Immediate | InstructionFormat::Jump => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{InstructionFormat, OpcodeEncoding, OperandForm, OPCODE_ENCODING_TABLE};

    #[test]
    fn table_rows_are_indexed_by_encoding_discriminant() {
        for (index, entry) in OPCODE_ENCODING_TABLE.iter().enumerate() {
            assert_eq!(entry.encoding as usize, index, "{}", entry.mnemonic);
            assert_eq!(entry.encoding.entry(), *entry);
        }
    }

    #[test]
    fn mnemonics_are_unique_and_resolve_to_their_row() {
        for entry in &OPCODE_ENCODING_TABLE {
            assert_eq!(
                OpcodeEncoding::from_mnemonic(entry.mnemonic),
                Some(entry.encoding)
            );
        }
    }

    #[rstest]
    #[case("add")]
    #[case("Add")]
    #[case("NOP")]
    #[case("ADD ")]
    #[case("")]
    fn lookup_is_case_sensitive_and_exact(#[case] mnemonic: &str) {
        assert_eq!(OpcodeEncoding::from_mnemonic(mnemonic), None);
    }

    #[rstest]
    #[case(OpcodeEncoding::Add, 0x0, Some(0x20))]
    #[case(OpcodeEncoding::Addu, 0x0, Some(0x21))]
    #[case(OpcodeEncoding::Sub, 0x0, Some(0x22))]
    #[case(OpcodeEncoding::Subu, 0x0, Some(0x23))]
    #[case(OpcodeEncoding::Mult, 0x0, Some(0x18))]
    #[case(OpcodeEncoding::And, 0x0, Some(0x24))]
    #[case(OpcodeEncoding::Or, 0x0, Some(0x25))]
    #[case(OpcodeEncoding::Addi, 0x8, None)]
    #[case(OpcodeEncoding::Andi, 0xC, None)]
    #[case(OpcodeEncoding::Ori, 0xD, None)]
    #[case(OpcodeEncoding::Beq, 0x4, None)]
    #[case(OpcodeEncoding::Bne, 0x5, None)]
    #[case(OpcodeEncoding::Blez, 0x6, None)]
    #[case(OpcodeEncoding::Bgtz, 0x7, None)]
    #[case(OpcodeEncoding::J, 0x2, None)]
    fn encoding_numbers_match_the_architecture(
        #[case] encoding: OpcodeEncoding,
        #[case] opcode: u8,
        #[case] funct: Option<u8>,
    ) {
        assert_eq!(encoding.opcode(), opcode);
        assert_eq!(encoding.funct(), funct);
    }

    #[test]
    fn operand_counts_follow_format() {
        for entry in &OPCODE_ENCODING_TABLE {
            let expected = match entry.format {
                InstructionFormat::Jump => 1,
                InstructionFormat::Register | InstructionFormat::Immediate => 3,
            };
            assert_eq!(entry.operands.operand_count(), expected);
        }
        assert_eq!(OperandForm::Address.template(), "endereço");
    }
}
