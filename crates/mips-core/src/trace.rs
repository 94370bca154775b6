//! Executed-instruction records rendered as `EXECUTE -> ...` lines.

use std::fmt;

use crate::encoding::{OpcodeEncoding, R_FORMAT_OPCODE};
use crate::state::RegisterSlot;

/// Prefix of every trace line.
pub const TRACE_PREFIX: &str = "EXECUTE -> ";

/// Machine-word fields of an executed instruction, using canonical register
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TraceRecord {
    /// `opcode=0 rs rt rd shamt=0 funct`.
    Register {
        /// First source register number.
        rs: u8,
        /// Second source register number.
        rt: u8,
        /// Destination register number.
        rd: u8,
        /// Function code.
        funct: u8,
    },
    /// `opcode rs rt immediate`.
    Immediate {
        /// Primary opcode.
        opcode: u8,
        /// Source register number.
        rs: u8,
        /// Destination register number.
        rt: u8,
        /// 16-bit immediate field.
        immediate: i16,
    },
    /// `opcode address`, used by jumps and branches.
    Jump {
        /// Primary opcode.
        opcode: u8,
        /// Absolute target address.
        address: u32,
    },
}

impl TraceRecord {
    /// Builds an R-format record for `encoding rd, rs, rt`.
    #[must_use]
    pub fn register(
        encoding: OpcodeEncoding,
        rd: RegisterSlot,
        rs: RegisterSlot,
        rt: RegisterSlot,
    ) -> Self {
        Self::Register {
            rs: rs.canonical_index(),
            rt: rt.canonical_index(),
            rd: rd.canonical_index(),
            funct: encoding.funct().unwrap_or_default(),
        }
    }

    /// Builds an I-format record for `encoding rt, rs, immediate`.
    ///
    /// Only the low 16 bits of the immediate fit the instruction field.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn immediate(
        encoding: OpcodeEncoding,
        rt: RegisterSlot,
        rs: RegisterSlot,
        immediate: i32,
    ) -> Self {
        Self::Immediate {
            opcode: encoding.opcode(),
            rs: rs.canonical_index(),
            rt: rt.canonical_index(),
            immediate: immediate as i16,
        }
    }

    /// Builds a J-format record.
    #[must_use]
    pub const fn jump(encoding: OpcodeEncoding, address: u32) -> Self {
        Self::Jump {
            opcode: encoding.opcode(),
            address,
        }
    }

    /// Primary opcode of the record.
    #[must_use]
    pub const fn opcode(&self) -> u8 {
        match self {
            Self::Register { .. } => R_FORMAT_OPCODE,
            Self::Immediate { opcode, .. } | Self::Jump { opcode, .. } => *opcode,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TRACE_PREFIX)?;
        match *self {
            Self::Register { rs, rt, rd, funct } => {
                write!(f, "{R_FORMAT_OPCODE} {rs} {rt} {rd} 0 {funct}")
            }
            Self::Immediate {
                opcode,
                rs,
                rt,
                immediate,
            } => write!(f, "{opcode} {rs} {rt} {immediate}"),
            Self::Jump { opcode, address } => write!(f, "{opcode} {address}"),
        }
    }
}
