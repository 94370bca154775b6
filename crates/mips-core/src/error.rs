use thiserror::Error;

/// Prefix printed in front of every diagnostic line.
pub const ERROR_PREFIX: &str = "ERRO: ";

/// Error classes used for logging and outcome aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ErrorClass {
    /// The line could not be split into a mnemonic and operands.
    Syntax,
    /// The mnemonic is not part of the instruction set.
    Decode,
    /// The mnemonic is known but its operands are unusable.
    Operand,
}

/// Diagnostics raised while tokenizing, decoding or executing one input line.
///
/// Every variant is local to a single cycle: the line is reported and the
/// session continues with the next one. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SimError {
    /// The line contained no mnemonic token.
    #[error("Nenhuma tag fornecida")]
    NoMnemonic,
    /// More comma-separated operands than any instruction accepts.
    #[error("Foram providos mais argumentos do que os {max} permitidos")]
    TooManyOperands {
        /// Maximum operand count accepted by the tokenizer.
        max: usize,
    },
    /// The mnemonic did not match any supported instruction.
    #[error("\"{0}\" não é uma tag válida")]
    UnknownInstruction(String),
    /// The instruction received the wrong number of operands.
    #[error(
        "Quantidade inesperada de argumentos, eram esperados {expected} e foram recebidos {actual}"
    )]
    ArgumentCountMismatch {
        /// Operand count required by the instruction format.
        expected: usize,
        /// Operand count found on the line.
        actual: usize,
    },
    /// An operand is not a valid register name.
    #[error("Instrução inválida, registrador não encontrado")]
    RegisterNotFound(String),
    /// An immediate or branch target is not a base-10 integer in range.
    #[error("Instrução inválida, número imediato inválido")]
    InvalidImmediate(String),
    /// A jump address is not a non-negative base-10 integer in range.
    #[error("Instrução inválida, endereço inválido")]
    InvalidAddress(String),
}

impl SimError {
    /// Returns the class of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NoMnemonic | Self::TooManyOperands { .. } => ErrorClass::Syntax,
            Self::UnknownInstruction(_) => ErrorClass::Decode,
            Self::ArgumentCountMismatch { .. }
            | Self::RegisterNotFound(_)
            | Self::InvalidImmediate(_)
            | Self::InvalidAddress(_) => ErrorClass::Operand,
        }
    }

    /// An unrecognised instruction is never fetched, so the cycle must not
    /// advance the program counter for it.
    #[must_use]
    pub const fn suppresses_pc_advance(&self) -> bool {
        matches!(self, Self::UnknownInstruction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorClass, SimError, ERROR_PREFIX};

    #[test]
    fn only_unknown_instruction_suppresses_the_advance() {
        assert!(SimError::UnknownInstruction("FOO".into()).suppresses_pc_advance());
        assert!(!SimError::NoMnemonic.suppresses_pc_advance());
        assert!(!SimError::TooManyOperands { max: 3 }.suppresses_pc_advance());
        assert!(!SimError::RegisterNotFound("$x9".into()).suppresses_pc_advance());
        assert!(!SimError::InvalidImmediate("abc".into()).suppresses_pc_advance());
        assert!(!SimError::InvalidAddress("-4".into()).suppresses_pc_advance());
    }

    #[test]
    fn class_mapping_matches_pipeline_stage() {
        assert_eq!(SimError::NoMnemonic.class(), ErrorClass::Syntax);
        assert_eq!(
            SimError::TooManyOperands { max: 3 }.class(),
            ErrorClass::Syntax
        );
        assert_eq!(
            SimError::UnknownInstruction("NOP".into()).class(),
            ErrorClass::Decode
        );
        assert_eq!(
            SimError::ArgumentCountMismatch {
                expected: 3,
                actual: 1
            }
            .class(),
            ErrorClass::Operand
        );
    }

    #[test]
    fn messages_render_with_their_parameters() {
        assert_eq!(
            format!("{ERROR_PREFIX}{}", SimError::UnknownInstruction("FOO".into())),
            "ERRO: \"FOO\" não é uma tag válida"
        );
        assert_eq!(
            SimError::ArgumentCountMismatch {
                expected: 1,
                actual: 2
            }
            .to_string(),
            "Quantidade inesperada de argumentos, eram esperados 1 e foram recebidos 2"
        );
        assert_eq!(
            SimError::TooManyOperands { max: 3 }.to_string(),
            "Foram providos mais argumentos do que os 3 permitidos"
        );
    }
}
