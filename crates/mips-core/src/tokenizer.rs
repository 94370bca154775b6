//! Line tokenizer: `MNEMONIC op1, op2, op3`.

use crate::error::SimError;

/// Maximum operand count of any instruction.
pub const MAX_OPERANDS: usize = 3;

/// One input line split into its mnemonic and operand strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInstruction<'a> {
    /// Mnemonic exactly as written.
    pub mnemonic: &'a str,
    /// Trimmed operands in source order.
    pub operands: Vec<&'a str>,
}

/// Characters trimmed around mnemonics and operands.
#[must_use]
pub const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Trims leading and trailing blanks.
#[must_use]
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_blank)
}

/// Splits a line into mnemonic and operands.
///
/// Empty segments between consecutive commas are skipped; a segment holding
/// only blanks still counts as an (empty) operand.
///
/// # Errors
///
/// Returns [`SimError::NoMnemonic`] for a blank line and
/// [`SimError::TooManyOperands`] when more than [`MAX_OPERANDS`] operands are
/// present.
pub fn tokenize(line: &str) -> Result<ParsedInstruction<'_>, SimError> {
    let trimmed = trim_blank(line);
    if trimmed.is_empty() {
        return Err(SimError::NoMnemonic);
    }

    let (mnemonic, rest) = trimmed.split_once(is_blank).unwrap_or((trimmed, ""));

    let mut operands = Vec::with_capacity(MAX_OPERANDS);
    for segment in rest.split(',').filter(|segment| !segment.is_empty()) {
        if operands.len() == MAX_OPERANDS {
            return Err(SimError::TooManyOperands { max: MAX_OPERANDS });
        }
        operands.push(trim_blank(segment));
    }

    Ok(ParsedInstruction { mnemonic, operands })
}
