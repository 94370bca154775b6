use std::fmt::Write as _;

use mips_core::{InstructionFormat, OPCODE_ENCODING_TABLE};

const SECTIONS: [(InstructionFormat, &str); 3] = [
    (InstructionFormat::Register, "R"),
    (InstructionFormat::Immediate, "I"),
    (InstructionFormat::Jump, "J"),
];

/// Builds the Portuguese instruction summary, one section per format.
#[must_use]
pub fn help_text() -> String {
    let mut text = String::from("\nHELP\n\n");

    for (format, label) in SECTIONS {
        let _ = write!(text, "Instruções {label}\n\n");
        for entry in OPCODE_ENCODING_TABLE.iter().filter(|e| e.format == format) {
            let _ = writeln!(text, "{} {}", entry.mnemonic, entry.operands.template());
        }
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::help_text;

    #[test]
    fn lists_every_section_in_order() {
        let text = help_text();

        let r = text.find("Instruções R").unwrap();
        let i = text.find("Instruções I").unwrap();
        let j = text.find("Instruções J").unwrap();
        assert!(r < i && i < j);
        assert!(text.starts_with("\nHELP\n\n"));
        assert!(text.ends_with("J endereço\n\n"));
    }

    #[test]
    fn branches_are_listed_with_immediates() {
        let text = help_text();
        let i_section = &text[text.find("Instruções I").unwrap()..text.find("Instruções J").unwrap()];

        assert!(i_section.contains("ADDI registrador0, registrador1, imediato\n"));
        assert!(i_section.contains("BGTZ registrador0, registrador1, endereço\n"));
        assert_eq!(i_section.lines().filter(|l| !l.is_empty()).count(), 8);
    }
}
