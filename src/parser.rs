use crate::error::AsmError;
use crate::instruction::{Instruction, Operand};
use crate::mnemonic::{Kind, Mnemonic};

/// Field separators: runs of spaces and tabs.
fn is_delim(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split one source line into an [`Instruction`].
///
/// 1 field is a bare mnemonic, 2 are mnemonic + operand, 3 are label +
/// mnemonic + operand. No addresses or opcodes are assigned here.
pub fn parse_line(line: usize, text: &str) -> Result<Instruction, AsmError> {
    let fields: Vec<&str> = text.split(is_delim).filter(|f| !f.is_empty()).collect();
    tracing::trace!(line, fields = fields.len(), "parsed fields");

    let (label, name, operand) = match fields.as_slice() {
        [name] => (None, *name, None),
        [name, operand] => (None, *name, Some(*operand)),
        [label, name, operand] => (Some(label.to_string()), *name, Some(*operand)),
        _ => {
            return Err(AsmError::InstructionFormat {
                line,
                content: text.to_string(),
                found: fields.len(),
            })
        }
    };

    let mnemonic = Mnemonic::lookup(name);
    let operand = operand
        .map(|raw| classify(&mnemonic, raw))
        .unwrap_or_default();
    Ok(Instruction::new(line, label, mnemonic, operand))
}

fn classify(mnemonic: &Mnemonic, raw: &str) -> Operand {
    match mnemonic.kind() {
        Some(Kind::Start | Kind::Word | Kind::Resw | Kind::Resb) => Operand::Literal(raw.to_string()),
        _ => match raw.split_once(',') {
            Some((label, index)) => Operand::Indexed {
                label: label.to_string(),
                index: index.to_string(),
            },
            None => Operand::Direct(raw.to_string()),
        },
    }
}
