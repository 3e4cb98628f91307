use std::fmt::Write;

use crate::instruction::Instruction;

/// Tab-delimited listing, one row per source line:
/// `line, address, label, mnemonic, operand, opcode`.
///
/// `START`/`END` rows leave the address column empty.
pub fn render(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for instr in instructions {
        let address = if instr.is_control() {
            ""
        } else {
            instr.address.as_deref().unwrap_or("")
        };
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            instr.line,
            address,
            instr.label.as_deref().unwrap_or(""),
            instr.mnemonic,
            instr.operand,
            instr.opcode.as_deref().unwrap_or(""),
        );
    }
    out
}
