//! Second pass: turn each operand into an opcode field.

use crate::diag::{DiagnosticKind, Diagnostics};
use crate::error::AsmError;
use crate::hex;
use crate::instruction::{Instruction, Operand};
use crate::mnemonic::Kind;
use crate::symtab::SymbolTable;

/// Width of a 3-byte instruction in hex digits.
pub const OPCODE_DIGITS: usize = 6;

/// Resolve every opcode in place.
///
/// Unresolvable lines are reported to `diags` and keep `opcode == None`; the
/// pass always covers the whole list. Opcodes are recomputed from scratch so
/// running it twice gives the same result.
pub fn resolve(instructions: &mut [Instruction], diags: &mut Diagnostics) -> Result<(), AsmError> {
    let storage = SymbolTable::storage(instructions);
    let labels = SymbolTable::all(instructions);
    for s in storage.iter() {
        tracing::debug!(
            address = s.address.as_deref().unwrap_or("-"),
            label = %s.name,
            line = s.line,
            "SYMTAB"
        );
    }

    for instr in instructions.iter_mut() {
        instr.opcode = resolve_one(instr, &storage, &labels, diags)?;
    }
    Ok(())
}

fn resolve_one(
    instr: &Instruction,
    storage: &SymbolTable,
    labels: &SymbolTable,
    diags: &mut Diagnostics,
) -> Result<Option<String>, AsmError> {
    let kind = match instr.mnemonic.kind() {
        Some(Kind::Start | Kind::End | Kind::Resw | Kind::Resb) => return Ok(None),
        Some(kind) => kind,
        None => {
            diags.push(
                instr.line,
                DiagnosticKind::UnknownMnemonic {
                    mnemonic: instr.mnemonic.to_string(),
                },
            );
            return Ok(None);
        }
    };
    let opcode = instr.mnemonic.opcode().unwrap_or_default();

    match (&instr.operand, kind) {
        (Operand::None, _) => Ok(Some(hex::pad_right(&opcode, OPCODE_DIGITS))),
        (Operand::Literal(value), Kind::Word) => {
            let field = hex::format_hex_to_length(value, OPCODE_DIGITS)
                .map_err(AsmError::hex(instr.line, instr.source()))?;
            if field.len() > OPCODE_DIGITS {
                diags.push(
                    instr.line,
                    DiagnosticKind::OperandTooWide {
                        operand: value.clone(),
                    },
                );
            }
            Ok(Some(field))
        }
        (Operand::Indexed { label, .. }, _) => match storage.address(label) {
            Some(address) => {
                let field =
                    indexed_field(address).map_err(AsmError::hex(instr.line, instr.source()))?;
                Ok(Some(format!("{opcode}{field}")))
            }
            None => {
                unresolved(instr, label, diags);
                Ok(None)
            }
        },
        (Operand::Direct(label) | Operand::Literal(label), _) => match labels.address(label) {
            Some(address) => Ok(Some(hex::pad_right(
                &format!("{opcode}{address}"),
                OPCODE_DIGITS,
            ))),
            None => {
                unresolved(instr, label, diags);
                Ok(None)
            }
        },
    }
}

/// Digits in the 16-bit address field of an indexed instruction.
pub const ADDRESS_FIELD_DIGITS: usize = 4;

/// Address field with the most significant bit set as the index flag.
///
/// Short addresses are widened to the full field first, so `39` gives `8039`.
pub fn indexed_field(address: &str) -> Result<String, hex::HexError> {
    let field = hex::format_hex_to_length(address, ADDRESS_FIELD_DIGITS)?;
    let mut bits = hex::bits_of(&field)?;
    bits.set(0, true);
    Ok(hex::hex_of_bits(&bits))
}

fn unresolved(instr: &Instruction, label: &str, diags: &mut Diagnostics) {
    diags.push(
        instr.line,
        DiagnosticKind::UnresolvedSymbol {
            mnemonic: instr.mnemonic.to_string(),
            label: label.to_string(),
        },
    );
}
