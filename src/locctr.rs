//! First pass: lay out every line in memory.
//!
//! The counter carries the address of the line about to be placed plus the
//! previous line's `(address, size)`; the next address is their sum. It is a
//! strict forward scan, forward references wait for the second pass.

use std::collections::HashMap;

use crate::diag::{DiagnosticKind, Diagnostics};
use crate::error::AsmError;
use crate::hex;
use crate::instruction::{Instruction, Operand};
use crate::mnemonic::Kind;
use crate::parser::parse_line;

/// Highest address the 6-digit object record fields can carry.
pub const MAX_ADDRESS: u32 = 0xFF_FFFF;

#[derive(Debug, Default)]
pub struct LocationCounter {
    base: Option<String>,
    pending: Option<(String, String)>, // (address, size) of the previous line
    start_line: Option<usize>,
    labels: HashMap<String, usize>,
}

impl LocationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address the next line will receive, once a base is known.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Parse and place one line.
    pub fn feed(
        &mut self,
        line: usize,
        text: &str,
        diags: &mut Diagnostics,
    ) -> Result<Instruction, AsmError> {
        if self.base.is_some() {
            if let Some((addr, size)) = self.pending.take() {
                let next = hex::add_hex(&addr, &size).map_err(AsmError::hex(line, text))?;
                self.base = Some(next);
            }
        }

        let mut instr = parse_line(line, text)?;
        self.check_label(&instr, diags);

        if instr.mnemonic.kind() == Some(Kind::Start) {
            if let Some(first) = self.start_line {
                return Err(AsmError::DuplicateStart {
                    line,
                    content: text.to_string(),
                    first,
                });
            }
            self.start_line = Some(line);
            let origin = match &instr.operand {
                Operand::Literal(origin) => {
                    let value = hex::parse_hex(origin).map_err(AsmError::hex(line, text))?;
                    format!("{value:X}")
                }
                _ => {
                    diags.push(line, DiagnosticKind::MissingOrigin);
                    "0".to_string()
                }
            };
            self.base = Some(origin);
        }

        match self.base.clone() {
            None => {
                diags.push(line, DiagnosticKind::MissingStart);
                self.base = Some("0".to_string());
            }
            Some(base) => {
                // base is always well-formed here; a parse failure means it outgrew 32 bits
                if !hex::parse_hex(&base).is_ok_and(|v| v <= MAX_ADDRESS) {
                    return Err(AsmError::AddressOverflow {
                        line,
                        content: text.to_string(),
                        address: base,
                    });
                }
                let size = size_of(&instr, diags);
                tracing::trace!(line, address = %base, size = %size, "placed");
                instr.address = Some(base.clone());
                self.pending = Some((base, size));
            }
        }

        Ok(instr)
    }

    fn check_label(&mut self, instr: &Instruction, diags: &mut Diagnostics) {
        let Some(label) = &instr.label else { return };
        match self.labels.get(label) {
            Some(&first) => diags.push(
                instr.line,
                DiagnosticKind::DuplicateLabel {
                    label: label.clone(),
                    first,
                },
            ),
            None => {
                self.labels.insert(label.clone(), instr.line);
            }
        }
    }
}

/// Bytes a line occupies, as hex. `RESW`/`RESB` counts are decimal.
pub fn size_of(instr: &Instruction, diags: &mut Diagnostics) -> String {
    let kind = instr.mnemonic.kind();
    let per_unit = match kind {
        Some(Kind::Start | Kind::End) => return "0".to_string(),
        Some(Kind::Resw) => 3,
        Some(Kind::Resb) => 1,
        _ => return "3".to_string(),
    };
    let count = match &instr.operand {
        Operand::Literal(n) => n.parse::<u64>().ok(),
        _ => None,
    };
    match count {
        Some(n) => format!("{:X}", n.saturating_mul(per_unit).min(u32::MAX as u64)),
        None => {
            diags.push(
                instr.line,
                DiagnosticKind::BadReserveCount {
                    mnemonic: instr.mnemonic.to_string(),
                    operand: instr.operand.to_string(),
                },
            );
            "3".to_string()
        }
    }
}

/// Run the first pass over a line stream. Lines are numbered from 1.
pub fn first_pass<I, S>(lines: I, diags: &mut Diagnostics) -> Result<Vec<Instruction>, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counter = LocationCounter::new();
    let mut out = Vec::new();
    for (idx, text) in lines.into_iter().enumerate() {
        out.push(counter.feed(idx + 1, text.as_ref(), diags)?);
    }
    tracing::debug!(
        lines = out.len(),
        next = counter.base().unwrap_or("-"),
        "first pass done"
    );
    Ok(out)
}
