//! Object program records.
//!
//! ```text
//! H^<name>^<start:6>^<length:6>
//! T^<addr:6>^<bytes:2>^<opcode:6>^...
//! E^<entry:6>
//! ```

use std::fmt;

use crate::config::AsmConfig;
use crate::error::AsmError;
use crate::hex;
use crate::instruction::Instruction;
use crate::mnemonic::Kind;

pub const DELIM: char = '^';
const ADDR_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub name: String,
    pub start: String,  // 6 digits
    pub length: String, // 6 digits
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub address: String, // 6 digits
    pub opcodes: Vec<String>,
}

impl TextRecord {
    /// Object code length in bytes, two hex digits per byte.
    pub fn byte_len(&self) -> usize {
        self.opcodes.iter().map(String::len).sum::<usize>() / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRecord {
    pub entry: String, // 6 digits
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectProgram {
    pub header: HeaderRecord,
    pub text: Vec<TextRecord>,
    pub end: EndRecord,
}

impl fmt::Display for HeaderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{DELIM}{}{DELIM}{}{DELIM}{}", self.name, self.start, self.length)
    }
}

impl fmt::Display for TextRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{DELIM}{}{DELIM}{:02X}", self.address, self.byte_len())?;
        for op in &self.opcodes {
            write!(f, "{DELIM}{op}")?;
        }
        Ok(())
    }
}

impl fmt::Display for EndRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{DELIM}{}", self.entry)
    }
}

impl fmt::Display for ObjectProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for t in &self.text {
            writeln!(f, "{t}")?;
        }
        writeln!(f, "{}", self.end)
    }
}

fn addr6(instr: &Instruction, address: &str) -> Result<String, AsmError> {
    hex::format_hex_to_length(address, ADDR_DIGITS)
        .map_err(AsmError::hex(instr.line, instr.source()))
}

/// Build the H/T/E records from a resolved instruction list.
pub fn emit(instructions: &[Instruction], cfg: &AsmConfig) -> Result<ObjectProgram, AsmError> {
    let mut ordered: Vec<&Instruction> = instructions.iter().collect();
    ordered.sort_by_key(|i| i.line);

    if ordered.is_empty() {
        return Err(AsmError::EmptyProgram);
    }
    if ordered.iter().all(|i| i.address.is_none()) {
        return Err(AsmError::MissingAddress);
    }

    let header = header_record(&ordered, cfg)?;
    let text = text_records(&ordered, cfg.text_record_capacity)?;
    let end = end_record(&ordered)?;
    tracing::debug!(name = %header.name, text_records = text.len(), "object program built");
    Ok(ObjectProgram { header, text, end })
}

fn header_record(ordered: &[&Instruction], cfg: &AsmConfig) -> Result<HeaderRecord, AsmError> {
    let start = ordered
        .iter()
        .copied()
        .find(|i| i.mnemonic.kind() == Some(Kind::Start))
        .or_else(|| ordered.iter().copied().find(|i| i.address.is_some()))
        .ok_or(AsmError::MissingAddress)?;
    let end = ordered
        .iter()
        .copied()
        .rev()
        .find(|i| i.mnemonic.kind() == Some(Kind::End))
        .or_else(|| ordered.iter().copied().rev().find(|i| i.address.is_some()))
        .ok_or(AsmError::MissingAddress)?;
    let (Some(start_addr), Some(end_addr)) = (&start.address, &end.address) else {
        return Err(AsmError::MissingAddress);
    };

    let name = match (&start.label, start.mnemonic.kind()) {
        (Some(label), Some(Kind::Start)) => label.clone(),
        _ => cfg.default_program_name.clone(),
    };
    let length =
        hex::sub_hex(end_addr, start_addr).map_err(AsmError::hex(end.line, end.source()))?;
    Ok(HeaderRecord {
        name,
        start: addr6(start, start_addr)?,
        length: addr6(end, &length)?,
    })
}

fn text_records(ordered: &[&Instruction], capacity: usize) -> Result<Vec<TextRecord>, AsmError> {
    let eligible: Vec<(&Instruction, &str, &str)> = ordered
        .iter()
        .copied()
        .filter(|i| !i.is_control())
        .filter_map(|i| match (&i.address, &i.opcode) {
            (Some(addr), Some(op)) if !op.is_empty() => Some((i, addr.as_str(), op.as_str())),
            _ => None,
        })
        .collect();

    let mut records = Vec::new();
    for chunk in eligible.chunks(capacity.max(1)) {
        let (first, addr, _) = chunk[0];
        let opcodes = chunk
            .iter()
            .map(|(i, _, op)| {
                hex::format_hex_to_length(op, ADDR_DIGITS).map_err(AsmError::hex(i.line, i.source()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        records.push(TextRecord {
            address: addr6(first, addr)?,
            opcodes,
        });
    }
    Ok(records)
}

/// Entry point: the first placed line after `START`.
fn end_record(ordered: &[&Instruction]) -> Result<EndRecord, AsmError> {
    let (first, addr) = ordered
        .iter()
        .filter(|i| i.mnemonic.kind() != Some(Kind::Start))
        .find_map(|i| i.address.as_deref().map(|a| (*i, a)))
        .ok_or(AsmError::MissingAddress)?;
    Ok(EndRecord {
        entry: addr6(first, addr)?,
    })
}
