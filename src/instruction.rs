use std::fmt;

use crate::mnemonic::Mnemonic;

/// Operand of a source line, classified once at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Operand {
    #[default]
    None,
    /// Numeric payload of `START`, `WORD`, `RESW` and `RESB`.
    Literal(String),
    /// Bare label reference.
    Direct(String),
    /// `LABEL,X`
    Indexed { label: String, index: String },
}

impl Operand {
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Literal(v) | Operand::Direct(v) => f.write_str(v),
            Operand::Indexed { label, index } => write!(f, "{label},{index}"),
        }
    }
}

/// One source line, enriched by each pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub line: usize, // 1-based
    pub label: Option<String>,
    pub mnemonic: Mnemonic,
    pub operand: Operand,
    pub address: Option<String>, // set by the location counter
    pub opcode: Option<String>,  // set by the resolver
}

impl Instruction {
    pub fn new(line: usize, label: Option<String>, mnemonic: Mnemonic, operand: Operand) -> Self {
        Self {
            line,
            label,
            mnemonic,
            operand,
            address: None,
            opcode: None,
        }
    }

    pub fn is_control(&self) -> bool {
        self.mnemonic.is_control()
    }

    /// Source text rebuilt from the parsed fields, for error messages.
    pub fn source(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(label) = &self.label {
            parts.push(label.clone());
        }
        parts.push(self.mnemonic.name().to_string());
        if !self.operand.is_none() {
            parts.push(self.operand.to_string());
        }
        parts.join(" ")
    }
}
