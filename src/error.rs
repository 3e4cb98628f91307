use crate::hex::HexError;

/// Fatal assembly errors. Anything recoverable goes to
/// [`Diagnostics`](crate::diag::Diagnostics) instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: expected 1 to 3 fields (label, mnemonic, operand), found {found}: `{content}`")]
    InstructionFormat {
        line: usize,
        content: String,
        found: usize,
    },
    #[error("line {line}: `{content}`: {source}")]
    Hex {
        line: usize,
        content: String,
        #[source]
        source: HexError,
    },
    #[error("line {line}: second START `{content}` (first START on line {first})")]
    DuplicateStart {
        line: usize,
        content: String,
        first: usize,
    },
    #[error("line {line}: `{content}`: address {address} exceeds FFFFFF")]
    AddressOverflow {
        line: usize,
        content: String,
        address: String,
    },
    #[error("cannot build an object program from an empty instruction list")]
    EmptyProgram,
    #[error("cannot build an object program: no instruction carries a memory address")]
    MissingAddress,
    #[error("{count} instruction(s) could not be resolved")]
    Unresolved { count: usize },
}

impl AsmError {
    /// Attach line context to a hex failure.
    pub fn hex(line: usize, content: impl Into<String>) -> impl FnOnce(HexError) -> AsmError {
        let content = content.into();
        move |source| AsmError::Hex {
            line,
            content,
            source,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::InstructionFormat { line, .. }
            | AsmError::Hex { line, .. }
            | AsmError::DuplicateStart { line, .. }
            | AsmError::AddressOverflow { line, .. } => Some(*line),
            AsmError::EmptyProgram | AsmError::MissingAddress | AsmError::Unresolved { .. } => None,
        }
    }
}
