use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formats: u8 {
const ONE = 1 << 0;   // 1-byte, opcode only
const TWO = 1 << 1;   // 2-byte, register-register
const THREE = 1 << 2; // 3-byte, the only width laid out by the location counter
const FOUR = 1 << 3;  // 4-byte, extended
}
}

const F1: Formats = Formats::ONE;
const F2: Formats = Formats::TWO;
const F34: Formats = Formats::THREE.union(Formats::FOUR);
const NONE: Formats = Formats::empty();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Kind {
    Machine,
    Start,
    End,
    Resw,
    Resb,
    Word,
}

impl Kind {
    /// `START` and `END`: no code space and never an opcode.
    pub fn is_control(self) -> bool {
        matches!(self, Kind::Start | Kind::End)
    }

    /// Directives whose labels enter the symbol table.
    pub fn is_storage(self) -> bool {
        matches!(self, Kind::Resw | Kind::Resb | Kind::Word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MnemonicDesc {
    pub name: &'static str,
    pub kind: Kind,
    pub opcode: Option<u8>,
    pub formats: Formats,
}

const fn op(name: &'static str, opcode: u8, formats: Formats) -> MnemonicDesc {
    MnemonicDesc {
        name,
        kind: Kind::Machine,
        opcode: Some(opcode),
        formats,
    }
}

const fn dir(name: &'static str, kind: Kind) -> MnemonicDesc {
    MnemonicDesc {
        name,
        kind,
        opcode: None,
        formats: NONE,
    }
}

pub const TABLE: &[MnemonicDesc] = &[
    op("ADD", 0x18, F34),
    op("ADDF", 0x58, F34),
    op("ADDR", 0x90, F2),
    op("AND", 0x40, F34),
    op("CLEAR", 0xB4, F2),
    op("COMP", 0x28, F34),
    op("COMPF", 0x88, F34),
    op("COMPR", 0xA0, F2),
    op("DIV", 0x24, F34),
    op("DIVF", 0x64, F34),
    op("DIVR", 0x9C, F2),
    op("FIX", 0xC4, F1),
    op("FLOAT", 0xC0, F1),
    op("HIO", 0xF4, F1),
    op("J", 0x3C, F34),
    op("JEQ", 0x30, F34),
    op("JGT", 0x34, F34),
    op("JLT", 0x38, F34),
    op("JSUB", 0x48, F34),
    op("LDA", 0x00, F34),
    op("LDB", 0x68, F34),
    op("LDCH", 0x50, F34),
    op("LDF", 0x70, F34),
    op("LDL", 0x08, F34),
    op("LDS", 0x6C, F34),
    op("LDT", 0x74, F34),
    op("LDX", 0x04, F34),
    op("LPS", 0xD0, F34),
    op("MUL", 0x20, F34),
    op("MULF", 0x60, F34),
    op("MULR", 0x98, F2),
    op("NORM", 0xC8, F1),
    op("OR", 0x44, F34),
    op("RD", 0xD8, F34),
    op("RMO", 0xAC, F2),
    op("RSUB", 0x4C, F34),
    op("SHIFTL", 0xA4, F2),
    op("SHIFTR", 0xA8, F2),
    op("SIO", 0xF0, F1),
    op("SSK", 0xEC, F34),
    op("STA", 0x0C, F34),
    op("STB", 0x78, F34),
    op("STCH", 0x54, F34),
    op("STF", 0x80, F34),
    op("STI", 0xD4, F34),
    op("STL", 0x14, F34),
    op("STS", 0x7C, F34),
    op("STSW", 0xE8, F34),
    op("STT", 0x84, F34),
    op("STX", 0x10, F34),
    op("SUB", 0x1C, F34),
    op("SUBF", 0x5C, F34),
    op("SUBR", 0x94, F2),
    op("SVC", 0xB0, F2),
    op("TD", 0xE0, F34),
    op("TIO", 0xF8, F1),
    op("TIX", 0x2C, F34),
    op("TIXR", 0xB8, F2),
    op("WD", 0xDC, F34),
    dir("RESW", Kind::Resw),
    dir("RESB", Kind::Resb),
    dir("WORD", Kind::Word),
    dir("START", Kind::Start),
    dir("END", Kind::End),
];

/// A resolved mnemonic, or the raw token when the table has no entry for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mnemonic {
    Known(&'static MnemonicDesc),
    Unknown(String),
}

impl Mnemonic {
    /// Exact, case-sensitive lookup. A miss keeps the token so later stages
    /// can report it.
    pub fn lookup(name: &str) -> Self {
        TABLE
            .iter()
            .find(|d| d.name == name)
            .map(Mnemonic::Known)
            .unwrap_or_else(|| Mnemonic::Unknown(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Mnemonic::Known(d) => d.name,
            Mnemonic::Unknown(name) => name,
        }
    }

    /// `None` for unknown mnemonics.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Mnemonic::Known(d) => Some(d.kind),
            Mnemonic::Unknown(_) => None,
        }
    }

    /// Two uppercase hex digits, for machine instructions only.
    pub fn opcode(&self) -> Option<String> {
        match self {
            Mnemonic::Known(d) => d.opcode.map(|op| format!("{op:02X}")),
            Mnemonic::Unknown(_) => None,
        }
    }

    pub fn formats(&self) -> Formats {
        match self {
            Mnemonic::Known(d) => d.formats,
            Mnemonic::Unknown(_) => NONE,
        }
    }

    pub fn is_control(&self) -> bool {
        self.kind().is_some_and(Kind::is_control)
    }

    pub fn is_storage(&self) -> bool {
        self.kind().is_some_and(Kind::is_storage)
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
