pub mod assembler;
pub mod config;
pub mod diag;
pub mod error;
pub mod hex;
pub mod instruction;
pub mod listing;
pub mod locctr;
pub mod mnemonic;
pub mod object;
pub mod parser;
pub mod resolve;
pub mod symtab;

pub use assembler::{compile, Assembler, Assembly};
pub use config::AsmConfig;
pub use diag::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::AsmError;
pub use instruction::{Instruction, Operand};
pub use mnemonic::Mnemonic;
pub use object::ObjectProgram;
