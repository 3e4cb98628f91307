use std::collections::HashMap;

use crate::instruction::Instruction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub address: Option<String>,
    pub line: usize,
}

/// Label → address view over a finished first-pass list.
///
/// When a label is defined twice the first definition in line order wins.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Labels of storage directives (`RESW`, `RESB`, `WORD`) only; what
    /// indexed operands resolve against.
    pub fn storage(instructions: &[Instruction]) -> Self {
        Self::build(instructions.iter().filter(|i| i.mnemonic.is_storage()))
    }

    /// Every labelled line, executable ones included; what direct operands
    /// resolve against.
    pub fn all(instructions: &[Instruction]) -> Self {
        Self::build(instructions.iter())
    }

    fn build<'a>(instructions: impl Iterator<Item = &'a Instruction>) -> Self {
        let mut table = Self::default();
        for instr in instructions {
            let Some(name) = &instr.label else { continue };
            if table.index.contains_key(name) {
                continue;
            }
            table.index.insert(name.clone(), table.symbols.len());
            table.symbols.push(Symbol {
                name: name.clone(),
                address: instr.address.clone(),
                line: instr.line,
            });
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    /// Address of `name`, if it is defined and was placed.
    pub fn address(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|s| s.address.as_deref())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
