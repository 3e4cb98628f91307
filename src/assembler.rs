use crate::config::AsmConfig;
use crate::diag::Diagnostics;
use crate::error::AsmError;
use crate::instruction::Instruction;
use crate::listing;
use crate::locctr::first_pass;
use crate::object::{self, ObjectProgram};
use crate::resolve::resolve;

/// Everything one compilation produces.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub instructions: Vec<Instruction>,
    pub listing: String,
    pub object: ObjectProgram,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct Assembler {
    pub cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    /// Run both passes and emit the listing and object program.
    ///
    /// Input ends at the first empty line. Unresolved symbols are recorded in
    /// [`Assembly::diagnostics`] and only abort when `cfg.strict` is set.
    pub fn assemble<I, S>(&self, lines: I) -> Result<Assembly, AsmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut diagnostics = Diagnostics::new();
        let source = lines
            .into_iter()
            .map(|l| l.as_ref().trim_end_matches(['\r', '\n']).to_string())
            .take_while(|l| !l.is_empty());

        let mut instructions = first_pass(source, &mut diagnostics)?;
        resolve(&mut instructions, &mut diagnostics)?;

        if self.cfg.strict {
            let count = diagnostics.error_count();
            if count > 0 {
                return Err(AsmError::Unresolved { count });
            }
        }

        instructions.sort_by_key(|i| i.line);
        let listing = listing::render(&instructions);
        let object = object::emit(&instructions, &self.cfg)?;
        tracing::debug!(
            lines = instructions.len(),
            diagnostics = diagnostics.len(),
            "assembly complete"
        );
        Ok(Assembly {
            instructions,
            listing,
            object,
            diagnostics,
        })
    }

    /// [`assemble`](Self::assemble) over a whole source text.
    pub fn assemble_str(&self, source: &str) -> Result<Assembly, AsmError> {
        self.assemble(source.lines())
    }
}

/// Compile with the default configuration into `(listing, object program)`.
pub fn compile<I, S>(lines: I) -> Result<(String, String), AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let asm = Assembler::default().assemble(lines)?;
    Ok((asm.listing, asm.object.to_string()))
}
