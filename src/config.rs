use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub default_program_name: String, // header name when START has no label
    pub text_record_capacity: usize,  // max opcodes per T record
    pub strict: bool,                 // error diagnostics abort the compilation
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            default_program_name: "PROG".to_string(),
            text_record_capacity: 8,
            strict: false,
        }
    }
}
