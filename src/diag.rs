//! Non-fatal events collected while assembling.
//!
//! Each stage pushes into a [`Diagnostics`] owned by the compilation rather
//! than logging into ambient state; the caller decides what to do with them.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingStart,
    MissingOrigin,
    DuplicateLabel { label: String, first: usize },
    BadReserveCount { mnemonic: String, operand: String },
    UnknownMnemonic { mnemonic: String },
    UnresolvedSymbol { mnemonic: String, label: String },
    OperandTooWide { operand: String },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnknownMnemonic { .. } | DiagnosticKind::UnresolvedSymbol { .. } => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingStart => {
                f.write_str("no START before the first instruction, assuming base address 0")
            }
            DiagnosticKind::MissingOrigin => f.write_str("START without an origin, assuming 0"),
            DiagnosticKind::DuplicateLabel { label, first } => write!(
                f,
                "label `{label}` already defined on line {first}; references resolve to the first definition"
            ),
            DiagnosticKind::BadReserveCount { mnemonic, operand } => write!(
                f,
                "{mnemonic} count `{operand}` is not a decimal number, reserving 3 bytes"
            ),
            DiagnosticKind::UnknownMnemonic { mnemonic } => {
                write!(f, "unknown mnemonic `{mnemonic}`")
            }
            DiagnosticKind::UnresolvedSymbol { mnemonic, label } => {
                write!(f, "{mnemonic}: undefined symbol `{label}`")
            }
            DiagnosticKind::OperandTooWide { operand } => {
                write!(f, "operand `{operand}` is wider than 6 hex digits")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.severity, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: usize, kind: DiagnosticKind) {
        let severity = kind.severity();
        let message = kind.to_string();
        tracing::warn!(line, %severity, "{message}");
        self.0.push(Diagnostic {
            line,
            severity,
            kind,
            message,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.0
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
