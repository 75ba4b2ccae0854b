use crate::types::{Bank, Pc};
use std::fmt;

/// The taxonomy from spec.md §7. Each variant carries its own message; the
/// `BPPP: <line>` context is attached separately once the failing line is
/// known, mirroring how `vasm` wraps parser spans in `pest::error::Error`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Constraint,
    Layout,
    Option,
    Io,
    Internal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembleError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: Option<String>,
}

impl AssembleError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> AssembleError {
        AssembleError {
            kind,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, bank: Bank, pc: Pc, line: &str) -> AssembleError {
        self.context = Some(format!("{}{:03X}: {}", bank, pc, line.trim_end()));
        self
    }
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{}\n{}", ctx, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for AssembleError {}

pub type Result<T> = std::result::Result<T, AssembleError>;

/// Non-fatal output. The library never prints; `main.rs` does, same split as
/// `vasm::assemble` returning data for `vasm/src/main.rs` to report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Warning { context: String, message: String },
    Info { context: String, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::Warning { context, message } => {
                write!(f, "warning: {}: {}", context, message)
            }
            Diagnostic::Info { context, message } => write!(f, "info: {}: {}", context, message),
        }
    }
}

pub fn context_str(bank: Bank, pc: Pc, line: &str) -> String {
    format!("{}{:03X}: {}", bank, pc, line.trim_end())
}
