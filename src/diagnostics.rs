use std::fmt;

use thiserror::Error;

/// Classification of a fault raised while parsing or evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Syntax,
    UnboundIdentifier,
    Type,
    Arity,
    ApplyToNonFunction,
    DivisionByZero,
}

/// A single fault, carrying a message that names the offending term.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Unified error type for the ZHRL library and its host binary.
#[derive(Debug, Error)]
pub enum ZhrlError {
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

impl ZhrlError {
    /// The fault kind, if this error came out of the core rather than the host.
    pub fn kind(&self) -> Option<DiagnosticKind> {
        match self {
            ZhrlError::Diagnostic(diag) => Some(diag.kind),
            ZhrlError::Io(_) | ZhrlError::Json(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZhrlError>;
