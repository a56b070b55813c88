use std::fmt;

use codespan_reporting::diagnostic::{Diagnostic as Report, Severity};

/// What a non-fatal diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A parameter without a default received no value.
    MissingAttribute(String),
    /// A positional value no parameter accepted.
    ExtraAttribute(String),
    /// A keyword no parameter accepted.
    UnexpectedParameter(String),
    /// The same keyword was given more than once in a header.
    DuplicateParameter(String),
    /// The document front matter could not be read.
    FrontMatter(String),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingAttribute(name) => {
                write!(f, "missing mandatory attribute '{}'", name)
            }
            DiagnosticKind::ExtraAttribute(value) => {
                write!(f, "ignored extra attribute '{}'", value)
            }
            DiagnosticKind::UnexpectedParameter(key) => {
                write!(f, "ignoring unexpected parameter '{}'", key)
            }
            DiagnosticKind::DuplicateParameter(key) => {
                write!(f, "duplicated parameter '{}', keeping the last value", key)
            }
            DiagnosticKind::FrontMatter(reason) => write!(f, "front matter ignored: {}", reason),
        }
    }
}

/// A warning raised while converting a document. Never aborts the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Type name of the block the warning belongs to, if any.
    pub block_type: Option<String>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn in_block(block_type: impl Into<String>, kind: DiagnosticKind) -> Self {
        Diagnostic {
            block_type: Some(block_type.into()),
            kind,
        }
    }

    pub fn document(kind: DiagnosticKind) -> Self {
        Diagnostic {
            block_type: None,
            kind,
        }
    }

    /// Convert to a codespan-reporting diagnostic for display.
    pub fn to_report(&self) -> Report<usize> {
        Report::new(Severity::Warning).with_message(self.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block_type {
            Some(block_type) => write!(f, "In block '{}', {}", block_type, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
