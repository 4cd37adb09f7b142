//! Error and warning types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while fetching the raw listing text.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Listing not found.
    #[error("Listing not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source produced no usable text.
    #[error("Listing is empty")]
    Empty,

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl SourceError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of parse warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Line had no branch glyph and was placed at depth 0.
    NoBranchGlyph,
    /// Branch glyph with nothing after it; the line was skipped.
    EmptyName,
    /// Looked like the closing `N directories, M files` report.
    SummaryLine,
}

/// Non-fatal warning encountered while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based line number in the input text.
    pub line: usize,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ParseWarning {
    /// Create a new parse warning.
    pub fn new(line: usize, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            line,
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for a glyph-free line.
    pub fn no_branch_glyph(line: usize, content: &str) -> Self {
        Self {
            line,
            message: format!("No branch glyph, treated as top level: {content}"),
            kind: WarningKind::NoBranchGlyph,
        }
    }

    /// Create a warning for `tree`'s closing report line.
    pub fn summary_line(line: usize, content: &str) -> Self {
        Self {
            line,
            message: format!("Looks like a tree summary: {content}"),
            kind: WarningKind::SummaryLine,
        }
    }

    /// Create a warning for a branch with no name.
    pub fn empty_name(line: usize) -> Self {
        Self {
            line,
            message: "Branch has no name, skipped".to_string(),
            kind: WarningKind::EmptyName,
        }
    }
}
