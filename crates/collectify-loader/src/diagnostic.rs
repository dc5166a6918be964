//! Load diagnostics.

use std::{fmt, path::PathBuf};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Fails the build for the offending file.
    Error,
    /// Reported but not fatal.
    Warning,
}

/// One problem found while loading content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// File the problem belongs to, when there is one.
    pub file: Option<PathBuf>,
    pub message: String,
}

impl Diagnostic {
    /// Error tied to a file.
    pub fn error(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            file: Some(file.into()),
            message: message.into(),
        }
    }

    /// Warning tied to a file.
    pub fn warning(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            file: Some(file.into()),
            message: message.into(),
        }
    }

    /// Warning about the setup as a whole.
    pub fn global_warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            file: None,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}: {}", file.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}
