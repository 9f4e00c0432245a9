use crate::diagnostics::diagnostic::Diagnostic;
use crate::diagnostics::diagnostic_code::DiagnosticCode;
use crate::diagnostics::severity::DiagnosticSeverity;
use serde::{Deserialize, Serialize};

/// Collection of diagnostics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticCollection {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Warning))
    }

    pub fn infos(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Info))
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().count() > 0
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Stable total order: (file, line, column, length, code, message).
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let key = |d: &Diagnostic| {
                let loc = d.location.as_ref();
                (
                    loc.map(|l| l.file.clone()).unwrap_or_default(),
                    loc.map(|l| l.line).unwrap_or(0),
                    loc.map(|l| l.column).unwrap_or(0),
                    loc.map(|l| l.length).unwrap_or(0),
                    d.code.as_str(),
                    d.message.clone(),
                )
            };
            key(a).cmp(&key(b))
        });
    }

    /// Drop duplicates sharing (code, location, message). Requires a prior sort.
    pub fn dedup(&mut self) {
        self.diagnostics
            .dedup_by(|a, b| a.code == b.code && a.location == b.location && a.message == b.message);
    }
}
