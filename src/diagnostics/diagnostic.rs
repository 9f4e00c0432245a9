use crate::diagnostics::diagnostic_category::DiagnosticCategory;
use crate::diagnostics::diagnostic_code::DiagnosticCode;
use crate::diagnostics::severity::DiagnosticSeverity;
use crate::diagnostics::source_location::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A diagnostic message (warning, info, or hint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: DiagnosticSeverity,
    pub category: DiagnosticCategory,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            category: code.category(),
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Create a diagnostic with the code's default message
    pub fn with_default_message(code: DiagnosticCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.code.as_str(),
            self.severity.to_string().to_uppercase(),
            self.message
        )
    }
}
