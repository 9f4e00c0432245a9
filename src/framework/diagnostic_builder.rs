use crate::diagnostics::diagnostic::Diagnostic;
use crate::diagnostics::diagnostic_code::DiagnosticCode;
use crate::diagnostics::severity::DiagnosticSeverity;
use crate::diagnostics::source_location::SourceLocation;
use crate::framework::session::AnalysisSession;
use crate::model::compilation::FileId;
use crate::model::span::Span;

pub struct DiagnosticBuilder {
    code: DiagnosticCode,
    message: Option<String>,
    location: Option<SourceLocation>,
    severity: Option<DiagnosticSeverity>,
}

impl DiagnosticBuilder {
    pub fn new(code: DiagnosticCode) -> Self {
        Self {
            code,
            message: None,
            location: None,
            severity: None,
        }
    }

    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn at(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn at_span(mut self, session: &AnalysisSession, file: FileId, span: Span) -> Self {
        self.location = session.location(file, span);
        self
    }

    pub fn emit(self, session: &mut AnalysisSession) {
        let msg = self
            .message
            .unwrap_or_else(|| self.code.default_message().to_string());
        let mut d = Diagnostic::new(self.code, msg);
        if let Some(loc) = self.location {
            d = d.with_location(loc);
        }
        if let Some(sev) = self.severity {
            d = d.with_severity(sev);
        }
        session.report(d);
    }
}
