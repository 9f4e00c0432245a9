use crate::contracts::ContractResolver;
use crate::diagnostics::diagnostic::Diagnostic;
use crate::diagnostics::diagnostic_code::DiagnosticCode;
use crate::diagnostics::diagnostic_collection::DiagnosticCollection;
use crate::diagnostics::source_location::SourceLocation;
use crate::model::compilation::{Compilation, FileId};
use crate::model::span::Span;
use crate::settings::AnalyzerSettings;

/// Per-run analysis session: the immutable inputs plus the diagnostic buffer.
/// Cheap to create, so parallel runs give each worker its own session and
/// merge the buffers afterwards.
pub struct AnalysisSession<'a> {
    pub comp: &'a Compilation,
    pub settings: &'a AnalyzerSettings,
    pub contracts: ContractResolver<'a>,
    pub diagnostics: DiagnosticCollection,
}

impl<'a> AnalysisSession<'a> {
    pub fn new(comp: &'a Compilation, settings: &'a AnalyzerSettings) -> Self {
        Self {
            comp,
            settings,
            contracts: ContractResolver::new(comp, settings),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Resolve a span in a file to a line/column location.
    pub fn location(&self, file: FileId, span: Span) -> Option<SourceLocation> {
        self.comp.context(file).map(|ctx| ctx.location(span))
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
    }

    /// Record a degraded construct: missing semantic information made the
    /// engine skip it. Never aborts the pass.
    pub fn internal_degrade(&mut self, file: Option<FileId>, span: Option<Span>) {
        let mut d = Diagnostic::with_default_message(DiagnosticCode::TCH00002);
        if let (Some(f), Some(s)) = (file, span)
            && let Some(loc) = self.location(f, s)
        {
            d = d.with_location(loc);
        }
        log::debug!("degraded construct: missing semantic information");
        self.diagnostics.add(d);
    }
}
