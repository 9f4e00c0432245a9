use crate::diagnostics::diagnostic_collection::DiagnosticCollection;
use crate::framework::EngineError;
use crate::framework::cancellation::CancellationToken;
use crate::framework::session::AnalysisSession;
use crate::model::compilation::Compilation;
use crate::report::AnalysisReport;
use crate::settings::AnalyzerSettings;
use crate::{checker, flow};
use log::debug;
#[cfg(feature = "parallel_analysis")]
use rayon::prelude::*;
use std::path::Path;

pub struct AnalyzerPipeline;

impl AnalyzerPipeline {
    /// Analyze a compilation with the given settings.
    pub fn run(comp: &Compilation, settings: &AnalyzerSettings) -> AnalysisReport {
        match Self::run_cancellable(comp, settings, &CancellationToken::new()) {
            Ok(report) => report,
            // A fresh token is never cancelled
            Err(_) => AnalysisReport::default(),
        }
    }

    /// Analyze a compilation, resolving settings from a project root.
    /// A malformed settings file contributes one configuration diagnostic and
    /// the run proceeds with defaults.
    pub fn run_with_settings_from(comp: &Compilation, root: &Path) -> AnalysisReport {
        let mut config_diags = DiagnosticCollection::new();
        let settings = AnalyzerSettings::load_or_default(root, &mut config_diags);
        let mut report = Self::run(comp, &settings);
        report.diagnostics.extend(config_diags);
        report.diagnostics.sort();
        report.diagnostics.dedup();
        report
    }

    /// Cooperatively cancellable run. Cancellation is checked between
    /// members; a cancelled run discards partial results.
    pub fn run_cancellable(
        comp: &Compilation,
        settings: &AnalyzerSettings,
        token: &CancellationToken,
    ) -> Result<AnalysisReport, EngineError> {
        let members = comp.top_level_members();
        debug!("pipeline: {} top-level members", members.len());

        let mut merged = DiagnosticCollection::new();

        #[cfg(not(feature = "parallel_analysis"))]
        {
            let mut session = AnalysisSession::new(comp, settings);
            for id in &members {
                if token.is_cancelled() {
                    return Err(EngineError::Cancelled);
                }
                flow::analyze_and_check(&mut session, *id);
            }
            checker::check_properties(&mut session);
            merged.extend(session.diagnostics);
        }

        #[cfg(feature = "parallel_analysis")]
        {
            // Per-worker sessions keep diagnostic buffers thread-local; the
            // ordered collect makes the merge deterministic.
            let buffers: Vec<Option<DiagnosticCollection>> = members
                .par_iter()
                .map(|id| {
                    if token.is_cancelled() {
                        return None;
                    }
                    let mut session = AnalysisSession::new(comp, settings);
                    flow::analyze_and_check(&mut session, *id);
                    Some(session.diagnostics)
                })
                .collect();
            if token.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            for buffer in buffers.into_iter().flatten() {
                merged.extend(buffer);
            }
            let mut session = AnalysisSession::new(comp, settings);
            checker::check_properties(&mut session);
            merged.extend(session.diagnostics);
        }

        merged.sort();
        merged.dedup();

        Ok(AnalysisReport {
            schema_version: 1,
            members_analyzed: members.len(),
            diagnostics: merged,
        })
    }
}
