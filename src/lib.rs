// Exception-flow analysis engine - organized by feature area

pub mod checker; // member contract checks
pub mod context; // AnalysisContext: span -> line/column mapping
pub mod contracts; // ContractResolver, XML doc interop
pub mod diagnostics; // Diagnostic types
pub mod flow; // frames, handler resolution, reachability
pub mod framework; // session, pipeline, cancellation
pub mod inference; // per-expression may-throw inference, LINQ
pub mod lattice; // ExceptionSet and subtype queries
pub mod model; // host-provided semantic model interface
pub mod report; // AnalysisReport
pub mod settings; // AnalyzerSettings, classifications, toggles

// Minimal re-exports only where ergonomic
pub use context::AnalysisContext;
pub use diagnostics::diagnostic::Diagnostic;
pub use diagnostics::diagnostic_code::DiagnosticCode;
pub use diagnostics::diagnostic_collection::DiagnosticCollection;
pub use diagnostics::severity::DiagnosticSeverity;
pub use diagnostics::source_location::SourceLocation;
pub use framework::pipeline::AnalyzerPipeline;
pub use framework::session::AnalysisSession;
pub use report::AnalysisReport;
pub use settings::{AnalyzerSettings, Classification};
