// Analysis framework hub

pub mod cancellation;
pub mod diagnostic_builder;
pub mod pipeline;
pub mod session;

pub use cancellation::CancellationToken;
pub use diagnostic_builder::DiagnosticBuilder;
pub use pipeline::AnalyzerPipeline;
pub use session::AnalysisSession;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("analysis cancelled")]
    Cancelled,
}
