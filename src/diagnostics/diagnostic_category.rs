use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad grouping for diagnostics, used in reports and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Configuration,
    Internal,
    ExceptionFlow,
    Contracts,
    Inheritance,
    Handlers,
    Linq,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticCategory::Configuration => "configuration",
            DiagnosticCategory::Internal => "internal",
            DiagnosticCategory::ExceptionFlow => "exception-flow",
            DiagnosticCategory::Contracts => "contracts",
            DiagnosticCategory::Inheritance => "inheritance",
            DiagnosticCategory::Handlers => "handlers",
            DiagnosticCategory::Linq => "linq",
        };
        write!(f, "{}", s)
    }
}
