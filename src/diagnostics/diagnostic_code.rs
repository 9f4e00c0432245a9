use crate::diagnostics::diagnostic_category::DiagnosticCategory;
use crate::diagnostics::severity::DiagnosticSeverity;
use serde::{Deserialize, Serialize};

/// Stable diagnostic codes.
/// Format: TCW[XXXXX] for warnings, TCI[XXXXX] for informational, TCH[XXXXX] for hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // Engine-level (TCx00xxx)
    TCW00001, // Malformed settings file, defaults in effect
    TCH00002, // Construct skipped due to missing semantic information

    // Exception flow (TCx01xxx)
    TCW01001, // Exception may escape and is neither caught nor declared
    TCI01002, // Informational: exception propagates (non-strict type)

    // Contract hygiene (TCx02xxx)
    TCW02001, // Do not declare the base Exception type
    TCW02002, // Do not throw the base Exception type directly
    TCW02003, // Duplicate Throws declaration
    TCW02004, // Declared exception never thrown
    TCW02005, // Declared exception subsumed by declared supertype
    TCW02006, // Throws placed on a full property instead of its accessors

    // Inheritance and documentation (TCx03xxx)
    TCW03001, // Override declares exception not present on overridden member
    TCW03002, // Override omits exception declared by overridden member
    TCW03003, // XML documentation declares exception with no matching Throws

    // Catch handlers (TCx04xxx)
    TCW04001, // Typed catch never matches
    TCW04002, // Catch-all clause catches nothing
    TCW04003, // Catch clause is redundant

    // LINQ deferred queries (TCx05xxx)
    TCW05001, // Deferred query crosses a boundary carrying exceptions
    TCI05002, // LINQ lambda implicitly throws, contract suggested
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::TCW00001 => "TCW00001",
            DiagnosticCode::TCH00002 => "TCH00002",
            DiagnosticCode::TCW01001 => "TCW01001",
            DiagnosticCode::TCI01002 => "TCI01002",
            DiagnosticCode::TCW02001 => "TCW02001",
            DiagnosticCode::TCW02002 => "TCW02002",
            DiagnosticCode::TCW02003 => "TCW02003",
            DiagnosticCode::TCW02004 => "TCW02004",
            DiagnosticCode::TCW02005 => "TCW02005",
            DiagnosticCode::TCW02006 => "TCW02006",
            DiagnosticCode::TCW03001 => "TCW03001",
            DiagnosticCode::TCW03002 => "TCW03002",
            DiagnosticCode::TCW03003 => "TCW03003",
            DiagnosticCode::TCW04001 => "TCW04001",
            DiagnosticCode::TCW04002 => "TCW04002",
            DiagnosticCode::TCW04003 => "TCW04003",
            DiagnosticCode::TCW05001 => "TCW05001",
            DiagnosticCode::TCI05002 => "TCI05002",
        }
    }

    /// Default severity; classification gating may downgrade at emit time.
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticCode::TCH00002 => DiagnosticSeverity::Hint,
            DiagnosticCode::TCI01002 | DiagnosticCode::TCI05002 => DiagnosticSeverity::Info,
            _ => DiagnosticSeverity::Warning,
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            DiagnosticCode::TCW00001 => DiagnosticCategory::Configuration,
            DiagnosticCode::TCH00002 => DiagnosticCategory::Internal,
            DiagnosticCode::TCW01001 | DiagnosticCode::TCI01002 => {
                DiagnosticCategory::ExceptionFlow
            }
            DiagnosticCode::TCW02001
            | DiagnosticCode::TCW02002
            | DiagnosticCode::TCW02003
            | DiagnosticCode::TCW02004
            | DiagnosticCode::TCW02005
            | DiagnosticCode::TCW02006 => DiagnosticCategory::Contracts,
            DiagnosticCode::TCW03001 | DiagnosticCode::TCW03002 | DiagnosticCode::TCW03003 => {
                DiagnosticCategory::Inheritance
            }
            DiagnosticCode::TCW04001 | DiagnosticCode::TCW04002 | DiagnosticCode::TCW04003 => {
                DiagnosticCategory::Handlers
            }
            DiagnosticCode::TCW05001 | DiagnosticCode::TCI05002 => DiagnosticCategory::Linq,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            DiagnosticCode::TCW00001 => "Malformed analyzer settings; defaults are in effect",
            DiagnosticCode::TCH00002 => "Construct skipped due to missing semantic information",
            DiagnosticCode::TCW01001 => "Exception may escape and is neither caught nor declared",
            DiagnosticCode::TCI01002 => "Exception propagates here",
            DiagnosticCode::TCW02001 => "Do not declare the base 'Exception' type",
            DiagnosticCode::TCW02002 => "Do not throw the base 'Exception' type directly",
            DiagnosticCode::TCW02003 => "Duplicate 'Throws' declaration",
            DiagnosticCode::TCW02004 => "Declared exception is never thrown",
            DiagnosticCode::TCW02005 => "Declared exception is subsumed by a declared supertype",
            DiagnosticCode::TCW02006 => {
                "Place 'Throws' on the property accessors, not the property"
            }
            DiagnosticCode::TCW03001 => {
                "Override declares an exception the overridden member does not declare"
            }
            DiagnosticCode::TCW03002 => {
                "Override omits an exception declared by the overridden member"
            }
            DiagnosticCode::TCW03003 => {
                "XML documentation declares an exception with no matching 'Throws'"
            }
            DiagnosticCode::TCW04001 => "Catch clause never matches a thrown exception",
            DiagnosticCode::TCW04002 => "Catch-all clause catches nothing",
            DiagnosticCode::TCW04003 => "Catch clause is redundant",
            DiagnosticCode::TCW05001 => {
                "Deferred query carries exceptions beyond this point; materialize or declare them"
            }
            DiagnosticCode::TCI05002 => "Lambda implicitly throws; consider declaring a contract",
        }
    }
}
