// Analyzer settings: classifications, feature toggles, legacy-format merge.
//
// A single immutable settings record is passed by reference into every
// analysis function; legacy-format merging happens once at load.

use crate::diagnostics::diagnostic::Diagnostic;
use crate::diagnostics::diagnostic_code::DiagnosticCode;
use crate::diagnostics::diagnostic_collection::DiagnosticCollection;
use crate::model::types::{TypeHierarchy, TypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Preferred settings file name, looked up alongside the project root.
pub const SETTINGS_FILE: &str = "throwcheck.settings.json";
/// Accepted for migration from the older analyzer.
pub const LEGACY_SETTINGS_FILE: &str = "CheckedExceptions.settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the engine treats a given exception type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Never mentioned in diagnostics.
    Ignored,
    /// Reported informationally; never required in contracts or catches.
    NonStrict,
    /// Fully enforced.
    Strict,
}

/// Legacy informational reporting mode: where the informational diagnostic
/// is emitted for a NonStrict type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InformationalMode {
    Always,
    Throw,
    Propagation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerSettings {
    pub default_exception_classification: Classification,
    /// Exception FQN -> classification.
    pub exceptions: BTreeMap<String, Classification>,
    /// Legacy: array of FQNs merged as Ignored.
    pub ignored_exceptions: Vec<String>,
    /// Legacy: FQN -> mode, merged as NonStrict.
    pub informational_exceptions: BTreeMap<String, InformationalMode>,

    pub disable_xml_doc_interop: bool,
    pub disable_control_flow_analysis: bool,
    /// Only meaningful when control-flow analysis is off.
    pub enable_legacy_redundancy_checks: bool,
    pub disable_base_exception_declared_diagnostic: bool,
    pub disable_base_exception_thrown_diagnostic: bool,
    pub treat_throws_exception_as_catch_rest: bool,
    pub disable_linq_support: bool,
    pub disable_linq_queryable_support: bool,
    pub disable_linq_implicitly_declared_exceptions: bool,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            default_exception_classification: Classification::Strict,
            exceptions: BTreeMap::new(),
            ignored_exceptions: Vec::new(),
            informational_exceptions: BTreeMap::new(),
            disable_xml_doc_interop: false,
            disable_control_flow_analysis: false,
            enable_legacy_redundancy_checks: false,
            disable_base_exception_declared_diagnostic: false,
            disable_base_exception_thrown_diagnostic: false,
            treat_throws_exception_as_catch_rest: false,
            disable_linq_support: false,
            disable_linq_queryable_support: false,
            disable_linq_implicitly_declared_exceptions: false,
        }
    }
}

impl AnalyzerSettings {
    /// Parse settings JSON. Unknown fields are ignored.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Resolve settings next to a project root. A missing file yields
    /// defaults silently; a malformed file yields defaults plus a single
    /// configuration diagnostic.
    pub fn load_or_default(root: &Path, diagnostics: &mut DiagnosticCollection) -> Self {
        let candidate = [SETTINGS_FILE, LEGACY_SETTINGS_FILE]
            .iter()
            .map(|name| root.join(name))
            .find(|p| p.exists());
        let Some(path) = candidate else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("settings load failed for {}: {}", path.display(), err);
                diagnostics.add(Diagnostic::new(
                    DiagnosticCode::TCW00001,
                    format!("Malformed analyzer settings: {}; defaults are in effect", err),
                ));
                Self::default()
            }
        }
    }

    /// Effective classification of an exception FQN: the explicit map wins,
    /// then legacy entries (the informational map is more specific than the
    /// ignored list), then the default.
    pub fn classify_fqn(&self, fqn: &str) -> Classification {
        if let Some(c) = self.exceptions.get(fqn) {
            return *c;
        }
        if self.informational_exceptions.contains_key(fqn) {
            return Classification::NonStrict;
        }
        if self.ignored_exceptions.iter().any(|f| f == fqn) {
            return Classification::Ignored;
        }
        self.default_exception_classification
    }

    pub fn classify(&self, h: &TypeHierarchy, ty: TypeId) -> Classification {
        self.classify_fqn(h.fqn(ty))
    }

    /// Reporting mode for a NonStrict type. Entries from the modern
    /// `exceptions` map report everywhere.
    pub fn informational_mode(&self, fqn: &str) -> InformationalMode {
        self.informational_exceptions
            .get(fqn)
            .copied()
            .unwrap_or(InformationalMode::Always)
    }
}
