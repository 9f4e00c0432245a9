use crate::diagnostics::diagnostic_collection::DiagnosticCollection;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub schema_version: u32,
    pub members_analyzed: usize,
    pub diagnostics: DiagnosticCollection,
}

impl AnalysisReport {
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
