use crate::context::AnalysisContext;
use crate::model::body::Body;
use crate::model::symbols::{SymbolId, SymbolTable};
use crate::model::types::TypeHierarchy;
use std::collections::HashMap;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// One analysis input: the resolved program view the host hands the engine.
#[derive(Debug, Default)]
pub struct Compilation {
    pub hierarchy: TypeHierarchy,
    pub symbols: SymbolTable,
    bodies: HashMap<SymbolId, Body>,
    contexts: Vec<AnalysisContext>,
    member_files: HashMap<SymbolId, FileId>,
}

impl Compilation {
    pub fn new(hierarchy: TypeHierarchy) -> Self {
        Self {
            hierarchy,
            ..Default::default()
        }
    }

    pub fn add_file(&mut self, path: impl Into<String>, source: impl Into<String>) -> FileId {
        let id = FileId(self.contexts.len() as u32);
        self.contexts.push(AnalysisContext::new(path, source));
        id
    }

    pub fn context(&self, file: FileId) -> Option<&AnalysisContext> {
        self.contexts.get(file.0 as usize)
    }

    /// Attach a body to a member and record which file its spans index into.
    pub fn set_body(&mut self, member: SymbolId, file: FileId, body: Body) {
        self.bodies.insert(member, body);
        self.member_files.insert(member, file);
    }

    /// Record the file for a bodiless member (spans on its declaration).
    pub fn set_member_file(&mut self, member: SymbolId, file: FileId) {
        self.member_files.insert(member, file);
    }

    pub fn body(&self, member: SymbolId) -> Option<&Body> {
        self.bodies.get(&member)
    }

    pub fn member_file(&self, member: SymbolId) -> Option<FileId> {
        self.member_files.get(&member).copied()
    }

    /// Members the pipeline iterates at top level, in a deterministic order:
    /// by file, then by declaration position, then by id. Lambdas and local
    /// functions are reached through their containers.
    pub fn top_level_members(&self) -> Vec<SymbolId> {
        let mut ids: Vec<SymbolId> = self
            .symbols
            .members()
            .filter(|m| !m.kind.is_nested())
            .filter(|m| {
                self.bodies.contains_key(&m.id)
                    || !m.throws.is_empty()
                    || m.doc.is_some()
                    || !m.overrides.is_empty()
                    || m.property
                        .and_then(|p| self.symbols.property(p))
                        .map(|p| p.doc.is_some() || !p.throws.is_empty())
                        .unwrap_or(false)
            })
            .map(|m| m.id)
            .collect();
        ids.sort_by_key(|id| {
            let file = self.member_file(*id).map(|f| f.0).unwrap_or(u32::MAX);
            let pos = self
                .symbols
                .get(*id)
                .and_then(|m| m.signature_span)
                .map(|s| s.start)
                .unwrap_or(usize::MAX);
            (file, pos, *id)
        });
        ids
    }
}
