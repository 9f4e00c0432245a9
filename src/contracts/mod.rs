// Contract resolution: declared Throws sets, documented sets, and inherited
// contracts, with per-pass caches keyed by symbol identity.

pub mod xmldoc;

use crate::lattice::ExceptionSet;
use crate::model::compilation::Compilation;
use crate::model::symbols::{MemberKind, MemberSymbol, SymbolId};
use crate::model::types::TypeId;
use crate::settings::AnalyzerSettings;
use std::cell::RefCell;
use std::collections::HashMap;

use xmldoc::AccessorTarget;

pub struct ContractResolver<'a> {
    comp: &'a Compilation,
    settings: &'a AnalyzerSettings,
    declared_cache: RefCell<HashMap<SymbolId, ExceptionSet>>,
    documented_cache: RefCell<HashMap<SymbolId, ExceptionSet>>,
    inherited_cache: RefCell<HashMap<SymbolId, ExceptionSet>>,
}

impl<'a> ContractResolver<'a> {
    pub fn new(comp: &'a Compilation, settings: &'a AnalyzerSettings) -> Self {
        Self {
            comp,
            settings,
            declared_cache: RefCell::new(HashMap::new()),
            documented_cache: RefCell::new(HashMap::new()),
            inherited_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&'a MemberSymbol> {
        self.comp.symbols.get(id)
    }

    /// Exact set of types authored in `Throws` annotations on the symbol.
    pub fn declared(&self, id: SymbolId) -> ExceptionSet {
        if let Some(cached) = self.declared_cache.borrow().get(&id) {
            return cached.clone();
        }
        let set = match self.symbol(id) {
            Some(sym) => ExceptionSet::from_iter(sym.declared_args().map(|(t, _)| t)),
            None => ExceptionSet::new(),
        };
        self.declared_cache.borrow_mut().insert(id, set.clone());
        set
    }

    /// Types documented via `<exception>` tags, resolved against the type
    /// hierarchy. Empty when XML-doc interop is disabled. Property-level
    /// documentation is assigned to accessors by the description heuristics.
    pub fn documented(&self, id: SymbolId) -> ExceptionSet {
        if self.settings.disable_xml_doc_interop {
            return ExceptionSet::new();
        }
        if let Some(cached) = self.documented_cache.borrow().get(&id) {
            return cached.clone();
        }
        let mut set = ExceptionSet::new();
        if let Some(sym) = self.symbol(id) {
            if let Some(doc) = &sym.doc {
                for tag in xmldoc::extract_exception_tags(doc) {
                    if let Some(ty) = self.resolve_cref(&tag.cref) {
                        set.insert(ty);
                    }
                }
            }
            // Property-level tags assigned to this accessor
            if let Some(pid) = sym.property
                && let Some(prop) = self.comp.symbols.property(pid)
                && let Some(doc) = &prop.doc
            {
                let wanted = accessor_role(sym.kind);
                for tag in xmldoc::extract_exception_tags(doc) {
                    let target = xmldoc::classify_accessor(
                        &tag.description,
                        prop.getter.is_some(),
                        prop.setter.is_some(),
                    );
                    if Some(target) == wanted
                        && let Some(ty) = self.resolve_cref(&tag.cref)
                    {
                        set.insert(ty);
                    }
                }
            }
        }
        self.documented_cache.borrow_mut().insert(id, set.clone());
        set
    }

    /// Declared union documented: the full one-hop contract used at call
    /// sites.
    pub fn contract(&self, id: SymbolId) -> ExceptionSet {
        let mut set = self.declared(id);
        set.union_with(&self.documented(id));
        set
    }

    /// Union of declared sets over all overridden/implemented members.
    pub fn inherited(&self, id: SymbolId) -> ExceptionSet {
        if let Some(cached) = self.inherited_cache.borrow().get(&id) {
            return cached.clone();
        }
        let mut set = ExceptionSet::new();
        if let Some(sym) = self.symbol(id) {
            for base in &sym.overrides {
                set.union_with(&self.declared(*base));
            }
        }
        self.inherited_cache.borrow_mut().insert(id, set.clone());
        set
    }

    fn resolve_cref(&self, cref: &str) -> Option<TypeId> {
        self.comp
            .hierarchy
            .resolve(xmldoc::strip_cref_prefix(cref))
    }
}

fn accessor_role(kind: MemberKind) -> Option<AccessorTarget> {
    match kind {
        MemberKind::PropertyGetter | MemberKind::IndexerGetter => Some(AccessorTarget::Getter),
        MemberKind::PropertySetter | MemberKind::IndexerSetter => Some(AccessorTarget::Setter),
        _ => None,
    }
}
