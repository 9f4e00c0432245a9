// Per-expression may-throw inference.
//
// Each construct yields throw sites: an exception type, the anchor where a
// diagnostic should land if the type escapes, and whether the site throws
// directly or propagates a callee's contract.

pub mod linq;

use crate::contracts::ContractResolver;
use crate::lattice::ExceptionSet;
use crate::model::body::CastKind;
use crate::model::span::Span;
use crate::model::symbols::{MemberSymbol, SymbolId};
use crate::model::types::{TypeHierarchy, TypeId, well_known};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOrigin {
    /// A throw statement or throw expression at this site.
    Thrown,
    /// A callee contract, documentation entry, or deferred set surfacing here.
    Propagated,
}

/// One element of a may-throw set, carrying its diagnostic anchor.
#[derive(Debug, Clone, Copy)]
pub struct ThrowSite {
    pub ty: TypeId,
    pub anchor: Span,
    pub origin: ThrowOrigin,
}

impl ThrowSite {
    pub fn thrown(ty: TypeId, anchor: Span) -> Self {
        Self {
            ty,
            anchor,
            origin: ThrowOrigin::Thrown,
        }
    }

    pub fn propagated(ty: TypeId, anchor: Span) -> Self {
        Self {
            ty,
            anchor,
            origin: ThrowOrigin::Propagated,
        }
    }
}

/// Contract of a callee as observed at a call site: declared types plus
/// documented types, with nullable suppression applied to the documented
/// part.
pub fn call_sites(
    resolver: &ContractResolver<'_>,
    hierarchy: &TypeHierarchy,
    caller: &MemberSymbol,
    callee: SymbolId,
    anchor: Span,
) -> Vec<ThrowSite> {
    let declared = resolver.declared(callee);
    let documented = resolver.documented(callee);

    let mut set = declared.clone();
    for ty in documented.iter() {
        if suppress_documented_argument_null(resolver, hierarchy, caller, callee, ty)
            && !declared.contains(ty)
        {
            continue;
        }
        set.insert(ty);
    }
    set.iter()
        .map(|ty| ThrowSite::propagated(ty, anchor))
        .collect()
}

/// Nullable suppression: a documented ArgumentNullException is dropped when
/// the caller is in an enabled nullable context and every callee parameter is
/// declared non-nullable. Explicitly declared throws are never removed.
fn suppress_documented_argument_null(
    resolver: &ContractResolver<'_>,
    hierarchy: &TypeHierarchy,
    caller: &MemberSymbol,
    callee: SymbolId,
    ty: TypeId,
) -> bool {
    if !caller.nullable_context {
        return false;
    }
    if hierarchy.fqn(ty) != well_known::ARGUMENT_NULL_EXCEPTION {
        return false;
    }
    match resolver.symbol(callee) {
        Some(sym) => !sym.params.is_empty() && sym.params.iter().all(|p| p.non_nullable),
        None => false,
    }
}

/// Exceptions a cast may raise. The cast is the origin site itself, not a
/// contract surfacing here. Float-to-int truncation is not exceptional.
pub fn cast_sites(hierarchy: &TypeHierarchy, kind: CastKind, anchor: Span) -> Vec<ThrowSite> {
    let fqn = match kind {
        CastKind::Reference => well_known::INVALID_CAST_EXCEPTION,
        CastKind::CheckedNumeric => well_known::OVERFLOW_EXCEPTION,
        CastKind::Safe => return Vec::new(),
    };
    hierarchy
        .lookup_fqn(fqn)
        .map(|ty| vec![ThrowSite::thrown(ty, anchor)])
        .unwrap_or_default()
}

/// Resolve a set of built-in exception FQNs to sites at `anchor`. Unknown
/// names are skipped: the hierarchy is the host's source of truth.
pub fn sites_from_fqns(
    hierarchy: &TypeHierarchy,
    fqns: &[&str],
    anchor: Span,
) -> Vec<ThrowSite> {
    fqns.iter()
        .filter_map(|fqn| hierarchy.lookup_fqn(fqn))
        .map(|ty| ThrowSite::propagated(ty, anchor))
        .collect()
}

/// Turn a deferred-exception set into sites at a materialization point.
pub fn materialize(deferred: &ExceptionSet, anchor: Span) -> Vec<ThrowSite> {
    deferred
        .iter()
        .map(|ty| ThrowSite::propagated(ty, anchor))
        .collect()
}
