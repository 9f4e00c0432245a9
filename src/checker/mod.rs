// Member contract checking, run after the body flow analysis.
//
// Everything here reasons over the authored annotation list (order and
// duplicates preserved), the documented set, the inherited contract, and the
// actually-thrown set the flow walker collected.

use crate::diagnostics::diagnostic_code::DiagnosticCode;
use crate::flow::FlowResult;
use crate::framework::diagnostic_builder::DiagnosticBuilder;
use crate::framework::session::AnalysisSession;
use crate::model::compilation::FileId;
use crate::model::span::Span;
use crate::model::symbols::SymbolId;
use crate::model::types::TypeId;
use crate::settings::Classification;

/// Run the member-boundary checks. `flow` is `None` for bodiless members;
/// body-dependent checks are skipped for those.
pub fn check_member(session: &mut AnalysisSession<'_>, id: SymbolId, flow: Option<&FlowResult>) {
    let comp = session.comp;
    let Some(member) = comp.symbols.get(id) else {
        return;
    };
    let file = comp.member_file(id);
    let h = &comp.hierarchy;
    let settings = session.settings;

    let declared_raw: Vec<(TypeId, Span)> = member.declared_args().collect();
    let declared = session.contracts.declared(id);
    let root = h.exception_root();
    let catch_rest = settings.treat_throws_exception_as_catch_rest;

    let first_span = |ty: TypeId| -> Option<Span> {
        declared_raw
            .iter()
            .find(|(t, _)| *t == ty)
            .map(|(_, s)| *s)
    };

    let mut out: Vec<(DiagnosticCode, String, Option<Span>)> = Vec::new();

    // Duplicate declarations: every repeat of an already-listed type
    let mut seen: Vec<TypeId> = Vec::new();
    for (ty, span) in &declared_raw {
        if seen.contains(ty) {
            if settings.classify(h, *ty) != Classification::Ignored {
                out.push((
                    DiagnosticCode::TCW02003,
                    format!("Duplicate 'Throws' declaration for '{}'", h.name(*ty)),
                    Some(*span),
                ));
            }
        } else {
            seen.push(*ty);
        }
    }

    // Declaring the root type
    if let Some(root) = root
        && declared.contains(root)
        && !settings.disable_base_exception_declared_diagnostic
        && settings.classify(h, root) != Classification::Ignored
    {
        out.push((
            DiagnosticCode::TCW02001,
            DiagnosticCode::TCW02001.default_message().to_string(),
            first_span(root),
        ));
    }

    // Declared subtype subsumed by a declared supertype
    let (_, dropped) = declared.canonicalize(h, catch_rest);
    for ty in dropped {
        if settings.classify(h, ty) == Classification::Ignored {
            continue;
        }
        let cover = declared
            .iter()
            .find(|d| *d != ty && h.is_proper_subtype(ty, *d) && !(catch_rest && h.is_exception_root(*d)));
        let msg = match cover {
            Some(sup) => format!(
                "Declared exception '{}' is subsumed by declared supertype '{}'",
                h.name(ty),
                h.name(sup)
            ),
            None => DiagnosticCode::TCW02005.default_message().to_string(),
        };
        out.push((DiagnosticCode::TCW02005, msg, first_span(ty)));
    }

    // Declared but never thrown (needs a body to judge)
    if let Some(flow) = flow {
        for ty in declared.iter() {
            if catch_rest && root == Some(ty) {
                continue;
            }
            if settings.classify(h, ty) == Classification::Ignored {
                continue;
            }
            if !flow.thrown_anywhere.any_assignable_to(ty, h) {
                out.push((
                    DiagnosticCode::TCW02004,
                    format!("Declared exception '{}' is never thrown", h.name(ty)),
                    first_span(ty),
                ));
            }
        }
    }

    // Override / interface compatibility, on canonicalized sets. Declaring
    // the root never silences these.
    if !member.overrides.is_empty() {
        let inherited = session.contracts.inherited(id);
        let (d_canon, _) = declared.canonicalize(h, false);
        let (i_canon, _) = inherited.canonicalize(h, false);
        for ty in i_canon.iter() {
            if settings.classify(h, ty) == Classification::Ignored {
                continue;
            }
            if !d_canon.covers(ty, h) {
                out.push((
                    DiagnosticCode::TCW03002,
                    format!(
                        "Override omits '{}' declared by the overridden member",
                        h.name(ty)
                    ),
                    member.signature_span,
                ));
            }
        }
        for ty in d_canon.iter() {
            if settings.classify(h, ty) == Classification::Ignored {
                continue;
            }
            if !i_canon.covers(ty, h) {
                out.push((
                    DiagnosticCode::TCW03001,
                    format!(
                        "Override declares '{}' which the overridden member does not declare",
                        h.name(ty)
                    ),
                    member.signature_span,
                ));
            }
        }
    }

    // Documented exceptions with no matching Throws
    let documented = session.contracts.documented(id);
    for ty in documented.iter() {
        if settings.classify(h, ty) == Classification::Ignored {
            continue;
        }
        if !declared.covers(ty, h) {
            out.push((
                DiagnosticCode::TCW03003,
                format!(
                    "XML documentation declares '{}' but there is no matching 'Throws'",
                    h.name(ty)
                ),
                member.signature_span,
            ));
        }
    }

    for (code, msg, span) in out {
        emit(session, file, code, msg, span);
    }
}

/// Property-level checks: `Throws` belongs on accessors, not on a full
/// property declaration.
pub fn check_properties(session: &mut AnalysisSession<'_>) {
    let comp = session.comp;
    let mut out: Vec<(Option<FileId>, Span)> = Vec::new();
    for prop in comp.symbols.properties() {
        if prop.throws.is_empty() || prop.expression_bodied || !prop.is_full_property {
            continue;
        }
        let file = prop
            .getter
            .or(prop.setter)
            .and_then(|acc| comp.member_file(acc));
        for ann in &prop.throws {
            out.push((file, ann.attribute_span));
        }
    }
    for (file, span) in out {
        emit(
            session,
            file,
            DiagnosticCode::TCW02006,
            DiagnosticCode::TCW02006.default_message().to_string(),
            Some(span),
        );
    }
}

fn emit(
    session: &mut AnalysisSession<'_>,
    file: Option<FileId>,
    code: DiagnosticCode,
    message: String,
    span: Option<Span>,
) {
    let mut b = DiagnosticBuilder::new(code).with_message(message);
    if let (Some(file), Some(span)) = (file, span) {
        b = b.at_span(session, file, span);
    }
    b.emit(session);
}
