use crate::common::{Fixture, assert_clean, codes, find};
use throwcheck::DiagnosticCode;
use throwcheck::model::span::Span;
use throwcheck::model::symbols::{MemberKind, MemberSymbol};

fn override_pair(fx: &mut Fixture, base_throws: &[throwcheck::model::types::TypeId], derived_throws: &[throwcheck::model::types::TypeId]) -> throwcheck::model::symbols::SymbolId {
    let base = fx.add_method("M");
    let base_args: Vec<_> = base_throws.iter().map(|t| (*t, Span::default())).collect();
    if !base_args.is_empty() {
        fx.declare_throws(base, &base_args);
    }
    let mut derived = MemberSymbol::new("M", MemberKind::Method);
    derived.overrides = vec![base];
    derived.signature_span = Some(fx.span("override void M()"));
    let derived = fx.add_member(derived);
    let derived_args: Vec<_> = derived_throws.iter().map(|t| (*t, Span::default())).collect();
    if !derived_args.is_empty() {
        fx.declare_throws(derived, &derived_args);
    }
    fx.comp.set_member_file(derived, fx.file);
    derived
}

const SRC: &str = "\
class Derived : Base
{
    public override void M();
}
";

#[test]
fn override_omitting_a_base_exception_is_reported() {
    let mut fx = Fixture::new(SRC);
    let (io, format) = (fx.types.io, fx.types.format);
    override_pair(&mut fx, &[io, format], &[io]);

    let report = fx.run();
    let missing = find(&report, DiagnosticCode::TCW03002);
    assert_eq!(missing.len(), 1, "got: {:?}", codes(&report));
    assert!(missing[0].message.contains("FormatException"));
}

#[test]
fn matching_contracts_are_compatible() {
    let mut fx = Fixture::new(SRC);
    let (io, format) = (fx.types.io, fx.types.format);
    override_pair(&mut fx, &[io, format], &[format, io]);
    assert_clean(&fx.run());
}

#[test]
fn derived_supertype_declaration_covers_the_base_entry() {
    // Base declares FileNotFoundException, the override widens to IOException
    let mut fx = Fixture::new(SRC);
    let (io, fnf) = (fx.types.io, fx.types.file_not_found);
    override_pair(&mut fx, &[fnf], &[io]);

    let report = fx.run();
    // The base entry is covered, but the widened type is a new declaration
    assert!(find(&report, DiagnosticCode::TCW03002).is_empty());
    let incompatible = find(&report, DiagnosticCode::TCW03001);
    assert_eq!(incompatible.len(), 1, "got: {:?}", codes(&report));
    assert!(incompatible[0].message.contains("IOException"));
}

#[test]
fn interface_implementations_union_their_contracts() {
    let mut fx = Fixture::new(SRC);
    let (io, format) = (fx.types.io, fx.types.format);
    let iface_a = fx.add_method("M");
    fx.declare_throws(iface_a, &[(io, Span::default())]);
    let iface_b = fx.add_method("M");
    fx.declare_throws(iface_b, &[(format, Span::default())]);

    let mut derived = MemberSymbol::new("M", MemberKind::Method);
    derived.overrides = vec![iface_a, iface_b];
    derived.signature_span = Some(fx.span("override void M()"));
    let derived = fx.add_member(derived);
    fx.declare_throws(derived, &[(io, Span::default())]);
    fx.comp.set_member_file(derived, fx.file);

    let report = fx.run();
    let missing = find(&report, DiagnosticCode::TCW03002);
    assert_eq!(missing.len(), 1, "got: {:?}", codes(&report));
    assert!(missing[0].message.contains("FormatException"));
}

#[test]
fn declaring_the_root_does_not_silence_compatibility() {
    let mut fx = Fixture::new(SRC);
    let (exception, format) = (fx.types.exception, fx.types.format);
    override_pair(&mut fx, &[], &[exception, format]);

    let mut settings = throwcheck::AnalyzerSettings::default();
    settings.treat_throws_exception_as_catch_rest = true;
    settings.disable_base_exception_declared_diagnostic = true;
    let report = fx.run_with(&settings);
    // Compatibility runs on the canonicalized declared set, where the root
    // subsumes FormatException; the root itself is still an addition over the
    // empty inherited contract
    let incompatible = find(&report, DiagnosticCode::TCW03001);
    assert_eq!(incompatible.len(), 1, "got: {:?}", codes(&report));
    assert!(incompatible[0].message.contains("Exception"));
}
