use crate::common::{Fixture, codes, find};
use throwcheck::model::span::Span;
use throwcheck::settings::{AnalyzerSettings, Classification, InformationalMode};
use throwcheck::{DiagnosticCode, DiagnosticSeverity};

fn fixture_throwing_io() -> Fixture {
    let src = "\
void M()
{
    throw new IOException();
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    fx.set_body(m, vec![fx.throw_new(fx.types.io, "throw new IOException();")]);
    fx
}

#[test]
fn ignored_types_emit_nothing_at_all() {
    let fx = fixture_throwing_io();
    let mut settings = AnalyzerSettings::default();
    settings
        .exceptions
        .insert("System.IO.IOException".to_string(), Classification::Ignored);

    let report = fx.run_with(&settings);
    assert!(
        report.diagnostics.is_empty(),
        "ignored type produced: {:?}",
        codes(&report)
    );
}

#[test]
fn non_strict_types_downgrade_to_informational() {
    let fx = fixture_throwing_io();
    let mut settings = AnalyzerSettings::default();
    settings.exceptions.insert(
        "System.IO.IOException".to_string(),
        Classification::NonStrict,
    );

    let report = fx.run_with(&settings);
    assert!(find(&report, DiagnosticCode::TCW01001).is_empty());
    let info = find(&report, DiagnosticCode::TCI01002);
    assert_eq!(info.len(), 1, "got: {:?}", codes(&report));
    assert_eq!(info[0].severity, DiagnosticSeverity::Info);
}

#[test]
fn non_strict_default_classification_applies_to_every_type() {
    let fx = fixture_throwing_io();
    let mut settings = AnalyzerSettings::default();
    settings.default_exception_classification = Classification::NonStrict;

    let report = fx.run_with(&settings);
    assert!(find(&report, DiagnosticCode::TCW01001).is_empty());
    assert_eq!(find(&report, DiagnosticCode::TCI01002).len(), 1);
}

#[test]
fn informational_throw_mode_reports_thrown_sites_only() {
    // Thrown directly: mode Throw reports, mode Propagation stays silent
    let fx = fixture_throwing_io();
    let mut settings = AnalyzerSettings::default();
    settings.informational_exceptions.insert(
        "System.IO.IOException".to_string(),
        InformationalMode::Throw,
    );
    let report = fx.run_with(&settings);
    assert_eq!(find(&report, DiagnosticCode::TCI01002).len(), 1);

    settings.informational_exceptions.insert(
        "System.IO.IOException".to_string(),
        InformationalMode::Propagation,
    );
    let report = fx.run_with(&settings);
    assert!(find(&report, DiagnosticCode::TCI01002).is_empty());
}

#[test]
fn informational_propagation_mode_reports_call_sites_only() {
    let src = "\
void M()
{
    Read();
}
";
    let mut fx = Fixture::new(src);
    let read = fx.add_method("Read");
    fx.declare_throws(read, &[(fx.types.io, Span::default())]);
    let m = fx.add_method("M");
    fx.set_body(m, vec![fx.call_stmt(read, "Read")]);

    let mut settings = AnalyzerSettings::default();
    settings.informational_exceptions.insert(
        "System.IO.IOException".to_string(),
        InformationalMode::Propagation,
    );
    let report = fx.run_with(&settings);
    assert_eq!(
        find(&report, DiagnosticCode::TCI01002).len(),
        1,
        "got: {:?}",
        codes(&report)
    );

    settings.informational_exceptions.insert(
        "System.IO.IOException".to_string(),
        InformationalMode::Throw,
    );
    let report = fx.run_with(&settings);
    assert!(find(&report, DiagnosticCode::TCI01002).is_empty());
}

#[test]
fn a_failing_cast_counts_as_a_thrown_here_site() {
    let src = "\
void M(object o)
{
    var s = (string)o;
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    fx.set_body(
        m,
        vec![throwcheck::model::body::Stmt::Expr(
            throwcheck::model::body::Expr::Cast(Box::new(throwcheck::model::body::CastExpr {
                kind: throwcheck::model::body::CastKind::Reference,
                operand: throwcheck::model::body::Expr::Name(fx.nth_span("o", 1)),
                span: fx.span("(string)o"),
            })),
        )],
    );

    let mut settings = AnalyzerSettings::default();
    settings.informational_exceptions.insert(
        "System.InvalidCastException".to_string(),
        InformationalMode::Throw,
    );
    let report = fx.run_with(&settings);
    assert_eq!(
        find(&report, DiagnosticCode::TCI01002).len(),
        1,
        "got: {:?}",
        codes(&report)
    );

    settings.informational_exceptions.insert(
        "System.InvalidCastException".to_string(),
        InformationalMode::Propagation,
    );
    let report = fx.run_with(&settings);
    assert!(find(&report, DiagnosticCode::TCI01002).is_empty());
}

#[test]
fn ignored_catch_type_suppresses_redundancy_reports() {
    let src = "\
void M()
{
    try { var x = 0; } catch (IOException) { }
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    let try_stmt = fx.try_stmt(
        vec![],
        vec![fx.catch_typed(fx.types.io, "IOException", 0, vec![])],
    );
    fx.set_body(m, vec![try_stmt]);

    let mut settings = AnalyzerSettings::default();
    settings
        .exceptions
        .insert("System.IO.IOException".to_string(), Classification::Ignored);
    let report = fx.run_with(&settings);
    assert!(
        find(&report, DiagnosticCode::TCW04001).is_empty(),
        "got: {:?}",
        codes(&report)
    );
    assert!(find(&report, DiagnosticCode::TCW04003).is_empty());
}
