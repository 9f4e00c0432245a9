use crate::common::{Fixture, codes, find};
use throwcheck::model::body::{IfStmt, ReturnStmt, Stmt};
use throwcheck::{AnalyzerSettings, DiagnosticCode};

#[test]
fn throw_after_return_is_not_reported() {
    let src = "\
void M()
{
    return;
    throw new IOException();
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    fx.set_body(
        m,
        vec![
            Stmt::Return(ReturnStmt {
                expr: None,
                span: fx.span("return;"),
            }),
            fx.throw_new(fx.types.io, "throw new IOException();"),
        ],
    );

    let report = fx.run();
    assert!(
        find(&report, DiagnosticCode::TCW01001).is_empty(),
        "dead throw must not be reported, got: {:?}",
        codes(&report)
    );

    // Without flow analysis the engine cannot prove unreachability
    let mut settings = AnalyzerSettings::default();
    settings.disable_control_flow_analysis = true;
    let report = fx.run_with(&settings);
    assert_eq!(find(&report, DiagnosticCode::TCW01001).len(), 1);
}

#[test]
fn dead_throw_does_not_keep_a_declaration_alive() {
    let src = "\
[Throws(typeof(IOException))]
void M()
{
    return;
    throw new IOException();
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    fx.declare_throws(m, &[(fx.types.io, fx.span("IOException"))]);
    fx.set_body(
        m,
        vec![
            Stmt::Return(ReturnStmt {
                expr: None,
                span: fx.span("return;"),
            }),
            fx.throw_new(fx.types.io, "throw new IOException();"),
        ],
    );

    let report = fx.run();
    assert_eq!(
        find(&report, DiagnosticCode::TCW02004).len(),
        1,
        "got: {:?}",
        codes(&report)
    );
}

#[test]
fn trailing_throw_after_fully_abrupt_try_is_dead() {
    let src = "\
void M()
{
    try { return; } catch (IOException) { throw; }
    throw new FormatException();
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    let try_stmt = fx.try_stmt(
        vec![Stmt::Return(ReturnStmt {
            expr: None,
            span: fx.span("return;"),
        })],
        vec![fx.catch_typed(fx.types.io, "IOException", 0, vec![fx.rethrow_nth(0)])],
    );
    fx.set_body(
        m,
        vec![
            try_stmt,
            fx.throw_new(fx.types.format, "throw new FormatException();"),
        ],
    );

    let report = fx.run();
    assert!(
        find(&report, DiagnosticCode::TCW01001).is_empty(),
        "got: {:?}",
        codes(&report)
    );
}

#[test]
fn both_branches_of_a_condition_stay_live() {
    let src = "\
void M(bool flag)
{
    if (flag) { throw new IOException(); } else { throw new FormatException(); }
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    fx.set_body(
        m,
        vec![Stmt::If(Box::new(IfStmt {
            cond: throwcheck::model::body::Expr::Name(fx.nth_span("flag", 1)),
            then_branch: fx.throw_new(fx.types.io, "throw new IOException();"),
            else_branch: Some(fx.throw_new(fx.types.format, "throw new FormatException();")),
        }))],
    );

    let report = fx.run();
    assert_eq!(find(&report, DiagnosticCode::TCW01001).len(), 2);
}
