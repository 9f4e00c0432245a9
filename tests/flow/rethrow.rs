use crate::common::{Fixture, assert_clean, codes, find};
use throwcheck::DiagnosticCode;
use throwcheck::model::span::Span;

#[test]
fn rethrow_in_catch_all_carries_the_remaining_set_only() {
    let src = "\
void M()
{
    try { Read(); } catch (IOException) { } catch { throw; }
}
";
    let mut fx = Fixture::new(src);
    let read = fx.add_method("Read");
    fx.declare_throws(
        read,
        &[
            (fx.types.io, Span::default()),
            (fx.types.format, Span::default()),
        ],
    );
    let m = fx.add_method("M");
    let try_stmt = fx.try_stmt(
        vec![fx.call_stmt(read, "Read")],
        vec![
            fx.catch_typed(fx.types.io, "IOException", 0, vec![]),
            fx.catch_all(1, vec![fx.rethrow_nth(0)]),
        ],
    );
    fx.set_body(m, vec![try_stmt]);

    let report = fx.run();
    // IOException was taken by the earlier typed clause: only the
    // FormatException remains in the catch-all's view
    let unhandled = find(&report, DiagnosticCode::TCW01001);
    assert_eq!(unhandled.len(), 1, "got: {:?}", codes(&report));
    assert!(unhandled[0].message.contains("FormatException"));
}

#[test]
fn rethrow_matching_an_outer_handler_is_clean() {
    let src = "\
void M()
{
    try
    {
        try { Read(); } catch (IOException) { throw; }
    }
    catch (IOException) { }
}
";
    let mut fx = Fixture::new(src);
    let read = fx.add_method("Read");
    fx.declare_throws(read, &[(fx.types.io, Span::default())]);
    let m = fx.add_method("M");
    let inner = fx.try_stmt(
        vec![fx.call_stmt(read, "Read")],
        vec![fx.catch_typed(fx.types.io, "IOException", 0, vec![fx.rethrow_nth(0)])],
    );
    let outer = fx.try_stmt(
        vec![inner],
        vec![fx.catch_typed(fx.types.io, "IOException", 1, vec![])],
    );
    fx.set_body(m, vec![outer]);

    assert_clean(&fx.run());
}

#[test]
fn rethrow_under_a_declared_contract_is_clean() {
    let src = "\
[Throws(typeof(IOException))]
void M()
{
    try { Read(); } catch (IOException) { Log(); throw; }
}
";
    let mut fx = Fixture::new(src);
    let read = fx.add_method("Read");
    fx.declare_throws(read, &[(fx.types.io, Span::default())]);
    let log = fx.add_method("Log");
    let m = fx.add_method("M");
    fx.declare_throws(m, &[(fx.types.io, fx.span("IOException"))]);
    let try_stmt = fx.try_stmt(
        vec![fx.call_stmt(read, "Read")],
        vec![fx.catch_typed(
            fx.types.io,
            "IOException",
            0,
            vec![fx.call_stmt(log, "Log"), fx.rethrow_nth(0)],
        )],
    );
    fx.set_body(m, vec![try_stmt]);

    assert_clean(&fx.run());
}

#[test]
fn empty_catch_all_view_makes_a_rethrow_inert() {
    let src = "\
void M()
{
    try { var x = 0; } catch { throw; }
}
";
    let mut fx = Fixture::new(src);
    let m = fx.add_method("M");
    let try_stmt = fx.try_stmt(vec![], vec![fx.catch_all(0, vec![fx.rethrow_nth(0)])]);
    fx.set_body(m, vec![try_stmt]);

    let report = fx.run();
    // Nothing reaches the clause: the rethrow contributes nothing, and the
    // catch-all itself is redundant
    assert!(find(&report, DiagnosticCode::TCW01001).is_empty());
    assert_eq!(find(&report, DiagnosticCode::TCW04002).len(), 1);
}
