// Shared fixtures: a standard exception hierarchy, a span finder over literal
// source snippets, and small node constructors.

#![allow(dead_code)]

use throwcheck::model::body::{
    Body, CatchClause, Expr, InvocationExpr, LambdaExpr, LocalDeclStmt, LocalId, LocalRef, Stmt,
    ThrowStmt, TryStmt,
};
use throwcheck::model::compilation::{Compilation, FileId};
use throwcheck::model::span::Span;
use throwcheck::model::symbols::{
    MemberKind, MemberSymbol, PropertyInfo, SymbolId, ThrowsAnnotation, ThrowsArg,
};
use throwcheck::model::types::{TypeHierarchy, TypeId, well_known};
use throwcheck::model::body::Callee;
use throwcheck::settings::AnalyzerSettings;
use throwcheck::{AnalysisReport, AnalyzerPipeline, Diagnostic, DiagnosticCode};

pub struct StdTypes {
    pub exception: TypeId,
    pub system: TypeId,
    pub argument: TypeId,
    pub argument_null: TypeId,
    pub invalid_operation: TypeId,
    pub invalid_cast: TypeId,
    pub format: TypeId,
    pub overflow: TypeId,
    pub io: TypeId,
    pub file_not_found: TypeId,
    pub not_supported: TypeId,
}

pub fn std_types() -> (TypeHierarchy, StdTypes) {
    let mut h = TypeHierarchy::new();
    let exception = h.add(well_known::EXCEPTION, None);
    let system = h.add("System.SystemException", Some(exception));
    let argument = h.add(well_known::ARGUMENT_EXCEPTION, Some(system));
    let argument_null = h.add(well_known::ARGUMENT_NULL_EXCEPTION, Some(argument));
    let invalid_operation = h.add(well_known::INVALID_OPERATION_EXCEPTION, Some(system));
    let invalid_cast = h.add(well_known::INVALID_CAST_EXCEPTION, Some(system));
    let format = h.add(well_known::FORMAT_EXCEPTION, Some(system));
    let overflow = h.add(well_known::OVERFLOW_EXCEPTION, Some(system));
    let io = h.add("System.IO.IOException", Some(system));
    let file_not_found = h.add("System.IO.FileNotFoundException", Some(io));
    let not_supported = h.add("System.NotSupportedException", Some(system));
    let types = StdTypes {
        exception,
        system,
        argument,
        argument_null,
        invalid_operation,
        invalid_cast,
        format,
        overflow,
        io,
        file_not_found,
        not_supported,
    };
    (h, types)
}

pub struct Fixture {
    pub comp: Compilation,
    pub types: StdTypes,
    pub file: FileId,
    pub source: String,
}

impl Fixture {
    pub fn new(source: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let (h, types) = std_types();
        let mut comp = Compilation::new(h);
        let file = comp.add_file("test.cs", source);
        Self {
            comp,
            types,
            file,
            source: source.to_string(),
        }
    }

    /// Byte span of the first occurrence of `needle` in the source.
    pub fn span(&self, needle: &str) -> Span {
        self.nth_span(needle, 0)
    }

    /// Byte span of the n-th (0-based) occurrence of `needle`.
    pub fn nth_span(&self, needle: &str, n: usize) -> Span {
        let mut from = 0;
        let mut count = 0;
        while let Some(pos) = self.source[from..].find(needle) {
            let abs = from + pos;
            if count == n {
                return Span::new(abs, abs + needle.len());
            }
            count += 1;
            from = abs + 1;
        }
        panic!("needle {:?} (occurrence {}) not found in fixture source", needle, n);
    }

    pub fn add_method(&mut self, name: &str) -> SymbolId {
        self.comp
            .symbols
            .insert(MemberSymbol::new(name, MemberKind::Method))
    }

    pub fn add_member(&mut self, member: MemberSymbol) -> SymbolId {
        self.comp.symbols.insert(member)
    }

    pub fn declare_throws(&mut self, member: SymbolId, args: &[(TypeId, Span)]) {
        let attribute_span = args
            .first()
            .map(|(_, s)| *s)
            .unwrap_or_default();
        self.declare_throws_at(member, args, attribute_span);
    }

    pub fn declare_throws_at(
        &mut self,
        member: SymbolId,
        args: &[(TypeId, Span)],
        attribute_span: Span,
    ) {
        let annotation = ThrowsAnnotation {
            attribute_span,
            args: args
                .iter()
                .map(|(ty, span)| ThrowsArg { ty: *ty, span: *span })
                .collect(),
        };
        self.comp
            .symbols
            .get_mut(member)
            .expect("member exists")
            .throws
            .push(annotation);
    }

    pub fn add_property(&mut self, property: PropertyInfo) -> throwcheck::model::symbols::PropertyId {
        self.comp.symbols.insert_property(property)
    }

    pub fn set_body(&mut self, member: SymbolId, statements: Vec<Stmt>) {
        let file = self.file;
        self.comp.set_body(member, file, Body::new(statements));
    }

    // ---- node constructors tied to source spans ----

    /// `throw new T(...);` statement: span over the statement text, keyword
    /// span over the leading `throw`.
    pub fn throw_new(&self, ty: TypeId, stmt_text: &str) -> Stmt {
        self.throw_new_nth(ty, stmt_text, 0)
    }

    pub fn throw_new_nth(&self, ty: TypeId, stmt_text: &str, n: usize) -> Stmt {
        let span = self.nth_span(stmt_text, n);
        Stmt::Throw(ThrowStmt {
            exception: Some(ty),
            operand: None,
            keyword_span: Span::new(span.start, span.start + 5),
            span,
        })
    }

    /// Bare rethrow `throw;` (n-th occurrence).
    pub fn rethrow_nth(&self, n: usize) -> Stmt {
        let span = self.nth_span("throw;", n);
        Stmt::Throw(ThrowStmt {
            exception: None,
            operand: None,
            keyword_span: Span::new(span.start, span.start + 5),
            span,
        })
    }

    /// Plain invocation expression anchored at the n-th occurrence of `name`.
    pub fn call_nth(&self, callee: SymbolId, name: &str, n: usize) -> Expr {
        let name_span = self.nth_span(name, n);
        Expr::Invocation(Box::new(InvocationExpr {
            callee: Callee::Member(callee),
            receiver: None,
            args: Vec::new(),
            name_span,
            span: name_span,
        }))
    }

    pub fn call(&self, callee: SymbolId, name: &str) -> Expr {
        self.call_nth(callee, name, 0)
    }

    pub fn call_stmt(&self, callee: SymbolId, name: &str) -> Stmt {
        Stmt::Expr(self.call(callee, name))
    }

    /// Catch clause for a typed handler, spans taken from the n-th `catch`.
    pub fn catch_typed(&self, ty: TypeId, type_text: &str, catch_n: usize, body: Vec<Stmt>) -> CatchClause {
        CatchClause {
            ty: Some(ty),
            type_span: Some(self.span_in_catch(type_text, catch_n)),
            keyword_span: self.nth_span("catch", catch_n),
            filter: None,
            body,
        }
    }

    pub fn catch_all(&self, catch_n: usize, body: Vec<Stmt>) -> CatchClause {
        CatchClause {
            ty: None,
            type_span: None,
            keyword_span: self.nth_span("catch", catch_n),
            filter: None,
            body,
        }
    }

    /// Span of `text` scanning forward from the n-th `catch` keyword.
    pub fn span_in_catch(&self, text: &str, catch_n: usize) -> Span {
        let catch_span = self.nth_span("catch", catch_n);
        let pos = self.source[catch_span.start..]
            .find(text)
            .unwrap_or_else(|| panic!("{:?} not found after catch #{}", text, catch_n));
        let abs = catch_span.start + pos;
        Span::new(abs, abs + text.len())
    }

    pub fn try_stmt(&self, body: Vec<Stmt>, catches: Vec<CatchClause>) -> Stmt {
        Stmt::Try(Box::new(TryStmt {
            body,
            catches,
            finally: None,
        }))
    }

    pub fn local_decl(&self, id: u32, name: &str, init: Expr) -> Stmt {
        Stmt::Local(LocalDeclStmt {
            local: LocalId(id),
            name: name.to_string(),
            init: Some(init),
            span: self.span(name),
        })
    }

    pub fn local_ref_nth(&self, id: u32, name: &str, n: usize) -> Expr {
        Expr::Local(LocalRef {
            id: LocalId(id),
            span: self.nth_span(name, n),
        })
    }

    pub fn lambda(&self, symbol: SymbolId, text: &str) -> Expr {
        Expr::Lambda(LambdaExpr {
            symbol,
            span: self.span(text),
        })
    }

    // ---- running ----

    pub fn run(&self) -> AnalysisReport {
        self.run_with(&AnalyzerSettings::default())
    }

    pub fn run_with(&self, settings: &AnalyzerSettings) -> AnalysisReport {
        AnalyzerPipeline::run(&self.comp, settings)
    }
}

// ---- assertion helpers ----

pub fn codes(report: &AnalysisReport) -> Vec<&'static str> {
    report.diagnostics.iter().map(|d| d.code.as_str()).collect()
}

pub fn find(report: &AnalysisReport, code: DiagnosticCode) -> Vec<&Diagnostic> {
    report.diagnostics.with_code(code).collect()
}

pub fn assert_clean(report: &AnalysisReport) {
    assert!(
        report.diagnostics.is_empty(),
        "expected no diagnostics, got: {:?}",
        codes(report)
    );
}

/// Assert a diagnostic sits exactly at (line, column) with `length`.
pub fn assert_at(d: &Diagnostic, line: usize, column: usize, length: usize) {
    let loc = d
        .location
        .as_ref()
        .unwrap_or_else(|| panic!("diagnostic {} has no location", d.code.as_str()));
    assert_eq!(
        (loc.line, loc.column, loc.length),
        (line, column, length),
        "wrong anchor for {}: {:?}",
        d.code.as_str(),
        loc
    );
}

/// Assert a diagnostic's location equals the given byte span of the fixture.
pub fn assert_span(fx: &Fixture, d: &Diagnostic, span: Span) {
    let ctx = fx.comp.context(fx.file).expect("fixture file context");
    let expected = ctx.location(span);
    let loc = d
        .location
        .as_ref()
        .unwrap_or_else(|| panic!("diagnostic {} has no location", d.code.as_str()));
    assert_eq!(loc, &expected, "wrong anchor for {}", d.code.as_str());
}
