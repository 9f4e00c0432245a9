// Handler resolution and member-body traversal.
//
// The body is walked in program order with a LIFO frame stack. Every inferred
// throw site flows outward through the enclosing try frames: the first
// filterless clause whose type matches handles it; filtered clauses accrue
// the type but conservatively let it continue. Whatever passes every frame
// reaches the member boundary and is reconciled with the declared contract.

pub mod frames;
pub mod reachability;

use crate::diagnostics::diagnostic_code::DiagnosticCode;
use crate::framework::diagnostic_builder::DiagnosticBuilder;
use crate::framework::session::AnalysisSession;
use crate::inference::{self, ThrowOrigin, ThrowSite, linq};
use crate::lattice::ExceptionSet;
use crate::model::body::{AccessDirection, Expr, InvocationExpr, LocalId, Stmt, ThrowStmt, TryStmt};
use crate::model::compilation::{Compilation, FileId};
use crate::model::span::Span;
use crate::model::symbols::{MemberSymbol, SymbolId};
use crate::settings::{Classification, InformationalMode};
use frames::TryFrame;
use log::trace;
use reachability::Reachability;
use std::collections::HashMap;

/// Outcome of analyzing one member body.
#[derive(Debug, Clone, Default)]
pub struct FlowResult {
    /// Types that exit the member boundary unhandled.
    pub escaping: ExceptionSet,
    /// Every type appearing in any reachable may-throw set in the body,
    /// handled or not. Drives redundant-declaration checking.
    pub thrown_anywhere: ExceptionSet,
}

/// Analyze a member body and emit flow diagnostics. Returns `None` when the
/// member has no body.
pub fn analyze_member(session: &mut AnalysisSession<'_>, id: SymbolId) -> Option<FlowResult> {
    analyze_body(session, id, false)
}

/// Analyze an unannotated lambda body: escape sites are collected but not
/// reported; the container decides what to do with the inferred set.
pub fn analyze_inferred(session: &mut AnalysisSession<'_>, id: SymbolId) -> Option<FlowResult> {
    analyze_body(session, id, true)
}

fn analyze_body(
    session: &mut AnalysisSession<'_>,
    id: SymbolId,
    quiet_boundary: bool,
) -> Option<FlowResult> {
    let comp = session.comp;
    let body = comp.body(id)?;
    let Some(member) = comp.symbols.get(id) else {
        session.internal_degrade(None, None);
        return None;
    };
    let file = comp.member_file(id);

    let declared_cover = session.contracts.contract(id);
    let root = comp.hierarchy.exception_root();
    let catch_rest = session.settings.treat_throws_exception_as_catch_rest
        && root.map(|r| session.contracts.declared(id).contains(r)).unwrap_or(false);

    let reach = if session.settings.disable_control_flow_analysis {
        None
    } else {
        Some(reachability::analyze(&body.statements))
    };

    trace!("flow: analyzing member '{}'", member.name);

    let mut walker = MemberFlow {
        session,
        comp,
        member,
        file,
        quiet_boundary,
        declared_cover,
        catch_rest,
        tries: Vec::new(),
        catch_views: Vec::new(),
        locals: HashMap::new(),
        reach,
        escaping: ExceptionSet::new(),
        thrown_anywhere: ExceptionSet::new(),
        degraded: false,
    };
    walker.walk_block(&body.statements);

    Some(FlowResult {
        escaping: walker.escaping,
        thrown_anywhere: walker.thrown_anywhere,
    })
}

/// Flow plus contract checking, as the pipeline runs it for each member.
/// Nested annotated callables go through the same path.
pub fn analyze_and_check(session: &mut AnalysisSession<'_>, id: SymbolId) {
    let result = analyze_member(session, id);
    crate::checker::check_member(session, id, result.as_ref());
}

/// Result of evaluating one expression: the deferred-exception set riding its
/// value, plus lambda-contract info when the expression is a lambda literal.
#[derive(Default)]
struct EvalResult {
    deferred: ExceptionSet,
    lambda: Option<LambdaContract>,
}

struct LambdaContract {
    set: ExceptionSet,
    annotated: bool,
    param_list_span: Option<Span>,
    span: Span,
}

struct MemberFlow<'s, 'c> {
    session: &'s mut AnalysisSession<'c>,
    comp: &'c Compilation,
    member: &'c MemberSymbol,
    file: Option<FileId>,
    quiet_boundary: bool,
    declared_cover: ExceptionSet,
    catch_rest: bool,
    tries: Vec<TryFrame>,
    /// Rethrow views for the catch clauses currently being traversed.
    catch_views: Vec<ExceptionSet>,
    locals: HashMap<LocalId, ExceptionSet>,
    reach: Option<Reachability>,
    escaping: ExceptionSet,
    thrown_anywhere: ExceptionSet,
    degraded: bool,
}

impl<'s, 'c> MemberFlow<'s, 'c> {
    fn is_reachable(&self, stmt: &Stmt) -> bool {
        self.reach.as_ref().map(|r| r.is_reachable(stmt)).unwrap_or(true)
    }

    fn emit(&mut self, code: DiagnosticCode, message: String, span: Span) {
        let mut b = DiagnosticBuilder::new(code).with_message(message);
        if let Some(file) = self.file {
            b = b.at_span(self.session, file, span);
        }
        b.emit(self.session);
    }

    fn degrade(&mut self, span: Option<Span>) {
        if !self.degraded {
            self.degraded = true;
            let file = self.file;
            self.session.internal_degrade(file, span);
        }
    }

    // ---- statements ----

    fn walk_block(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.walk_stmt(stmt);
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt) {
        if !self.is_reachable(stmt) {
            // Local function declarations are hoisted; analyze the body even
            // when the declaration site is dead.
            if let Stmt::LocalFunction(lf) = stmt {
                crate::flow::analyze_and_check(self.session, lf.symbol);
            }
            return;
        }
        match stmt {
            Stmt::Block(stmts) => self.walk_block(stmts),
            Stmt::Expr(e) => {
                self.walk_expr(e);
            }
            Stmt::Local(decl) => {
                let deferred = match &decl.init {
                    Some(init) => self.walk_expr(init).deferred,
                    None => ExceptionSet::new(),
                };
                self.locals.insert(decl.local, deferred);
            }
            Stmt::Throw(t) => self.walk_throw(t),
            Stmt::Return(r) => {
                if let Some(expr) = &r.expr {
                    let result = self.walk_expr(expr);
                    self.deferred_boundary(&result.deferred, expr.span());
                }
            }
            Stmt::If(s) => {
                self.walk_expr(&s.cond);
                self.walk_stmt(&s.then_branch);
                if let Some(e) = &s.else_branch {
                    self.walk_stmt(e);
                }
            }
            Stmt::While(s) => {
                self.walk_expr(&s.cond);
                self.walk_stmt(&s.body);
            }
            Stmt::DoWhile(s) => {
                self.walk_stmt(&s.body);
                self.walk_expr(&s.cond);
            }
            Stmt::Switch(s) => {
                self.walk_expr(&s.scrutinee);
                for section in &s.sections {
                    for guard in &section.guards {
                        self.walk_expr(guard);
                    }
                    self.walk_block(&section.statements);
                }
            }
            Stmt::For(s) => {
                if let Some(init) = &s.init {
                    self.walk_stmt(init);
                }
                if let Some(cond) = &s.cond {
                    self.walk_expr(cond);
                }
                for update in &s.update {
                    self.walk_expr(update);
                }
                self.walk_stmt(&s.body);
            }
            Stmt::Using(s) => {
                if let Some(resource) = &s.resource {
                    self.walk_expr(resource);
                }
                self.walk_block(&s.body);
            }
            Stmt::ForEach(s) => {
                let source = self.walk_expr(&s.source);
                // Enumeration forces the query
                let sites = inference::materialize(&source.deferred, s.source.span());
                for site in sites {
                    self.raise(site);
                }
                self.walk_stmt(&s.body);
            }
            Stmt::Try(t) => self.walk_try(t),
            Stmt::LocalFunction(lf) => {
                crate::flow::analyze_and_check(self.session, lf.symbol);
            }
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty => {}
        }
    }

    fn walk_throw(&mut self, t: &ThrowStmt) {
        if let Some(operand) = &t.operand {
            self.walk_expr(operand);
        }
        match t.exception {
            Some(ty) => {
                self.check_throws_base_exception(ty, t.span);
                self.raise(ThrowSite::thrown(ty, t.span));
            }
            None => self.rethrow(t.keyword_span),
        }
    }

    /// A bare `throw;`: the may-throw set is the nearest catch clause's view.
    fn rethrow(&mut self, keyword_span: Span) {
        let Some(view) = self.catch_views.last().cloned() else {
            self.degrade(Some(keyword_span));
            return;
        };
        for ty in view.iter() {
            self.raise(ThrowSite::propagated(ty, keyword_span));
        }
    }

    fn check_throws_base_exception(&mut self, ty: crate::model::types::TypeId, span: Span) {
        let h = &self.comp.hierarchy;
        if !h.is_exception_root(ty) || self.session.settings.disable_base_exception_thrown_diagnostic
        {
            return;
        }
        if self.session.settings.classify(h, ty) == Classification::Ignored {
            return;
        }
        self.emit(
            DiagnosticCode::TCW02002,
            DiagnosticCode::TCW02002.default_message().to_string(),
            span,
        );
    }

    fn walk_try(&mut self, t: &TryStmt) {
        self.tries.push(TryFrame::from_try(t));
        self.walk_block(&t.body);
        let frame = self.tries.pop().expect("try frame pushed above");

        self.check_catch_redundancy(&frame);

        // Catch bodies run with the frame popped: a clause never handles what
        // it (or a sibling) throws.
        for (clause, state) in t.catches.iter().zip(frame.catches.iter()) {
            // With flow analysis on, a clause nothing reaches is dead code
            if state.caught.is_empty() && self.reach.is_some() {
                continue;
            }
            if let Some(filter) = &clause.filter {
                self.walk_expr(filter);
            }
            let view = match state.ty {
                Some(c) => ExceptionSet::from_iter([c]),
                None => state.caught.clone(),
            };
            self.catch_views.push(view);
            self.walk_block(&clause.body);
            self.catch_views.pop();
        }

        if let Some(fin) = &t.finally {
            // Escapes from a finally flow outward from the finally itself
            self.walk_block(fin);
        }
    }

    fn check_catch_redundancy(&mut self, frame: &TryFrame) {
        let settings = self.session.settings;
        let enabled = if settings.disable_control_flow_analysis {
            settings.enable_legacy_redundancy_checks
        } else {
            true
        };
        if !enabled {
            return;
        }
        let h = &self.comp.hierarchy;
        for state in &frame.catches {
            if !state.caught.is_empty() {
                continue;
            }
            match state.ty {
                Some(ty) => {
                    if settings.classify(h, ty) == Classification::Ignored {
                        continue;
                    }
                    let span = state.type_span.unwrap_or(state.keyword_span);
                    self.emit(
                        DiagnosticCode::TCW04001,
                        format!("Catch of '{}' never matches a thrown exception", h.name(ty)),
                        span,
                    );
                }
                None => {
                    self.emit(
                        DiagnosticCode::TCW04002,
                        DiagnosticCode::TCW04002.default_message().to_string(),
                        state.keyword_span,
                    );
                }
            }
            self.emit(
                DiagnosticCode::TCW04003,
                DiagnosticCode::TCW04003.default_message().to_string(),
                state.keyword_span,
            );
        }
    }

    // ---- site resolution ----

    /// Flow one throw site outward through the enclosing frames.
    fn raise(&mut self, site: ThrowSite) {
        self.thrown_anywhere.insert(site.ty);
        let h = &self.comp.hierarchy;

        for i in (0..self.tries.len()).rev() {
            let mut handled = false;
            for clause in self.tries[i].catches.iter_mut() {
                if !self.comp.hierarchy.matches_catch(site.ty, clause.ty) {
                    continue;
                }
                clause.caught.insert(site.ty);
                if !clause.has_filter {
                    // Handled here; the site goes no further
                    handled = true;
                    break;
                }
                // A filter may decline at runtime: the type stays live
            }
            if handled {
                return;
            }
        }

        // Member boundary
        self.escaping.insert(site.ty);
        if self.quiet_boundary {
            return;
        }
        let settings = self.session.settings;
        match settings.classify(h, site.ty) {
            Classification::Ignored => {}
            Classification::NonStrict => {
                if self.declared_cover.covers(site.ty, h) {
                    return;
                }
                let mode = settings.informational_mode(h.fqn(site.ty));
                let report = match mode {
                    InformationalMode::Always => true,
                    InformationalMode::Throw => site.origin == ThrowOrigin::Thrown,
                    InformationalMode::Propagation => site.origin == ThrowOrigin::Propagated,
                };
                if report {
                    let msg = format!("Exception '{}' propagates here", h.name(site.ty));
                    self.emit(DiagnosticCode::TCI01002, msg, site.anchor);
                }
            }
            Classification::Strict => {
                if self.declared_cover.covers(site.ty, h) || self.catch_rest {
                    return;
                }
                let msg = format!(
                    "Exception '{}' may escape and is neither caught nor declared",
                    h.name(site.ty)
                );
                self.emit(DiagnosticCode::TCW01001, msg, site.anchor);
            }
        }
    }

    /// A deferred-query value crosses a boundary the analyzer cannot follow.
    fn deferred_boundary(&mut self, deferred: &ExceptionSet, span: Span) {
        if deferred.is_empty() {
            return;
        }
        let h = &self.comp.hierarchy;
        let strict: Vec<_> = deferred
            .iter()
            .filter(|ty| self.session.settings.classify(h, *ty) == Classification::Strict)
            .collect();
        for ty in strict {
            let msg = format!(
                "Deferred query may throw '{}' beyond this point; materialize or declare it",
                h.name(ty)
            );
            self.emit(DiagnosticCode::TCW05001, msg, span);
        }
    }

    // ---- expressions ----

    fn walk_expr(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(_) | Expr::Name(_) => EvalResult::default(),
            Expr::Local(l) => EvalResult {
                deferred: self.locals.get(&l.id).cloned().unwrap_or_default(),
                lambda: None,
            },
            Expr::Lambda(l) => self.eval_lambda(l.symbol, l.span),
            Expr::Binary(b) | Expr::Coalesce(b) => {
                let left = self.walk_expr(&b.left);
                let right = self.walk_expr(&b.right);
                let mut deferred = left.deferred;
                deferred.union_with(&right.deferred);
                EvalResult {
                    deferred,
                    lambda: None,
                }
            }
            Expr::Conditional(c) => {
                self.walk_expr(&c.cond);
                let t = self.walk_expr(&c.then_expr);
                let e = self.walk_expr(&c.else_expr);
                let mut deferred = t.deferred;
                deferred.union_with(&e.deferred);
                EvalResult {
                    deferred,
                    lambda: None,
                }
            }
            Expr::Cast(c) => {
                let operand = self.walk_expr(&c.operand);
                let sites = inference::cast_sites(&self.comp.hierarchy, c.kind, c.span);
                for site in sites {
                    self.raise(site);
                }
                EvalResult {
                    deferred: operand.deferred,
                    lambda: None,
                }
            }
            Expr::Spread(s) => {
                let operand = self.walk_expr(&s.operand);
                let sites = inference::materialize(&operand.deferred, s.span);
                for site in sites {
                    self.raise(site);
                }
                EvalResult::default()
            }
            Expr::Throw(t) => {
                if let Some(operand) = &t.operand {
                    self.walk_expr(operand);
                }
                if let Some(ty) = t.exception {
                    self.check_throws_base_exception(ty, t.span);
                    self.raise(ThrowSite::thrown(ty, t.span));
                }
                EvalResult::default()
            }
            Expr::New(n) => {
                for arg in &n.args {
                    let result = self.walk_expr(arg);
                    self.deferred_boundary(&result.deferred, arg.span());
                }
                if let Some(ctor) = n.ctor {
                    self.raise_call(ctor, n.span);
                }
                EvalResult::default()
            }
            Expr::Access(a) => {
                if let Some(receiver) = &a.receiver {
                    self.walk_expr(receiver);
                }
                for arg in &a.args {
                    self.walk_expr(arg);
                }
                let use_getter = matches!(
                    a.direction,
                    AccessDirection::Read | AccessDirection::ReadWrite
                );
                let use_setter = matches!(
                    a.direction,
                    AccessDirection::Write | AccessDirection::ReadWrite
                );
                if use_getter && let Some(getter) = a.getter {
                    self.raise_call(getter, a.name_span);
                }
                if use_setter && let Some(setter) = a.setter {
                    self.raise_call(setter, a.name_span);
                }
                EvalResult::default()
            }
            Expr::Await(a) => match &a.operand {
                // The awaited operation's contract anchors at the await token
                Expr::Invocation(inv) => self.eval_invocation(inv, Some(a.keyword_span)),
                other => self.walk_expr(other),
            },
            Expr::Invocation(inv) => self.eval_invocation(inv, None),
        }
    }

    /// Raise a callee's observed contract at `anchor`.
    fn raise_call(&mut self, callee: SymbolId, anchor: Span) {
        if self.comp.symbols.get(callee).is_none() {
            self.degrade(Some(anchor));
            return;
        }
        let sites = inference::call_sites(
            &self.session.contracts,
            &self.comp.hierarchy,
            self.member,
            callee,
            anchor,
        );
        for site in sites {
            self.raise(site);
        }
    }

    fn eval_lambda(&mut self, symbol: SymbolId, span: Span) -> EvalResult {
        let Some(sym) = self.comp.symbols.get(symbol) else {
            self.degrade(Some(span));
            return EvalResult::default();
        };
        let annotated = !sym.throws.is_empty();
        let param_list_span = sym.param_list_span;
        let set = if annotated {
            // An annotated lambda is held to its own contract
            crate::flow::analyze_and_check(self.session, symbol);
            self.session.contracts.declared(symbol)
        } else {
            analyze_inferred(self.session, symbol)
                .map(|r| r.escaping)
                .unwrap_or_default()
        };
        EvalResult {
            deferred: ExceptionSet::new(),
            lambda: Some(LambdaContract {
                set,
                annotated,
                param_list_span,
                span,
            }),
        }
    }

    fn eval_invocation(
        &mut self,
        inv: &InvocationExpr,
        contract_anchor: Option<Span>,
    ) -> EvalResult {
        let receiver = match &inv.receiver {
            Some(r) => Some((self.walk_expr(r), r.span())),
            None => None,
        };
        let args: Vec<(EvalResult, Span)> = inv
            .args
            .iter()
            .map(|a| (self.walk_expr(a), a.span()))
            .collect();

        let callee_id = inv.callee.symbol();
        let Some(callee) = self.comp.symbols.get(callee_id) else {
            self.degrade(Some(inv.name_span));
            return EvalResult::default();
        };

        // Delegate-typed callees resolve to the delegate's Invoke symbol and
        // use its contract the same way a direct member call would.
        let anchor = contract_anchor.unwrap_or(inv.name_span);
        self.raise_call(callee_id, anchor);

        if let Some(op) = linq::recognize(callee, self.session.settings) {
            return self.eval_linq(inv, &op, receiver, args);
        }

        // Non-LINQ boundary: a deferred value passed as an argument cannot be
        // tracked further.
        if let Some((rcv, span)) = &receiver {
            self.deferred_boundary(&rcv.deferred, *span);
        }
        for (result, span) in &args {
            self.deferred_boundary(&result.deferred, *span);
        }
        EvalResult::default()
    }

    fn eval_linq(
        &mut self,
        inv: &InvocationExpr,
        op: &linq::LinqOperator,
        receiver: Option<(EvalResult, Span)>,
        args: Vec<(EvalResult, Span)>,
    ) -> EvalResult {
        let mut accumulated = receiver
            .map(|(r, _)| r.deferred)
            .unwrap_or_default();

        for (result, _) in &args {
            accumulated.union_with(&result.deferred);
            if let Some(lambda) = &result.lambda {
                accumulated.union_with(&lambda.set);
                if !lambda.annotated && !lambda.set.is_empty() {
                    self.suggest_lambda_contract(lambda);
                }
            }
        }

        let extras = inference::sites_from_fqns(
            &self.comp.hierarchy,
            linq::builtin_exceptions(&op.normalized),
            inv.name_span,
        );

        match op.kind {
            linq::OperatorKind::Deferred => {
                for site in &extras {
                    accumulated.insert(site.ty);
                }
                EvalResult {
                    deferred: accumulated,
                    lambda: None,
                }
            }
            linq::OperatorKind::Terminator => {
                let sites = inference::materialize(&accumulated, inv.name_span);
                for site in sites {
                    self.raise(site);
                }
                for site in extras {
                    self.raise(site);
                }
                EvalResult::default()
            }
        }
    }

    /// An unannotated lambda in a LINQ pipeline throws: suggest a contract at
    /// the parameter list.
    fn suggest_lambda_contract(&mut self, lambda: &LambdaContract) {
        if self.session.settings.disable_linq_implicitly_declared_exceptions {
            return;
        }
        let h = &self.comp.hierarchy;
        let anchor = lambda.param_list_span.unwrap_or(lambda.span);
        let types: Vec<_> = lambda
            .set
            .iter()
            .filter(|ty| self.session.settings.classify(h, *ty) == Classification::Strict)
            .collect();
        for ty in types {
            let msg = format!(
                "Lambda implicitly throws '{}'; consider declaring a contract",
                h.name(ty)
            );
            self.emit(DiagnosticCode::TCI05002, msg, anchor);
        }
    }
}
