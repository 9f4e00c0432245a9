use crate::model::span::Span;
use crate::model::symbols::SymbolId;
use crate::model::types::TypeId;
use serde::{Deserialize, Serialize};

/// Local-variable identifier, unique within one member body.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LocalId(pub u32);

/// A member body as supplied by the host.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Body {
    pub statements: Vec<Stmt>,
}

impl Body {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Stmt {
    Block(Vec<Stmt>),
    Expr(Expr),
    Local(LocalDeclStmt),
    Throw(ThrowStmt),
    Return(ReturnStmt),
    If(Box<IfStmt>),
    While(Box<WhileStmt>),
    DoWhile(Box<DoWhileStmt>),
    For(Box<ForStmt>),
    ForEach(Box<ForEachStmt>),
    Switch(Box<SwitchStmt>),
    Using(Box<UsingStmt>),
    Try(Box<TryStmt>),
    LocalFunction(LocalFunctionStmt),
    Break(Span),
    Continue(Span),
    Empty,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalDeclStmt {
    pub local: LocalId,
    pub name: String,
    pub init: Option<Expr>,
    pub span: Span,
}

/// `throw e;` or a bare rethrow `throw;`.
///
/// `exception` is the static type of the thrown value, resolved by the host;
/// both fields are `None` for a rethrow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrowStmt {
    pub exception: Option<TypeId>,
    pub operand: Option<Expr>,
    pub keyword_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub expr: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: Stmt,
    pub else_branch: Option<Stmt>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Stmt,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoWhileStmt {
    pub body: Stmt,
    pub cond: Expr,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub scrutinee: Expr,
    pub sections: Vec<SwitchSection>,
}

/// One `case ...:` group. Patterns themselves cannot throw; `when` guards
/// can, so they are kept as expressions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchSection {
    pub guards: Vec<Expr>,
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub update: Vec<Expr>,
    pub body: Stmt,
}

/// `using` statement; disposal contracts are the host's concern, the body is
/// analyzed in program order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UsingStmt {
    pub resource: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// `foreach` enumeration; a materialization point for deferred queries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForEachStmt {
    pub local: Option<LocalId>,
    pub source: Expr,
    pub body: Stmt,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryStmt {
    pub body: Vec<Stmt>,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Vec<Stmt>>,
}

/// `ty == None` is a catch-all clause.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatchClause {
    pub ty: Option<TypeId>,
    pub type_span: Option<Span>,
    pub keyword_span: Span,
    pub filter: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// Local function definition; its body lives in `Compilation::bodies` under
/// the function's symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalFunctionStmt {
    pub symbol: SymbolId,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Expr {
    Invocation(Box<InvocationExpr>),
    New(Box<NewExpr>),
    Access(Box<AccessExpr>),
    Await(Box<AwaitExpr>),
    Cast(Box<CastExpr>),
    Throw(Box<ThrowExpr>),
    Coalesce(Box<BinaryExpr>),
    Binary(Box<BinaryExpr>),
    Conditional(Box<ConditionalExpr>),
    Lambda(LambdaExpr),
    Local(LocalRef),
    Spread(Box<SpreadExpr>),
    Literal(Span),
    Name(Span),
}

impl Expr {
    /// Span most representative of the whole expression, used for boundary
    /// diagnostics on arguments and return values.
    pub fn span(&self) -> Span {
        match self {
            Expr::Invocation(e) => e.span,
            Expr::New(e) => e.span,
            Expr::Access(e) => e.span,
            Expr::Await(e) => e.span,
            Expr::Cast(e) => e.span,
            Expr::Throw(e) => e.span,
            Expr::Coalesce(e) | Expr::Binary(e) => e.span,
            Expr::Conditional(e) => e.span,
            Expr::Lambda(e) => e.span,
            Expr::Local(e) => e.span,
            Expr::Spread(e) => e.span,
            Expr::Literal(s) | Expr::Name(s) => *s,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Callee {
    /// Resolved method, constructor, accessor, or local function.
    Member(SymbolId),
    /// Delegate-typed value; the symbol is the delegate's Invoke member.
    Delegate(SymbolId),
}

impl Callee {
    pub fn symbol(&self) -> SymbolId {
        match self {
            Callee::Member(s) | Callee::Delegate(s) => *s,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationExpr {
    pub callee: Callee,
    /// Extension-method receiver (the value the query rides on), if any.
    pub receiver: Option<Expr>,
    pub args: Vec<Expr>,
    pub name_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewExpr {
    pub ctor: Option<SymbolId>,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AccessDirection {
    Read,
    Write,
    /// Compound assignment: both accessors run.
    ReadWrite,
}

/// Property, indexer, or event accessor use. For events, the host models
/// `+=`/`-=` as a Write against the add/remove accessor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessExpr {
    pub getter: Option<SymbolId>,
    pub setter: Option<SymbolId>,
    pub direction: AccessDirection,
    pub receiver: Option<Expr>,
    /// Indexer arguments.
    pub args: Vec<Expr>,
    pub name_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AwaitExpr {
    pub operand: Expr,
    pub keyword_span: Span,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CastKind {
    /// Reference conversion that can fail at runtime.
    Reference,
    /// Checked numeric conversion that may overflow.
    CheckedNumeric,
    /// Conversion that cannot throw (includes float-to-int truncation).
    Safe,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CastExpr {
    pub kind: CastKind,
    pub operand: Expr,
    pub span: Span,
}

/// Throw expression, e.g. the right side of `a ?? throw new E(...)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrowExpr {
    pub exception: Option<TypeId>,
    pub operand: Option<Expr>,
    pub keyword_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Expr,
    pub right: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConditionalExpr {
    pub cond: Expr,
    pub then_expr: Expr,
    pub else_expr: Expr,
    pub span: Span,
}

/// Lambda definition site; the body lives in `Compilation::bodies` under the
/// lambda's symbol. Produces no exceptions where it is written.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LambdaExpr {
    pub symbol: SymbolId,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalRef {
    pub id: LocalId,
    pub span: Span,
}

/// Collection spread `[.. q]`; a materialization point.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpreadExpr {
    pub operand: Expr,
    pub span: Span,
}
