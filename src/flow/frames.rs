use crate::lattice::ExceptionSet;
use crate::model::body::{CatchClause, TryStmt};
use crate::model::span::Span;
use crate::model::types::TypeId;

/// Per-clause state while a try body is traversed. The caught set accrues
/// every type the clause matches; for a catch-all that equals the remaining
/// set at its position, since earlier filterless clauses remove what they
/// handle before the site reaches it.
#[derive(Debug, Clone)]
pub struct CatchState {
    pub ty: Option<TypeId>,
    pub type_span: Option<Span>,
    pub keyword_span: Span,
    pub has_filter: bool,
    pub caught: ExceptionSet,
}

impl CatchState {
    pub fn from_clause(clause: &CatchClause) -> Self {
        Self {
            ty: clause.ty,
            type_span: clause.type_span,
            keyword_span: clause.keyword_span,
            has_filter: clause.filter.is_some(),
            caught: ExceptionSet::new(),
        }
    }
}

/// One `try` construct on the enclosing stack. Frames live for the duration
/// of the try body traversal; catch and finally bodies run with the frame
/// popped, so their sites resolve against outer frames only.
#[derive(Debug, Clone)]
pub struct TryFrame {
    pub catches: Vec<CatchState>,
}

impl TryFrame {
    pub fn from_try(stmt: &TryStmt) -> Self {
        Self {
            catches: stmt.catches.iter().map(CatchState::from_clause).collect(),
        }
    }
}
