// Host semantic model interface.
//
// The analyzer does not parse source; the host supplies a resolved view of
// the program: the exception-type hierarchy, member symbols with their
// authored Throws annotations and documentation, and member bodies as a
// statement/expression tree carrying token-level spans.

pub mod body;
pub mod compilation;
pub mod span;
pub mod symbols;
pub mod types;

pub use body::{Body, Expr, Stmt};
pub use compilation::{Compilation, FileId};
pub use span::Span;
pub use symbols::{MemberKind, MemberSymbol, PropertyId, PropertyInfo, SymbolId, SymbolTable};
pub use types::{TypeHierarchy, TypeId};
