use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque, stable exception-type identifier within a single analysis session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Well-known exception type names the engine has built-in knowledge of.
pub mod well_known {
    pub const EXCEPTION: &str = "System.Exception";
    pub const ARGUMENT_EXCEPTION: &str = "System.ArgumentException";
    pub const ARGUMENT_NULL_EXCEPTION: &str = "System.ArgumentNullException";
    pub const INVALID_OPERATION_EXCEPTION: &str = "System.InvalidOperationException";
    pub const INVALID_CAST_EXCEPTION: &str = "System.InvalidCastException";
    pub const OVERFLOW_EXCEPTION: &str = "System.OverflowException";
    pub const FORMAT_EXCEPTION: &str = "System.FormatException";
}

/// One entry in the (single-inheritance) exception-type lattice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExceptionTypeDef {
    pub id: TypeId,
    pub fqn: String,
    pub name: String,
    pub base: Option<TypeId>,
}

/// Host view of the exception-type hierarchy. `System.Exception` is the root
/// sentinel; canonicalization treats it as top of the lattice.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TypeHierarchy {
    types: Vec<ExceptionTypeDef>,
    by_fqn: HashMap<String, TypeId>,
    by_name: HashMap<String, Vec<TypeId>>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a type by fully qualified name. The simple name is the last
    /// dot-separated segment.
    pub fn add(&mut self, fqn: impl Into<String>, base: Option<TypeId>) -> TypeId {
        let fqn = fqn.into();
        if let Some(id) = self.by_fqn.get(&fqn) {
            return *id;
        }
        let id = TypeId(self.types.len() as u32);
        let name = fqn.rsplit('.').next().unwrap_or(&fqn).to_string();
        self.by_name.entry(name.clone()).or_default().push(id);
        self.by_fqn.insert(fqn.clone(), id);
        self.types.push(ExceptionTypeDef {
            id,
            fqn,
            name,
            base,
        });
        id
    }

    pub fn get(&self, id: TypeId) -> Option<&ExceptionTypeDef> {
        self.types.get(id.0 as usize)
    }

    /// Fully qualified name, or a placeholder for a dangling id.
    pub fn fqn(&self, id: TypeId) -> &str {
        self.get(id).map(|t| t.fqn.as_str()).unwrap_or("<unknown>")
    }

    /// Simple name, or a placeholder for a dangling id.
    pub fn name(&self, id: TypeId) -> &str {
        self.get(id).map(|t| t.name.as_str()).unwrap_or("<unknown>")
    }

    pub fn lookup_fqn(&self, fqn: &str) -> Option<TypeId> {
        self.by_fqn.get(fqn).copied()
    }

    /// Resolve a type reference: exact FQN first, then a simple name if it is
    /// unambiguous.
    pub fn resolve(&self, name: &str) -> Option<TypeId> {
        if let Some(id) = self.by_fqn.get(name) {
            return Some(*id);
        }
        match self.by_name.get(name).map(|v| v.as_slice()) {
            Some([single]) => Some(*single),
            _ => None,
        }
    }

    pub fn exception_root(&self) -> Option<TypeId> {
        self.lookup_fqn(well_known::EXCEPTION)
    }

    pub fn is_exception_root(&self, id: TypeId) -> bool {
        self.exception_root() == Some(id)
    }

    /// True when `a` equals `b` or `b` appears on `a`'s base chain.
    pub fn is_subtype(&self, a: TypeId, b: TypeId) -> bool {
        let mut cur = Some(a);
        while let Some(id) = cur {
            if id == b {
                return true;
            }
            cur = self.get(id).and_then(|t| t.base);
        }
        false
    }

    pub fn is_proper_subtype(&self, a: TypeId, b: TypeId) -> bool {
        a != b && self.is_subtype(a, b)
    }

    /// Least upper bound of two types; falls back to the root sentinel when
    /// the chains do not meet.
    pub fn lub(&self, a: TypeId, b: TypeId) -> Option<TypeId> {
        let mut cur = Some(a);
        while let Some(id) = cur {
            if self.is_subtype(b, id) {
                return Some(id);
            }
            cur = self.get(id).and_then(|t| t.base);
        }
        self.exception_root()
    }

    /// Catch matching: `throw_ty` against a typed clause or a catch-all.
    pub fn matches_catch(&self, throw_ty: TypeId, catch_ty: Option<TypeId>) -> bool {
        match catch_ty {
            Some(c) => self.is_subtype(throw_ty, c),
            None => true,
        }
    }
}
