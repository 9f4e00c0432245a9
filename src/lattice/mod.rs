// Exception sets over the host type lattice.
//
// Flow bookkeeping (remaining sets, caught sets, actually-thrown sets) keeps
// exact types; `canonicalize` produces the subsumption-free view used for
// declared-contract comparison and redundancy reporting.

use crate::model::types::{TypeHierarchy, TypeId};
use serde::{Deserialize, Serialize};

/// A finite set of exception types with deterministic (id-sorted) iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionSet {
    items: Vec<TypeId>,
}

impl ExceptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_iter(iter: impl IntoIterator<Item = TypeId>) -> Self {
        let mut set = Self::new();
        for t in iter {
            set.insert(t);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.items.iter().copied()
    }

    pub fn contains(&self, t: TypeId) -> bool {
        self.items.binary_search(&t).is_ok()
    }

    /// Insert an exact type. Returns false when already present.
    pub fn insert(&mut self, t: TypeId) -> bool {
        match self.items.binary_search(&t) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, t);
                true
            }
        }
    }

    pub fn remove(&mut self, t: TypeId) -> bool {
        match self.items.binary_search(&t) {
            Ok(pos) => {
                self.items.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn union_with(&mut self, other: &ExceptionSet) {
        for t in other.iter() {
            self.insert(t);
        }
    }

    /// Remove every element assignable to `target` (i.e. caught by a clause
    /// of that type). Returns the removed elements.
    pub fn remove_assignable_to(&mut self, target: TypeId, h: &TypeHierarchy) -> Vec<TypeId> {
        let mut removed = Vec::new();
        self.items.retain(|t| {
            if h.is_subtype(*t, target) {
                removed.push(*t);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Does any element match a catch of `target`?
    pub fn any_assignable_to(&self, target: TypeId, h: &TypeHierarchy) -> bool {
        self.items.iter().any(|t| h.is_subtype(*t, target))
    }

    /// Is `t` covered by some element (equal or a declared supertype)?
    pub fn covers(&self, t: TypeId, h: &TypeHierarchy) -> bool {
        self.items.iter().any(|d| h.is_subtype(t, *d))
    }

    /// Subsumption-free view: drops every element that is a proper subtype of
    /// another element. Returns the canonical set and the dropped elements.
    /// When `exclude_root_cover` is set, the root sentinel does not subsume
    /// (used by treat-Throws-Exception-as-catch-rest).
    pub fn canonicalize(
        &self,
        h: &TypeHierarchy,
        exclude_root_cover: bool,
    ) -> (ExceptionSet, Vec<TypeId>) {
        let mut kept = ExceptionSet::new();
        let mut dropped = Vec::new();
        for &t in &self.items {
            let subsumed = self.items.iter().any(|&other| {
                other != t
                    && h.is_proper_subtype(t, other)
                    && !(exclude_root_cover && h.is_exception_root(other))
            });
            if subsumed {
                dropped.push(t);
            } else {
                kept.insert(t);
            }
        }
        (kept, dropped)
    }
}
