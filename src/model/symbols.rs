use crate::model::span::Span;
use crate::model::types::TypeId;
use serde::{Deserialize, Serialize};

/// Opaque, stable member-symbol identifier within a single analysis session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Method,
    Constructor,
    PropertyGetter,
    PropertySetter,
    IndexerGetter,
    IndexerSetter,
    EventAdder,
    EventRemover,
    LocalFunction,
    Lambda,
    DelegateInvoke,
}

impl MemberKind {
    /// Lambdas and local functions are reached through their containing body,
    /// never iterated at top level.
    pub fn is_nested(&self) -> bool {
        matches!(self, MemberKind::Lambda | MemberKind::LocalFunction)
    }
}

/// One authored `Throws(...)` attribute, argument order and spans preserved.
/// Duplicates are intentionally kept for duplicate-declaration diagnosis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrowsAnnotation {
    pub attribute_span: Span,
    pub args: Vec<ThrowsArg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrowsArg {
    pub ty: TypeId,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    /// Non-nullable reference parameter under an enabled nullable context.
    pub non_nullable: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberSymbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: MemberKind,
    /// Simple name of the declaring type, e.g. "Enumerable". Drives LINQ
    /// operator recognition for extension methods.
    pub declaring_type: Option<String>,
    pub throws: Vec<ThrowsAnnotation>,
    /// Raw XML documentation text attached to this symbol, if any.
    pub doc: Option<String>,
    /// Members this one overrides or interface members it implements.
    pub overrides: Vec<SymbolId>,
    pub signature_span: Option<Span>,
    /// Parameter-list span; the anchor for lambda-contract suggestions.
    pub param_list_span: Option<Span>,
    pub params: Vec<ParamInfo>,
    pub is_extension: bool,
    /// Nullable reference analysis context at the declaration.
    pub nullable_context: bool,
    /// Owning property for accessor symbols.
    pub property: Option<PropertyId>,
}

impl MemberSymbol {
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            id: SymbolId(u32::MAX), // assigned on insertion
            name: name.into(),
            kind,
            declaring_type: None,
            throws: Vec::new(),
            doc: None,
            overrides: Vec::new(),
            signature_span: None,
            param_list_span: None,
            params: Vec::new(),
            is_extension: false,
            nullable_context: false,
            property: None,
        }
    }

    /// All authored (type, span) pairs across every Throws attribute, in
    /// source order, duplicates preserved.
    pub fn declared_args(&self) -> impl Iterator<Item = (TypeId, Span)> + '_ {
        self.throws
            .iter()
            .flat_map(|a| a.args.iter().map(|arg| (arg.ty, arg.span)))
    }
}

/// Property-level facts needed for documentation heuristics and
/// attribute-placement checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub id: PropertyId,
    pub name: String,
    pub getter: Option<SymbolId>,
    pub setter: Option<SymbolId>,
    /// XML documentation attached to the property declaration itself.
    pub doc: Option<String>,
    /// Throws attributes authored on the property declaration (valid only on
    /// expression-bodied properties).
    pub throws: Vec<ThrowsAnnotation>,
    pub signature_span: Option<Span>,
    /// Has a full accessor list with block bodies.
    pub is_full_property: bool,
    pub expression_bodied: bool,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PropertyId(u32::MAX),
            name: name.into(),
            getter: None,
            setter: None,
            doc: None,
            throws: Vec::new(),
            signature_span: None,
            is_full_property: false,
            expression_bodied: false,
        }
    }
}

/// Member and property tables for one compilation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    members: Vec<MemberSymbol>,
    properties: Vec<PropertyInfo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut member: MemberSymbol) -> SymbolId {
        let id = SymbolId(self.members.len() as u32);
        member.id = id;
        self.members.push(member);
        id
    }

    pub fn insert_property(&mut self, mut property: PropertyInfo) -> PropertyId {
        let id = PropertyId(self.properties.len() as u32);
        property.id = id;
        self.properties.push(property);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&MemberSymbol> {
        self.members.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut MemberSymbol> {
        self.members.get_mut(id.0 as usize)
    }

    pub fn property(&self, id: PropertyId) -> Option<&PropertyInfo> {
        self.properties.get(id.0 as usize)
    }

    pub fn property_mut(&mut self, id: PropertyId) -> Option<&mut PropertyInfo> {
        self.properties.get_mut(id.0 as usize)
    }

    pub fn members(&self) -> impl Iterator<Item = &MemberSymbol> {
        self.members.iter()
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.iter()
    }
}
