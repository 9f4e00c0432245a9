// LINQ operator recognition and deferred-execution modeling.
//
// A recognized operator either composes (deferred) or forces evaluation
// (terminator). Deferred operators accumulate lambda contracts into the
// query value; terminators union the accumulated set into the may-throw set
// at the terminator's name token.

use crate::model::symbols::MemberSymbol;
use crate::model::types::well_known;
use crate::settings::AnalyzerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Composes; execution is deferred.
    Deferred,
    /// Forces evaluation of the source query.
    Terminator,
}

#[derive(Debug, Clone)]
pub struct LinqOperator {
    /// Operator name with any async suffix stripped.
    pub normalized: String,
    pub kind: OperatorKind,
}

const DEFERRED_OPERATORS: &[&str] = &[
    "Where",
    "Select",
    "SelectMany",
    "Take",
    "TakeWhile",
    "TakeLast",
    "Skip",
    "SkipWhile",
    "SkipLast",
    "OrderBy",
    "OrderByDescending",
    "ThenBy",
    "ThenByDescending",
    "GroupBy",
    "Join",
    "GroupJoin",
    "Distinct",
    "DistinctBy",
    "Concat",
    "Union",
    "UnionBy",
    "Intersect",
    "IntersectBy",
    "Except",
    "ExceptBy",
    "Reverse",
    "Zip",
    "Append",
    "Prepend",
    "DefaultIfEmpty",
    "Chunk",
    "Cast",
    "OfType",
    "AsEnumerable",
    "AsQueryable",
];

const TERMINATORS: &[&str] = &[
    "First",
    "FirstOrDefault",
    "Single",
    "SingleOrDefault",
    "Last",
    "LastOrDefault",
    "ElementAt",
    "ElementAtOrDefault",
    "Any",
    "All",
    "Count",
    "LongCount",
    "Sum",
    "Min",
    "MinBy",
    "Max",
    "MaxBy",
    "Average",
    "Aggregate",
    "Contains",
    "SequenceEqual",
    "ToArray",
    "ToList",
    "ToDictionary",
    "ToHashSet",
    "ToLookup",
    "ForEach",
];

/// Strip async operator suffixes so built-in exception knowledge applies to
/// the synchronous form.
pub fn normalize_name(name: &str) -> &str {
    for suffix in ["AwaitWithCancellation", "Await", "Async"] {
        if let Some(stripped) = name.strip_suffix(suffix)
            && !stripped.is_empty()
        {
            return stripped;
        }
    }
    name
}

/// Recognize a LINQ operator invocation: an extension method declared on a
/// type whose simple name ends in `Enumerable` or `Queryable`. Operators not
/// in the deferred table are treated as terminators, so an untracked
/// operator never leaks a deferred set past itself.
pub fn recognize(symbol: &MemberSymbol, settings: &AnalyzerSettings) -> Option<LinqOperator> {
    if settings.disable_linq_support || !symbol.is_extension {
        return None;
    }
    let declaring = symbol.declaring_type.as_deref()?;
    let queryable = declaring.ends_with("Queryable");
    if queryable && settings.disable_linq_queryable_support {
        return None;
    }
    if !queryable && !declaring.ends_with("Enumerable") {
        return None;
    }
    let normalized = normalize_name(&symbol.name).to_string();
    let kind = if DEFERRED_OPERATORS.contains(&normalized.as_str()) {
        OperatorKind::Deferred
    } else {
        OperatorKind::Terminator
    };
    Some(LinqOperator { normalized, kind })
}

/// Built-in exceptions an operator itself can raise, beyond what its lambdas
/// contribute. For deferred operators these surface at materialization.
pub fn builtin_exceptions(normalized: &str) -> &'static [&'static str] {
    match normalized {
        "First" | "Last" | "Single" | "SingleOrDefault" | "ElementAt" | "Min" | "Max"
        | "Average" | "Aggregate" | "MinBy" | "MaxBy" => {
            &[well_known::INVALID_OPERATION_EXCEPTION]
        }
        "Cast" => &[well_known::INVALID_CAST_EXCEPTION],
        "ToDictionary" => &[well_known::ARGUMENT_EXCEPTION],
        _ => &[],
    }
}
