//! Kind-specific match rules.
//!
//! Set-typed options that were explicitly emptied (`linkage:`) disable the
//! corresponding member check. The compound-kind set does not: an empty
//! `ctype` excludes every class and enum.

use std::collections::HashSet;

use crate::catalogue::{
    Catalogue, ClassDetail, EnumDetail, MemberDetail, Ownership, Symbol, SymbolDetail, SymbolId,
    SymbolKind,
};
use crate::filter::Filter;

pub fn class_matches(catalogue: &Catalogue, filter: &Filter, class: &ClassDetail) -> bool {
    let compound_ok = class
        .compound_kind()
        .is_some_and(|kind| filter.compound_kinds().contains(kind));
    compound_ok && has_base(catalogue, class, filter.bases())
}

pub fn enum_matches(filter: &Filter, detail: &EnumDetail) -> bool {
    filter.compound_kinds().contains(detail.compound_kind())
}

/// Shared rules for functions and fields. Virtuality only applies to functions.
///
/// Members whose outer scope does not resolve never match.
pub fn member_matches(
    catalogue: &Catalogue,
    filter: &Filter,
    symbol: &Symbol,
    member: &MemberDetail,
) -> bool {
    let Some(owner) = ownership_of(catalogue, symbol, member) else {
        tracing::trace!(name = %symbol.qualified_name, "skipping member with dangling scope");
        return false;
    };

    let linkages = filter.linkages();
    if !linkages.is_empty() && !linkages.contains(member.linkage()) {
        return false;
    }

    let categories = filter.value_categories();
    if !categories.is_empty() && !categories.contains(member.ref_qualifier) {
        return false;
    }

    let qualifiers = filter.qualifiers();
    if !qualifiers.is_empty() && !qualifiers.contains(member.qualifiers()) {
        return false;
    }

    if let Some(constexpr) = filter.constexpr().get() {
        if member.is_constexpr != constexpr {
            return false;
        }
    }

    let ownership = filter.ownership();
    if !ownership.is_empty() && !ownership.contains(owner) {
        return false;
    }

    if symbol.kind == SymbolKind::Function {
        let virtuality = filter.virtuality();
        if !virtuality.is_empty() && !virtuality.contains(member.virtuality) {
            return false;
        }
    }

    true
}

/// Namespace scope (or no scope at all) is free; otherwise friend beats static.
///
/// `None` when the outer scope id does not resolve.
pub fn ownership_of(
    catalogue: &Catalogue,
    symbol: &Symbol,
    member: &MemberDetail,
) -> Option<Ownership> {
    let at_namespace_scope = match symbol.outer_scope {
        Some(id) => catalogue.get(id)?.kind == SymbolKind::Namespace,
        None => true,
    };

    let ownership = if at_namespace_scope {
        Ownership::Free
    } else if member.is_friend {
        Ownership::Friend
    } else if member.is_static {
        Ownership::Static
    } else {
        Ownership::Member
    };
    Some(ownership)
}

/// Any listed base suffices. `@name` only matches an immediate base, plain
/// names are searched through every ancestor.
fn has_base(catalogue: &Catalogue, class: &ClassDetail, bases: &[String]) -> bool {
    if bases.is_empty() {
        return true;
    }

    let mut direct = Vec::new();
    let mut nested = Vec::new();
    for base in bases {
        match base.strip_prefix('@') {
            Some(name) => direct.push(name),
            None => nested.push(base.as_str()),
        }
    }

    let mut immediate = resolved_bases(catalogue, class);
    if immediate.any(|(_, base)| direct.contains(&base.qualified_name.as_str())) {
        return true;
    }

    if nested.is_empty() {
        return false;
    }

    let mut visited = HashSet::new();
    search_ancestors(catalogue, class, &nested, &mut visited)
}

fn search_ancestors<'a>(
    catalogue: &'a Catalogue,
    class: &'a ClassDetail,
    names: &[&str],
    visited: &mut HashSet<SymbolId>,
) -> bool {
    for (id, base) in resolved_bases(catalogue, class) {
        if !visited.insert(id) {
            continue;
        }
        if names.contains(&base.qualified_name.as_str()) {
            return true;
        }
        if let SymbolDetail::Class(detail) = &base.detail {
            if search_ancestors(catalogue, detail, names, visited) {
                return true;
            }
        }
    }
    false
}

fn resolved_bases<'a>(
    catalogue: &'a Catalogue,
    class: &'a ClassDetail,
) -> impl Iterator<Item = (SymbolId, &'a Symbol)> + 'a {
    class
        .bases
        .iter()
        .filter_map(move |&id| catalogue.get(id).map(|symbol| (id, symbol)))
}
