//! Exact symbol path lookup for the "show" command.

use super::store::Catalogue;
use super::symbol::{Symbol, SymbolKind};

/// Search order when the last path segment starts lowercase (functions, fields)
const LOWERCASE_ORDER: [SymbolKind; 6] = [
    SymbolKind::Function,
    SymbolKind::Namespace,
    SymbolKind::Field,
    SymbolKind::Class,
    SymbolKind::Enum,
    SymbolKind::TypeAlias,
];

/// Search order when the last path segment starts uppercase (types)
const UPPERCASE_ORDER: [SymbolKind; 6] = [
    SymbolKind::Class,
    SymbolKind::Enum,
    SymbolKind::TypeAlias,
    SymbolKind::Function,
    SymbolKind::Namespace,
    SymbolKind::Field,
];

/// Search order for top-level names
const TOP_LEVEL_ORDER: [SymbolKind; 6] = [
    SymbolKind::Namespace,
    SymbolKind::Class,
    SymbolKind::Enum,
    SymbolKind::Function,
    SymbolKind::Field,
    SymbolKind::TypeAlias,
];

fn search_order(path: &str) -> &'static [SymbolKind; 6] {
    let Some((_, last)) = path.rsplit_once("::") else {
        return &TOP_LEVEL_ORDER;
    };
    match last.chars().next() {
        Some(c) if c.is_lowercase() => &LOWERCASE_ORDER,
        Some(c) if c.is_uppercase() => &UPPERCASE_ORDER,
        _ => &TOP_LEVEL_ORDER,
    }
}

impl Catalogue {
    /// Find a symbol by its exact qualified name.
    ///
    /// A class and its constructor share a path, so when several symbols
    /// have the same name the kind is chosen by the casing of the last
    /// segment: `juce::Button` prefers the class, `juce::jmax` the function.
    pub fn resolve_path(&self, path: &str) -> Option<(SymbolKind, &Symbol)> {
        let path = path.trim().trim_start_matches("::");
        let candidates = self.named(path);
        if candidates.is_empty() {
            return None;
        }

        search_order(path).iter().find_map(|&kind| {
            candidates
                .iter()
                .filter_map(|&id| self.get(id))
                .find(|symbol| symbol.kind == kind)
                .map(|symbol| (kind, symbol))
        })
    }
}
