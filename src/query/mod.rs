//! Query evaluation
//!
//! Walks the catalogue collections selected by a [`Filter`], applies the
//! generic and kind-specific predicates and returns the ordered matches.
//! Evaluation is pure and never fails: symbols that cannot be resolved, or
//! whose detail block does not fit their kind, are skipped.

mod predicates;
mod term;

pub use predicates::ownership_of;
pub use term::TermMatcher;

use serde::{Deserialize, Serialize};

use crate::catalogue::{Catalogue, Symbol, SymbolDetail, SymbolId, SymbolKind};
use crate::enumerant::Enumerant;
use crate::filter::{Filter, SortOrder};

/// One result row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub kind: SymbolKind,
    pub id: SymbolId,
}

impl Match {
    pub fn new(kind: SymbolKind, id: SymbolId) -> Self {
        Self { kind, id }
    }
}

/// Evaluate `filter` against `catalogue`.
///
/// Kinds are scanned in declaration order and catalogue order is kept
/// within a kind, unless the filter asks for a sort by qualified name.
pub fn evaluate(catalogue: &Catalogue, filter: &Filter, term: Option<&str>) -> Vec<Match> {
    let kinds = filter.kinds();
    let class_path = filter.class_path();
    let matcher = TermMatcher::new(term);

    let mut matches = Vec::new();
    for &kind in SymbolKind::ALL {
        if !kinds.contains(kind) {
            continue;
        }

        for &id in catalogue.symbols(kind) {
            let Some(symbol) = catalogue.get(id) else {
                tracing::trace!(%id, %kind, "skipping unresolved symbol");
                continue;
            };
            if !symbol.qualified_name.starts_with(class_path)
                || !matcher.matches(&symbol.local_name)
            {
                continue;
            }
            if kind_matches(catalogue, filter, kind, symbol) {
                matches.push(Match::new(kind, id));
            }
        }
    }

    sort_matches(catalogue, &mut matches, filter.sort());

    tracing::debug!(
        filter = %filter,
        term = term.unwrap_or(""),
        matches = matches.len(),
        "evaluated query"
    );
    matches
}

fn kind_matches(
    catalogue: &Catalogue,
    filter: &Filter,
    kind: SymbolKind,
    symbol: &Symbol,
) -> bool {
    if !symbol.detail.fits(kind) {
        tracing::trace!(
            name = %symbol.qualified_name,
            %kind,
            "skipping symbol with mismatched detail"
        );
        return false;
    }

    match &symbol.detail {
        SymbolDetail::Plain => true,
        SymbolDetail::Class(class) => predicates::class_matches(catalogue, filter, class),
        SymbolDetail::Enum(detail) => predicates::enum_matches(filter, detail),
        SymbolDetail::Member(member) => {
            predicates::member_matches(catalogue, filter, symbol, member)
        }
    }
}

fn qualified_name<'a>(catalogue: &'a Catalogue, m: &Match) -> &'a str {
    catalogue
        .get(m.id)
        .map(|symbol| symbol.qualified_name.as_str())
        .unwrap_or("")
}

/// Stable, so equal names keep scan order.
fn sort_matches(catalogue: &Catalogue, matches: &mut [Match], order: SortOrder) {
    match order {
        SortOrder::Unsorted => {}
        SortOrder::Asc => matches
            .sort_by(|a, b| qualified_name(catalogue, a).cmp(qualified_name(catalogue, b))),
        SortOrder::Desc => matches
            .sort_by(|a, b| qualified_name(catalogue, b).cmp(qualified_name(catalogue, a))),
    }
}
