//! Immutable symbol arena
//!
//! A [`Catalogue`] is built once, either in-process through
//! [`CatalogueBuilder`] or from a JSON snapshot written by the documentation
//! extractor, and is read-only afterwards. Callers share it behind an `Arc`.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::symbol::{
    local_name_of, ClassDetail, EnumDetail, MemberDetail, Symbol, SymbolDetail, SymbolId,
    SymbolKind, ValueCategory, Virtuality,
};
use crate::enumerant::Enumerant;

const KIND_COUNT: usize = 6;

/// Read-only catalogue of documented symbols
#[derive(Debug, Clone)]
pub struct Catalogue {
    symbols: Vec<Symbol>,
    by_kind: [Vec<SymbolId>; KIND_COUNT],
    by_name: HashMap<String, Vec<SymbolId>>,
    generated_at: DateTime<Utc>,
    revision: Option<String>,
}

/// On-disk snapshot format
#[derive(Debug, Serialize, Deserialize)]
struct CatalogueSnapshot {
    #[serde(default = "Utc::now")]
    generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    revision: Option<String>,
    symbols: Vec<Symbol>,
}

/// Per-kind symbol counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogueCounts {
    pub namespaces: usize,
    pub classes: usize,
    pub enums: usize,
    pub functions: usize,
    pub fields: usize,
    pub type_aliases: usize,
}

impl std::fmt::Display for CatalogueCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} namespaces, {} classes, {} enums, {} functions, {} fields, {} type aliases",
            self.namespaces,
            self.classes,
            self.enums,
            self.functions,
            self.fields,
            self.type_aliases
        )
    }
}

impl Catalogue {
    fn from_parts(
        mut symbols: Vec<Symbol>,
        generated_at: DateTime<Utc>,
        revision: Option<String>,
    ) -> Self {
        let mut by_kind: [Vec<SymbolId>; KIND_COUNT] = Default::default();
        let mut by_name: HashMap<String, Vec<SymbolId>> = HashMap::new();

        for (index, symbol) in symbols.iter_mut().enumerate() {
            if symbol.local_name.is_empty() {
                symbol.local_name = local_name_of(&symbol.qualified_name).to_string();
            }
            let id = SymbolId(index as u32);
            by_kind[symbol.kind.ordinal()].push(id);
            by_name
                .entry(symbol.qualified_name.clone())
                .or_default()
                .push(id);
        }

        let catalogue = Self {
            symbols,
            by_kind,
            by_name,
            generated_at,
            revision,
        };
        tracing::info!("Cached {}", catalogue.counts());
        catalogue
    }

    /// Parse a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogueError> {
        let snapshot: CatalogueSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_parts(
            snapshot.symbols,
            snapshot.generated_at,
            snapshot.revision,
        ))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogueError> {
        let snapshot: CatalogueSnapshot = serde_json::from_reader(reader)?;
        Ok(Self::from_parts(
            snapshot.symbols,
            snapshot.generated_at,
            snapshot.revision,
        ))
    }

    /// Load a JSON snapshot from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        let file = fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Render the catalogue back into the snapshot format.
    pub fn to_json_string(&self) -> Result<String, CatalogueError> {
        let snapshot = CatalogueSnapshot {
            generated_at: self.generated_at,
            revision: self.revision.clone(),
            symbols: self.symbols.clone(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Resolve an id. Ids from another catalogue or a corrupt snapshot yield `None`.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// Ids of one kind, in catalogue order.
    pub fn symbols(&self, kind: SymbolKind) -> &[SymbolId] {
        &self.by_kind[kind.ordinal()]
    }

    /// Resolved symbols of one kind, in catalogue order.
    pub fn iter(&self, kind: SymbolKind) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
        self.symbols(kind)
            .iter()
            .filter_map(move |&id| self.get(id).map(|symbol| (id, symbol)))
    }

    /// All ids sharing a qualified name.
    pub fn named(&self, qualified_name: &str) -> &[SymbolId] {
        self.by_name
            .get(qualified_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn counts(&self) -> CatalogueCounts {
        let count = |kind: SymbolKind| self.symbols(kind).len();
        CatalogueCounts {
            namespaces: count(SymbolKind::Namespace),
            classes: count(SymbolKind::Class),
            enums: count(SymbolKind::Enum),
            functions: count(SymbolKind::Function),
            fields: count(SymbolKind::Field),
            type_aliases: count(SymbolKind::TypeAlias),
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Source revision the snapshot was extracted from, if recorded
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        CatalogueBuilder::new().build()
    }
}

/// Builder for a single symbol added through [`CatalogueBuilder::add`]
#[derive(Debug, Clone)]
pub struct SymbolSpec {
    symbol: Symbol,
}

impl SymbolSpec {
    pub fn namespace(qualified_name: &str) -> Self {
        Self::of(SymbolKind::Namespace, qualified_name, SymbolDetail::Plain)
    }

    /// `compound_type` is the extractor's spelling: "class", "struct", "union"...
    pub fn class(qualified_name: &str, compound_type: &str) -> Self {
        Self::of(
            SymbolKind::Class,
            qualified_name,
            SymbolDetail::Class(ClassDetail {
                compound_type: compound_type.to_string(),
                bases: Vec::new(),
            }),
        )
    }

    pub fn enumeration(qualified_name: &str, scoped: bool) -> Self {
        Self::of(
            SymbolKind::Enum,
            qualified_name,
            SymbolDetail::Enum(EnumDetail { scoped }),
        )
    }

    pub fn function(qualified_name: &str) -> Self {
        Self::of(
            SymbolKind::Function,
            qualified_name,
            SymbolDetail::Member(MemberDetail::default()),
        )
    }

    pub fn field(qualified_name: &str) -> Self {
        Self::of(
            SymbolKind::Field,
            qualified_name,
            SymbolDetail::Member(MemberDetail::default()),
        )
    }

    pub fn type_alias(qualified_name: &str) -> Self {
        Self::of(SymbolKind::TypeAlias, qualified_name, SymbolDetail::Plain)
    }

    fn of(kind: SymbolKind, qualified_name: &str, detail: SymbolDetail) -> Self {
        Self {
            symbol: Symbol::new(kind, qualified_name, detail),
        }
    }

    /// Set the enclosing scope
    pub fn within(mut self, scope: SymbolId) -> Self {
        self.symbol.outer_scope = Some(scope);
        self
    }

    /// Append an immediate base class. Ignored for non-classes.
    pub fn base(mut self, base: SymbolId) -> Self {
        if let SymbolDetail::Class(detail) = &mut self.symbol.detail {
            detail.bases.push(base);
        }
        self
    }

    pub fn brief(mut self, text: &str) -> Self {
        self.symbol.brief = Some(text.to_string());
        self
    }

    pub fn docs(mut self, text: &str) -> Self {
        self.symbol.docs = Some(text.to_string());
        self
    }

    pub fn external(self) -> Self {
        self.member(|m| m.is_external = true)
    }

    pub fn ref_qualifier(self, category: ValueCategory) -> Self {
        self.member(|m| m.ref_qualifier = category)
    }

    pub fn constant(self) -> Self {
        self.member(|m| m.is_const = true)
    }

    pub fn volatile(self) -> Self {
        self.member(|m| m.is_volatile = true)
    }

    pub fn constexpr(self) -> Self {
        self.member(|m| m.is_constexpr = true)
    }

    pub fn friend(self) -> Self {
        self.member(|m| m.is_friend = true)
    }

    pub fn static_member(self) -> Self {
        self.member(|m| m.is_static = true)
    }

    pub fn virtuality(self, virtuality: Virtuality) -> Self {
        self.member(|m| m.virtuality = virtuality)
    }

    fn member(mut self, apply: impl FnOnce(&mut MemberDetail)) -> Self {
        if let SymbolDetail::Member(detail) = &mut self.symbol.detail {
            apply(detail);
        }
        self
    }
}

/// Accumulates symbols before freezing them into a [`Catalogue`]
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    symbols: Vec<Symbol>,
    revision: Option<String>,
}

impl CatalogueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_revision(mut self, revision: &str) -> Self {
        self.revision = Some(revision.to_string());
        self
    }

    /// Append a symbol and return its id.
    pub fn add(&mut self, spec: SymbolSpec) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(spec.symbol);
        id
    }

    pub fn build(self) -> Catalogue {
        Catalogue::from_parts(self.symbols, Utc::now(), self.revision)
    }
}

/// Error type for catalogue loading
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalogue snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
