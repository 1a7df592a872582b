//! Symbol model for the documented C++ API
//!
//! Symbols live in a [`super::Catalogue`] arena and refer to each other by
//! [`SymbolId`]. Each symbol carries a kind-specific detail block with the
//! facts the query evaluator filters on.

use serde::{Deserialize, Serialize};

use crate::enumerant::enumerant;

enumerant! {
    /// Kinds of documented entities, in the fixed scan order
    pub enum SymbolKind {
        Namespace => "Namespace",
        Class => "Class",
        Enum => "Enum",
        Function => "Function",
        Field => "Field",
        TypeAlias => "TypeAlias",
    }
}

enumerant! {
    /// How a function or field relates to its enclosing scope
    pub enum Ownership {
        Free => "Free",
        Member => "Member",
        Static => "Static",
        Friend => "Friend",
    }
}

enumerant! {
    /// Reference qualifier of a field type or member function
    #[derive(Default)]
    pub enum ValueCategory {
        #[default]
        Value => "Value",
        LValueRef => "LValueRef" | "&",
        RValueRef => "RValueRef" | "&&",
    }
}

enumerant! {
    /// Flavour of a user-defined type
    pub enum CompoundKind {
        Class => "Class",
        Struct => "Struct",
        Union => "Union",
        Enum => "Enum",
        EnumClass => "EnumClass" | "enum class" | "enum struct",
    }
}

enumerant! {
    pub enum Linkage {
        Internal => "Internal",
        External => "External",
    }
}

enumerant! {
    /// cv-qualification, ordered so that `const + 2 * volatile` is the ordinal
    pub enum Qualifiers {
        Normal => "Normal",
        Const => "Const",
        Volatile => "Volatile",
        ConstVolatile => "ConstVolatile",
    }
}

enumerant! {
    #[derive(Default)]
    pub enum Virtuality {
        #[default]
        Plain => "False",
        Virtual => "True",
        Pure => "Pure",
    }
}

impl Qualifiers {
    pub fn from_flags(is_const: bool, is_volatile: bool) -> Self {
        match (is_const, is_volatile) {
            (false, false) => Qualifiers::Normal,
            (true, false) => Qualifiers::Const,
            (false, true) => Qualifiers::Volatile,
            (true, true) => Qualifiers::ConstVolatile,
        }
    }
}

/// Index of a symbol inside its catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Class facts: compound-type string as extracted, immediate bases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDetail {
    pub compound_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<SymbolId>,
}

impl ClassDetail {
    /// Compound kind parsed from the extracted string, if it names one.
    pub fn compound_kind(&self) -> Option<CompoundKind> {
        self.compound_type.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDetail {
    /// `enum class` / `enum struct`
    #[serde(default)]
    pub scoped: bool,
}

impl EnumDetail {
    pub fn compound_kind(&self) -> CompoundKind {
        if self.scoped {
            CompoundKind::EnumClass
        } else {
            CompoundKind::Enum
        }
    }
}

/// Facts shared by functions and fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberDetail {
    pub is_external: bool,
    pub ref_qualifier: ValueCategory,
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_constexpr: bool,
    pub is_friend: bool,
    pub is_static: bool,
    /// Only meaningful for functions
    pub virtuality: Virtuality,
}

impl MemberDetail {
    pub fn linkage(&self) -> Linkage {
        if self.is_external {
            Linkage::External
        } else {
            Linkage::Internal
        }
    }

    pub fn qualifiers(&self) -> Qualifiers {
        Qualifiers::from_flags(self.is_const, self.is_volatile)
    }
}

/// Kind-specific part of a symbol
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SymbolDetail {
    /// Namespaces and type aliases carry nothing extra
    #[default]
    Plain,
    Class(ClassDetail),
    Enum(EnumDetail),
    Member(MemberDetail),
}

impl SymbolDetail {
    /// Whether this detail block is the right shape for `kind`.
    pub fn fits(&self, kind: SymbolKind) -> bool {
        matches!(
            (kind, self),
            (SymbolKind::Namespace, SymbolDetail::Plain)
                | (SymbolKind::TypeAlias, SymbolDetail::Plain)
                | (SymbolKind::Class, SymbolDetail::Class(_))
                | (SymbolKind::Enum, SymbolDetail::Enum(_))
                | (SymbolKind::Function, SymbolDetail::Member(_))
                | (SymbolKind::Field, SymbolDetail::Member(_))
        )
    }
}

/// A documented entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub qualified_name: String,
    /// Last `::` segment of the qualified name; filled in on load when absent
    #[serde(default)]
    pub local_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_scope: Option<SymbolId>,
    #[serde(default)]
    pub detail: SymbolDetail,
}

impl Symbol {
    pub fn new(kind: SymbolKind, qualified_name: &str, detail: SymbolDetail) -> Self {
        Self {
            kind,
            qualified_name: qualified_name.to_string(),
            local_name: local_name_of(qualified_name).to_string(),
            brief: None,
            docs: None,
            outer_scope: None,
            detail,
        }
    }

    pub fn class_detail(&self) -> Option<&ClassDetail> {
        match &self.detail {
            SymbolDetail::Class(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn member_detail(&self) -> Option<&MemberDetail> {
        match &self.detail {
            SymbolDetail::Member(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Last segment of a `::`-separated path.
pub fn local_name_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once("::")
        .map_or(qualified_name, |(_, local)| local)
}
