//! Static option schema
//!
//! The schema lists every recognised filter option in rendering order.
//! Defaults are derived from the option type: sets select everything,
//! strings and lists are empty, the flag is unset and results are unsorted.

use super::set::EnumSet;
use super::value::{Flag, OptionValue, SortOrder};
use crate::enumerant::Enumerant;

pub const OPTION_COUNT: usize = 11;

/// Position of an option in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionId {
    Entity,
    MType,
    VType,
    CType,
    Linkage,
    Quals,
    Virtual,
    Bases,
    CPath,
    Constexpr,
    Sort,
}

impl OptionId {
    pub const ALL: [OptionId; OPTION_COUNT] = [
        OptionId::Entity,
        OptionId::MType,
        OptionId::VType,
        OptionId::CType,
        OptionId::Linkage,
        OptionId::Quals,
        OptionId::Virtual,
        OptionId::Bases,
        OptionId::CPath,
        OptionId::Constexpr,
        OptionId::Sort,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static OptionSpec {
        &SCHEMA[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Case-insensitive lookup by option name
    pub fn from_name(name: &str) -> Option<Self> {
        SCHEMA
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
            .map(|spec| spec.id)
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Value type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    KindSet,
    OwnershipSet,
    ValueCategorySet,
    CompoundSet,
    LinkageSet,
    QualifierSet,
    VirtualitySet,
    List,
    Text,
    Flag,
    Sort,
}

impl OptionType {
    pub fn default_value(self) -> OptionValue {
        match self {
            OptionType::KindSet => OptionValue::Kinds(EnumSet::all()),
            OptionType::OwnershipSet => OptionValue::Ownership(EnumSet::all()),
            OptionType::ValueCategorySet => OptionValue::ValueCategories(EnumSet::all()),
            OptionType::CompoundSet => OptionValue::Compounds(EnumSet::all()),
            OptionType::LinkageSet => OptionValue::Linkages(EnumSet::all()),
            OptionType::QualifierSet => OptionValue::Qualifiers(EnumSet::all()),
            OptionType::VirtualitySet => OptionValue::Virtuality(EnumSet::all()),
            OptionType::List => OptionValue::List(Vec::new()),
            OptionType::Text => OptionValue::Text(String::new()),
            OptionType::Flag => OptionValue::Flag(Flag::Unset),
            OptionType::Sort => OptionValue::Sort(SortOrder::default()),
        }
    }

    /// Parse a raw token value. On failure returns the piece that did not resolve.
    pub fn parse(self, raw: &str) -> Result<OptionValue, String> {
        Ok(match self {
            OptionType::KindSet => OptionValue::Kinds(parse_set(raw)?),
            OptionType::OwnershipSet => OptionValue::Ownership(parse_set(raw)?),
            OptionType::ValueCategorySet => OptionValue::ValueCategories(parse_set(raw)?),
            OptionType::CompoundSet => OptionValue::Compounds(parse_set(raw)?),
            OptionType::LinkageSet => OptionValue::Linkages(parse_set(raw)?),
            OptionType::QualifierSet => OptionValue::Qualifiers(parse_set(raw)?),
            OptionType::VirtualitySet => OptionValue::Virtuality(parse_set(raw)?),
            OptionType::List => OptionValue::List(
                pieces(raw).map(str::to_string).collect(),
            ),
            OptionType::Text => OptionValue::Text(raw.to_string()),
            OptionType::Flag => OptionValue::Flag(raw.parse().map_err(|_| raw.to_string())?),
            OptionType::Sort => OptionValue::Sort(raw.parse().map_err(|_| raw.to_string())?),
        })
    }
}

fn pieces(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(|piece| !piece.is_empty())
}

fn parse_set<T>(raw: &str) -> Result<EnumSet<T>, String>
where
    T: Enumerant + std::str::FromStr,
{
    pieces(raw)
        .map(|piece| piece.parse::<T>().map_err(|_| piece.to_string()))
        .collect()
}

/// Schema entry
#[derive(Debug)]
pub struct OptionSpec {
    pub id: OptionId,
    pub name: &'static str,
    pub kind: OptionType,
    pub description: &'static str,
}

impl OptionSpec {
    pub fn default_value(&self) -> OptionValue {
        self.kind.default_value()
    }
}

pub static SCHEMA: [OptionSpec; OPTION_COUNT] = [
    OptionSpec {
        id: OptionId::Entity,
        name: "entity",
        kind: OptionType::KindSet,
        description: "Kinds of symbol to list: Namespace, Class, Enum, Function, Field, TypeAlias",
    },
    OptionSpec {
        id: OptionId::MType,
        name: "mtype",
        kind: OptionType::OwnershipSet,
        description: "Ownership of functions and fields: Free, Member, Static, Friend",
    },
    OptionSpec {
        id: OptionId::VType,
        name: "vtype",
        kind: OptionType::ValueCategorySet,
        description: "Reference qualifier: Value, LValueRef (&), RValueRef (&&)",
    },
    OptionSpec {
        id: OptionId::CType,
        name: "ctype",
        kind: OptionType::CompoundSet,
        description: "Compound type of classes and enums: Class, Struct, Union, Enum, EnumClass",
    },
    OptionSpec {
        id: OptionId::Linkage,
        name: "linkage",
        kind: OptionType::LinkageSet,
        description: "Linkage of functions and fields: Internal, External",
    },
    OptionSpec {
        id: OptionId::Quals,
        name: "quals",
        kind: OptionType::QualifierSet,
        description: "cv-qualifiers: Normal, Const, Volatile, ConstVolatile",
    },
    OptionSpec {
        id: OptionId::Virtual,
        name: "virtual",
        kind: OptionType::VirtualitySet,
        description: "Virtuality of functions: False, True, Pure",
    },
    OptionSpec {
        id: OptionId::Bases,
        name: "bases",
        kind: OptionType::List,
        description: "Base classes, comma separated; prefix with @ to match direct bases only",
    },
    OptionSpec {
        id: OptionId::CPath,
        name: "cpath",
        kind: OptionType::Text,
        description: "Qualified name prefix",
    },
    OptionSpec {
        id: OptionId::Constexpr,
        name: "constexpr",
        kind: OptionType::Flag,
        description: "Only constexpr (true) or non-constexpr (false) functions and fields",
    },
    OptionSpec {
        id: OptionId::Sort,
        name: "sort",
        kind: OptionType::Sort,
        description: "Order by qualified name: None, Asc, Desc",
    },
];
