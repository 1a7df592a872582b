//! Query filter
//!
//! A [`Filter`] holds one typed [`OptionValue`] per schema entry and is
//! built from free-form `name:value` tokens. Options not mentioned keep
//! their schema default. Parsing is all-or-nothing.

mod error;
mod schema;
mod set;
mod value;

pub use error::FilterError;
pub use schema::{OptionId, OptionSpec, OptionType, OPTION_COUNT, SCHEMA};
pub use set::EnumSet;
pub use value::{Flag, OptionValue, SortOrder};

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalogue::{
    CompoundKind, Linkage, Ownership, Qualifiers, SymbolKind, ValueCategory, Virtuality,
};

lazy_static::lazy_static! {
    /// `name:value` with no whitespace anywhere. The name ends at the first colon.
    static ref TOKEN_RE: Regex =
        Regex::new(r"^([^\s:]+):(\S*)$").expect("token pattern is a valid regex");
}

fn split_token(token: &str) -> Option<(&str, &str)> {
    let captures = TOKEN_RE.captures(token)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Typed query options, one per schema entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    values: [OptionValue; OPTION_COUNT],
}

/// One row of the filter help listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionHelp {
    pub name: &'static str,
    pub default: String,
    pub description: &'static str,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|index| SCHEMA[index].default_value()),
        }
    }
}

impl Filter {
    /// Parse `name:value` tokens on top of the defaults.
    ///
    /// A later token for the same option replaces an earlier one.
    pub fn parse<I, S>(tokens: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for token in tokens {
            filter.apply_token(token.as_ref())?;
        }
        Ok(filter)
    }

    /// Parse a whitespace-separated token string, e.g. a rendered filter.
    pub fn parse_str(tokens: &str) -> Result<Self, FilterError> {
        Self::parse(tokens.split_whitespace())
    }

    fn apply_token(&mut self, token: &str) -> Result<(), FilterError> {
        let (name, raw) =
            split_token(token).ok_or_else(|| FilterError::MalformedToken(token.to_string()))?;

        let id =
            OptionId::from_name(name).ok_or_else(|| FilterError::UnknownOption(name.to_string()))?;
        let value = id
            .spec()
            .kind
            .parse(raw)
            .map_err(|piece| FilterError::UnknownEnumerant {
                option: id.name().to_string(),
                value: piece,
            })?;
        self.values[id.index()] = value;
        Ok(())
    }

    pub fn get(&self, id: OptionId) -> &OptionValue {
        &self.values[id.index()]
    }

    /// Replace one option. The value must have the option's declared type.
    pub fn set(&mut self, id: OptionId, value: OptionValue) -> Result<(), FilterError> {
        let expected = id.spec().kind;
        if value.option_type() != expected {
            return Err(FilterError::TypeMismatch {
                option: id.name().to_string(),
                found: format!("{:?}", value.option_type()),
            });
        }
        // must survive a render and re-parse
        let rendered = value.to_string();
        if rendered.chars().any(char::is_whitespace) {
            return Err(FilterError::MalformedToken(format!("{}:{}", id.name(), rendered)));
        }
        self.values[id.index()] = value;
        Ok(())
    }

    /// `(option, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionValue)> + '_ {
        OptionId::ALL.iter().map(move |&id| (id, self.get(id)))
    }

    pub fn kinds(&self) -> EnumSet<SymbolKind> {
        match self.get(OptionId::Entity) {
            OptionValue::Kinds(set) => *set,
            other => unreachable!("entity holds {:?}", other),
        }
    }

    pub fn ownership(&self) -> EnumSet<Ownership> {
        match self.get(OptionId::MType) {
            OptionValue::Ownership(set) => *set,
            other => unreachable!("mtype holds {:?}", other),
        }
    }

    pub fn value_categories(&self) -> EnumSet<ValueCategory> {
        match self.get(OptionId::VType) {
            OptionValue::ValueCategories(set) => *set,
            other => unreachable!("vtype holds {:?}", other),
        }
    }

    pub fn compound_kinds(&self) -> EnumSet<CompoundKind> {
        match self.get(OptionId::CType) {
            OptionValue::Compounds(set) => *set,
            other => unreachable!("ctype holds {:?}", other),
        }
    }

    pub fn linkages(&self) -> EnumSet<Linkage> {
        match self.get(OptionId::Linkage) {
            OptionValue::Linkages(set) => *set,
            other => unreachable!("linkage holds {:?}", other),
        }
    }

    pub fn qualifiers(&self) -> EnumSet<Qualifiers> {
        match self.get(OptionId::Quals) {
            OptionValue::Qualifiers(set) => *set,
            other => unreachable!("quals holds {:?}", other),
        }
    }

    pub fn virtuality(&self) -> EnumSet<Virtuality> {
        match self.get(OptionId::Virtual) {
            OptionValue::Virtuality(set) => *set,
            other => unreachable!("virtual holds {:?}", other),
        }
    }

    pub fn bases(&self) -> &[String] {
        match self.get(OptionId::Bases) {
            OptionValue::List(items) => items,
            other => unreachable!("bases holds {:?}", other),
        }
    }

    pub fn class_path(&self) -> &str {
        match self.get(OptionId::CPath) {
            OptionValue::Text(text) => text,
            other => unreachable!("cpath holds {:?}", other),
        }
    }

    pub fn constexpr(&self) -> Flag {
        match self.get(OptionId::Constexpr) {
            OptionValue::Flag(flag) => *flag,
            other => unreachable!("constexpr holds {:?}", other),
        }
    }

    pub fn sort(&self) -> SortOrder {
        match self.get(OptionId::Sort) {
            OptionValue::Sort(order) => *order,
            other => unreachable!("sort holds {:?}", other),
        }
    }

    /// One `name: value` line per option
    pub fn to_pretty_string(&self) -> String {
        self.iter()
            .map(|(id, value)| format!("{}: {}", id.name(), value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `{ name: value }` object for machine consumption
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(id, value)| (id.name().to_string(), value.to_json()))
            .collect();
        Value::Object(map)
    }

    /// Help listing with each option's default and description.
    pub fn describe() -> Vec<OptionHelp> {
        SCHEMA
            .iter()
            .map(|spec| OptionHelp {
                name: spec.name,
                default: spec.default_value().to_string(),
                description: spec.description,
            })
            .collect()
    }
}

impl std::fmt::Display for Filter {
    /// Space-separated `name:value` tokens that parse back to the same filter.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (id, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", id.name(), value)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
