//! Typed option values stored in a [`super::Filter`].

use serde_json::{json, Value};

use super::schema::OptionType;
use super::set::EnumSet;
use crate::catalogue::{
    CompoundKind, Linkage, Ownership, Qualifiers, SymbolKind, ValueCategory, Virtuality,
};
use crate::enumerant::{enumerant, Enumerant};

enumerant! {
    /// Result ordering. `Unsorted` keeps the per-kind scan order.
    #[derive(Default)]
    pub enum SortOrder {
        #[default]
        Unsorted => "None" | "entity",
        Asc => "Asc" | "ascending",
        Desc => "Desc" | "descending",
    }
}

/// Tri-state flag option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Flag {
    #[default]
    Unset,
    Set(bool),
}

impl Flag {
    /// The boolean, if the flag was given
    pub fn get(self) -> Option<bool> {
        match self {
            Flag::Unset => None,
            Flag::Set(value) => Some(value),
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Flag::Set(_))
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flag::Unset => f.write_str("unset"),
            Flag::Set(true) => f.write_str("true"),
            Flag::Set(false) => f.write_str("false"),
        }
    }
}

impl std::str::FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Flag::Set(true)),
            "false" | "no" | "off" | "0" => Ok(Flag::Set(false)),
            "unset" => Ok(Flag::Unset),
            _ => Err(format!("Unknown Flag: {}", s)),
        }
    }
}

/// One slot of a filter. The variant at a schema position never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Kinds(EnumSet<SymbolKind>),
    Ownership(EnumSet<Ownership>),
    ValueCategories(EnumSet<ValueCategory>),
    Compounds(EnumSet<CompoundKind>),
    Linkages(EnumSet<Linkage>),
    Qualifiers(EnumSet<Qualifiers>),
    Virtuality(EnumSet<Virtuality>),
    /// Ordered strings, e.g. base class paths
    List(Vec<String>),
    Text(String),
    Flag(Flag),
    Sort(SortOrder),
}

impl OptionValue {
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionValue::Kinds(_) => OptionType::KindSet,
            OptionValue::Ownership(_) => OptionType::OwnershipSet,
            OptionValue::ValueCategories(_) => OptionType::ValueCategorySet,
            OptionValue::Compounds(_) => OptionType::CompoundSet,
            OptionValue::Linkages(_) => OptionType::LinkageSet,
            OptionValue::Qualifiers(_) => OptionType::QualifierSet,
            OptionValue::Virtuality(_) => OptionType::VirtualitySet,
            OptionValue::List(_) => OptionType::List,
            OptionValue::Text(_) => OptionType::Text,
            OptionValue::Flag(_) => OptionType::Flag,
            OptionValue::Sort(_) => OptionType::Sort,
        }
    }

    /// Machine-readable form for the filter description.
    pub fn to_json(&self) -> Value {
        fn names<T: Enumerant>(set: &EnumSet<T>) -> Value {
            Value::from(set.iter().map(T::name).collect::<Vec<_>>())
        }

        match self {
            OptionValue::Kinds(set) => names(set),
            OptionValue::Ownership(set) => names(set),
            OptionValue::ValueCategories(set) => names(set),
            OptionValue::Compounds(set) => names(set),
            OptionValue::Linkages(set) => names(set),
            OptionValue::Qualifiers(set) => names(set),
            OptionValue::Virtuality(set) => names(set),
            OptionValue::List(items) => json!(items),
            OptionValue::Text(text) => json!(text),
            OptionValue::Flag(flag) => json!(flag.get()),
            OptionValue::Sort(order) => json!(order.name()),
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Kinds(set) => write!(f, "{}", set),
            OptionValue::Ownership(set) => write!(f, "{}", set),
            OptionValue::ValueCategories(set) => write!(f, "{}", set),
            OptionValue::Compounds(set) => write!(f, "{}", set),
            OptionValue::Linkages(set) => write!(f, "{}", set),
            OptionValue::Qualifiers(set) => write!(f, "{}", set),
            OptionValue::Virtuality(set) => write!(f, "{}", set),
            OptionValue::List(items) => f.write_str(&items.join(",")),
            OptionValue::Text(text) => f.write_str(text),
            OptionValue::Flag(flag) => write!(f, "{}", flag),
            OptionValue::Sort(order) => write!(f, "{}", order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_parse() {
        assert_eq!("yes".parse::<Flag>().unwrap(), Flag::Set(true));
        assert_eq!("OFF".parse::<Flag>().unwrap(), Flag::Set(false));
        assert_eq!("unset".parse::<Flag>().unwrap(), Flag::Unset);
        assert!("maybe".parse::<Flag>().is_err());
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(Flag::Unset.to_string(), "unset");
        assert_eq!(Flag::Set(false).to_string(), "false");
        assert_eq!(Flag::Set(true).get(), Some(true));
    }

    #[test]
    fn test_sort_order_aliases() {
        assert_eq!("descending".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("entity".parse::<SortOrder>().unwrap(), SortOrder::Unsorted);
        assert_eq!(SortOrder::Asc.to_string(), "Asc");
    }

    #[test]
    fn test_value_to_json() {
        let kinds: EnumSet<SymbolKind> = [SymbolKind::Class].into_iter().collect();
        assert_eq!(OptionValue::Kinds(kinds).to_json(), json!(["Class"]));
        assert_eq!(OptionValue::Flag(Flag::Unset).to_json(), Value::Null);
        assert_eq!(
            OptionValue::List(vec!["@juce::Component".to_string()]).to_json(),
            json!(["@juce::Component"])
        );
    }
}
