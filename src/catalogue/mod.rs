//! Symbol catalogue for the documented C++ API
//!
//! Holds every extracted namespace, class, enum, function, field and type
//! alias in one arena, partitioned by kind in extraction order.

mod lookup;
mod store;
mod symbol;

pub use store::{Catalogue, CatalogueBuilder, CatalogueCounts, CatalogueError, SymbolSpec};
pub use symbol::{
    local_name_of, ClassDetail, CompoundKind, EnumDetail, Linkage, MemberDetail, Ownership,
    Qualifiers, Symbol, SymbolDetail, SymbolId, SymbolKind, ValueCategory, Virtuality,
};
