//! Typed filter and paginated query engine over a C++ API symbol catalogue.

mod enumerant;

pub mod catalogue;
pub mod config;
pub mod filter;
pub mod paging;
pub mod query;
pub mod service;
pub mod tenant;

pub use catalogue::{Catalogue, CatalogueBuilder, Symbol, SymbolId, SymbolKind, SymbolSpec};
pub use config::QueryConfig;
pub use enumerant::Enumerant;
pub use filter::{Filter, FilterError};
pub use paging::{ChannelId, MessageId, PageAction, PageSummary, PagedResult, TenantId};
pub use query::{evaluate, Match};
pub use service::{PageView, QueryError, QueryService};
pub use tenant::{GuildRegistry, PageCache, RegistryError, TenantState};
