//! Query service
//!
//! Wires the pieces into the request flow used by the bot commands:
//! parse the filter, evaluate, hand back the first page, remember the
//! result under the message that shows it and turn pages later.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::catalogue::{Catalogue, Symbol, SymbolKind};
use crate::config::QueryConfig;
use crate::filter::{Filter, FilterError};
use crate::paging::{ChannelId, MessageId, PageAction, PageSummary, PagedResult, TenantId};
use crate::query::Match;
use crate::tenant::{GuildRegistry, RegistryError, TenantState};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("A search term is required")]
    EmptyTerm,
}

/// Snapshot of a cached result after a page turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub summary: PageSummary,
    pub items: Vec<Match>,
}

pub struct QueryService {
    catalogue: Arc<Catalogue>,
    config: QueryConfig,
    tenants: GuildRegistry<TenantState>,
}

impl QueryService {
    pub fn new(catalogue: Arc<Catalogue>, mut config: QueryConfig) -> Self {
        config.normalize();
        let cache_size = config.page_cache_size;
        let tenants = if config.auto_register_tenants {
            GuildRegistry::with_factory(move |_| TenantState::new(cache_size))
        } else {
            GuildRegistry::explicit()
        };

        Self {
            catalogue,
            config,
            tenants,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Set up storage for a tenant, e.g. when the bot joins a server.
    pub fn register_tenant(&self, tenant: TenantId) -> bool {
        self.tenants
            .create_for(tenant, TenantState::new(self.config.page_cache_size))
    }

    /// Results matching the filter tokens.
    pub fn list<S: AsRef<str>>(
        &self,
        channel: ChannelId,
        tokens: &[S],
    ) -> Result<PagedResult, QueryError> {
        self.run(channel, None, tokens)
    }

    /// Results whose local name matches `term`, narrowed by the filter tokens.
    pub fn find<S: AsRef<str>>(
        &self,
        channel: ChannelId,
        term: &str,
        tokens: &[S],
    ) -> Result<PagedResult, QueryError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(QueryError::EmptyTerm);
        }
        self.run(channel, Some(term), tokens)
    }

    fn run<S: AsRef<str>>(
        &self,
        channel: ChannelId,
        term: Option<&str>,
        tokens: &[S],
    ) -> Result<PagedResult, QueryError> {
        let filter = Filter::parse(tokens)?;
        let mut result = PagedResult::new(channel, filter).with_page_size(self.config.page_size);
        result.apply_query(&self.catalogue, term);
        Ok(result)
    }

    /// Cache a result under the message that displays it.
    ///
    /// Single-page results cannot be turned and are not cached; returns
    /// whether the result was stored.
    pub fn remember(
        &self,
        tenant: TenantId,
        message_id: MessageId,
        result: PagedResult,
    ) -> Result<bool, QueryError> {
        if result.page_count() <= 1 {
            return Ok(false);
        }
        self.tenants.with_slot(tenant, |state| {
            state.pages.push(message_id, result);
        })?;
        Ok(true)
    }

    /// Move the cursor of a cached result. `None` when the message is not cached.
    pub fn turn_page(
        &self,
        tenant: TenantId,
        message_id: MessageId,
        action: PageAction,
    ) -> Result<Option<PageView>, QueryError> {
        let view = self.tenants.with_slot(tenant, |state| {
            let result = state.pages.get_mut(message_id)?;
            result.set_page(action);
            Some(PageView {
                channel_id: result.channel_id(),
                message_id,
                summary: result.summary(),
                items: result.render_page().to_vec(),
            })
        })?;
        Ok(view)
    }

    /// Look a symbol up by its qualified name.
    pub fn show(&self, path: &str) -> Option<(SymbolKind, &Symbol)> {
        self.catalogue.resolve_path(path)
    }

    /// Default filter as key/value pairs.
    pub fn describe_filters(&self) -> serde_json::Value {
        Filter::default().to_json()
    }
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("symbols", &self.catalogue.len())
            .field("config", &self.config)
            .field("tenants", &self.tenants)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{CatalogueBuilder, SymbolSpec};

    fn create_test_service(functions: usize, config: QueryConfig) -> QueryService {
        let mut builder = CatalogueBuilder::new();
        let juce = builder.add(SymbolSpec::namespace("juce"));
        for i in 0..functions {
            builder.add(SymbolSpec::function(&format!("juce::fn{:02}", i)).within(juce));
        }
        QueryService::new(Arc::new(builder.build()), config)
    }

    #[test]
    fn test_list_uses_configured_page_size() {
        let service = create_test_service(12, QueryConfig::default());
        let result = service.list(ChannelId(1), &["entity:Function"]).unwrap();
        assert_eq!(result.page_size(), 5);
        assert_eq!(result.page_count(), 3);
    }

    #[test]
    fn test_find_requires_term() {
        let service = create_test_service(3, QueryConfig::default());
        let err = service.find(ChannelId(1), "  ", &[] as &[&str]).unwrap_err();
        assert!(matches!(err, QueryError::EmptyTerm));

        let result = service.find(ChannelId(1), "fn01", &[] as &[&str]).unwrap();
        assert_eq!(result.item_count(), 1);
    }

    #[test]
    fn test_filter_errors_propagate() {
        let service = create_test_service(3, QueryConfig::default());
        let err = service.list(ChannelId(1), &["entity=Class"]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid option specification: entity=Class");
    }

    #[test]
    fn test_single_page_not_remembered() {
        let service = create_test_service(2, QueryConfig::default());
        let result = service.list(ChannelId(1), &["entity:Function"]).unwrap();
        assert!(!service.remember(TenantId(1), MessageId(10), result).unwrap());
        assert!(service
            .turn_page(TenantId(1), MessageId(10), PageAction::Forward)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_turn_page_round_trip() {
        let service = create_test_service(12, QueryConfig::default());
        let result = service.list(ChannelId(4), &["entity:Function"]).unwrap();
        assert!(service.remember(TenantId(1), MessageId(10), result).unwrap());

        let view = service
            .turn_page(TenantId(1), MessageId(10), PageAction::Forward)
            .unwrap()
            .unwrap();
        assert_eq!(view.channel_id, ChannelId(4));
        assert_eq!(view.summary.page, 2);
        assert_eq!(view.items.len(), 5);

        // other tenants cannot see it
        assert!(service
            .turn_page(TenantId(2), MessageId(10), PageAction::Forward)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_explicit_registration() {
        let config = QueryConfig {
            auto_register_tenants: false,
            ..QueryConfig::default()
        };
        let service = create_test_service(12, config);
        let result = service.list(ChannelId(1), &["entity:Function"]).unwrap();

        let err = service
            .remember(TenantId(9), MessageId(1), result.clone())
            .unwrap_err();
        assert!(matches!(err, QueryError::Registry(RegistryError::NotFound(_))));

        assert!(service.register_tenant(TenantId(9)));
        assert!(!service.register_tenant(TenantId(9)));
        assert!(service.remember(TenantId(9), MessageId(1), result).unwrap());
    }

    #[test]
    fn test_show_and_describe() {
        let service = create_test_service(3, QueryConfig::default());
        let (kind, symbol) = service.show("juce::fn02").unwrap();
        assert_eq!(kind, SymbolKind::Function);
        assert_eq!(symbol.local_name, "fn02");

        let filters = service.describe_filters();
        assert_eq!(filters["constexpr"], serde_json::Value::Null);
        assert_eq!(filters.as_object().unwrap().len(), 11);
    }
}
