//! Paginated query results
//!
//! A [`PagedResult`] owns the matches of one query plus a page cursor. The
//! match set is computed once by [`PagedResult::apply_query`]; afterwards
//! only the cursor and the message id change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalogue::{Catalogue, Symbol, SymbolKind};
use crate::filter::Filter;
use crate::query::{self, Match};

pub const DEFAULT_PAGE_SIZE: usize = 10;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

snowflake!(
    /// Isolated scope with its own cache, e.g. one server
    TenantId
);
snowflake!(ChannelId);
snowflake!(
    /// Message that displays a result page
    MessageId
);

/// Page-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    Back,
    Forward,
}

/// Header values for a rendered page, all 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub page: usize,
    pub pages: usize,
    /// 0 when the result is empty
    pub first_item: usize,
    pub last_item: usize,
    pub total: usize,
}

impl std::fmt::Display for PageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page {}/{}, items {} to {} of {}",
            self.page, self.pages, self.first_item, self.last_item, self.total
        )
    }
}

/// Match set plus page cursor for one query
#[derive(Debug, Clone)]
pub struct PagedResult {
    matches: Vec<Match>,
    applied: bool,
    filter: Filter,
    term: Option<String>,
    page_size: usize,
    current_page: usize,
    channel_id: ChannelId,
    message_id: Option<MessageId>,
    created_at: DateTime<Utc>,
}

impl PagedResult {
    pub fn new(channel_id: ChannelId, filter: Filter) -> Self {
        Self {
            matches: Vec::new(),
            applied: false,
            filter,
            term: None,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 0,
            channel_id,
            message_id: None,
            created_at: Utc::now(),
        }
    }

    /// Items per page, at least 1
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.clamp_cursor();
        self
    }

    /// Run the query. Only the first call has an effect.
    pub fn apply_query(&mut self, catalogue: &Catalogue, term: Option<&str>) {
        if self.applied {
            tracing::warn!(
                channel = %self.channel_id,
                "query already applied to this result, ignoring"
            );
            return;
        }

        self.matches = query::evaluate(catalogue, &self.filter, term);
        self.term = term.map(str::to_string);
        self.applied = true;
        self.current_page = 0;
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn page_count(&self) -> usize {
        self.matches.len().div_ceil(self.page_size).max(1)
    }

    pub fn item_count(&self) -> usize {
        self.matches.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.current_page = (self.current_page + 1).min(self.page_count() - 1);
    }

    pub fn set_page(&mut self, action: PageAction) {
        match action {
            PageAction::Back => self.prev_page(),
            PageAction::Forward => self.next_page(),
        }
    }

    fn clamp_cursor(&mut self) {
        self.current_page = self.current_page.min(self.page_count() - 1);
    }

    /// Matches on the current page
    pub fn render_page(&self) -> &[Match] {
        let start = (self.current_page * self.page_size).min(self.matches.len());
        let end = (start + self.page_size).min(self.matches.len());
        &self.matches[start..end]
    }

    /// Current page with symbols resolved; unresolvable ids are dropped.
    pub fn resolve_page<'a>(&self, catalogue: &'a Catalogue) -> Vec<(SymbolKind, &'a Symbol)> {
        self.render_page()
            .iter()
            .filter_map(|m| catalogue.get(m.id).map(|symbol| (m.kind, symbol)))
            .collect()
    }

    pub fn summary(&self) -> PageSummary {
        let shown = self.render_page().len();
        let start = self.current_page * self.page_size;
        PageSummary {
            page: self.current_page + 1,
            pages: self.page_count(),
            first_item: if shown == 0 { 0 } else { start + 1 },
            last_item: start + shown,
            total: self.item_count(),
        }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn message_id(&self) -> Option<MessageId> {
        self.message_id
    }

    pub fn set_message_id(&mut self, message_id: MessageId) {
        self.message_id = Some(message_id);
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Drop the match set, e.g. when the result is evicted.
    pub fn reset(&mut self) {
        self.matches.clear();
        self.matches.shrink_to_fit();
        self.current_page = 0;
    }
}
