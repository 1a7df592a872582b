//! Per-tenant state: the registry of tenant slots and the page cache each
//! slot holds.

mod cache;
mod registry;

pub use cache::PageCache;
pub use registry::{GuildRegistry, RegistryError, Slot};

/// Everything one tenant keeps between requests
#[derive(Debug)]
pub struct TenantState {
    pub pages: PageCache,
}

impl TenantState {
    pub fn new(page_cache_size: usize) -> Self {
        Self {
            pages: PageCache::new(page_cache_size),
        }
    }
}
