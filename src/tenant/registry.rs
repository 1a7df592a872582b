//! Per-tenant slot table
//!
//! Slots are created lazily on first access (or explicitly) and never
//! removed. Lookups take the read lock; creation releases it, takes the
//! write lock and checks again before inserting so concurrent first
//! accesses still create a single slot.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::paging::TenantId;

/// Shared handle to one tenant's state
pub type Slot<S> = Arc<Mutex<S>>;

type Factory<S> = Box<dyn Fn(TenantId) -> S + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("No storage registered for tenant {0}")]
    NotFound(TenantId),
}

pub struct GuildRegistry<S> {
    slots: RwLock<HashMap<TenantId, Slot<S>>>,
    factory: Option<Factory<S>>,
}

impl<S> GuildRegistry<S> {
    /// Registry that creates missing slots with `factory` on first access.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(TenantId) -> S + Send + Sync + 'static,
    {
        Self {
            slots: RwLock::new(HashMap::new()),
            factory: Some(Box::new(factory)),
        }
    }

    /// Registry whose slots must be created with [`GuildRegistry::create_for`].
    pub fn explicit() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            factory: None,
        }
    }

    /// Create a slot for `tenant`. Returns false if one already exists.
    pub fn create_for(&self, tenant: TenantId, state: S) -> bool {
        if self.slots.read().contains_key(&tenant) {
            return false;
        }

        let mut slots = self.slots.write();
        match slots.entry(tenant) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(state)));
                tracing::info!(tenant = %tenant, "registered tenant storage");
                true
            }
        }
    }

    /// Slot for `tenant`, created on demand when the registry has a factory.
    pub fn get(&self, tenant: TenantId) -> Result<Slot<S>, RegistryError> {
        {
            let slots = self.slots.read();
            if let Some(slot) = slots.get(&tenant) {
                return Ok(Arc::clone(slot));
            }
        }

        let Some(factory) = &self.factory else {
            return Err(RegistryError::NotFound(tenant));
        };

        let mut slots = self.slots.write();
        let slot = slots.entry(tenant).or_insert_with(|| {
            tracing::info!(tenant = %tenant, "created tenant storage on first use");
            Arc::new(Mutex::new(factory(tenant)))
        });
        Ok(Arc::clone(slot))
    }

    /// Run `f` with exclusive access to the tenant's state.
    pub fn with_slot<R>(
        &self,
        tenant: TenantId,
        f: impl FnOnce(&mut S) -> R,
    ) -> Result<R, RegistryError> {
        let slot = self.get(tenant)?;
        let mut state = slot.lock();
        Ok(f(&mut state))
    }

    pub fn contains(&self, tenant: TenantId) -> bool {
        self.slots.read().contains_key(&tenant)
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    pub fn tenants(&self) -> Vec<TenantId> {
        let mut tenants: Vec<_> = self.slots.read().keys().copied().collect();
        tenants.sort();
        tenants
    }
}

impl<S: Default + 'static> Default for GuildRegistry<S> {
    fn default() -> Self {
        Self::with_factory(|_| S::default())
    }
}

impl<S> std::fmt::Debug for GuildRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuildRegistry")
            .field("tenants", &self.len())
            .field("auto_create", &self.factory.is_some())
            .finish()
    }
}
