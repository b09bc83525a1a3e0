//! Collection listing state with persisted per-address hide overrides.
//!
//! The listing carries the address it belongs to, so a hide or unhide is
//! always persisted against the owner of the data currently displayed, even
//! if the session has already started resolving a different address.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shared::{Address, CollectionEntry};
use tracing::info;

use super::container::{PendingHandle, StateContainer, Status, SubscriptionId, Update};
use super::overrides::OverrideStore;
use crate::core::error::{AppError, FetchError, Result};

/// Collections held by one address, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionList {
    pub address: Address,
    pub entries: Vec<CollectionEntry>,
}

impl CollectionList {
    /// Build a listing and flag every entry whose slug is in `hidden`.
    pub fn merged(address: Address, mut entries: Vec<CollectionEntry>, hidden: &BTreeSet<String>) -> Self {
        for entry in &mut entries {
            entry.hidden = hidden.contains(&entry.slug);
        }
        Self { address, entries }
    }

    pub fn find(&self, slug: &str) -> Option<&CollectionEntry> {
        self.entries.iter().find(|entry| entry.slug == slug)
    }

    fn find_mut(&mut self, slug: &str) -> Option<&mut CollectionEntry> {
        self.entries.iter_mut().find(|entry| entry.slug == slug)
    }

    pub fn visible(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.entries.iter().filter(|entry| !entry.hidden)
    }

    pub fn hidden_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.hidden).count()
    }

    /// Sum of floor price times owned count over visible entries.
    pub fn visible_floor_value(&self) -> f64 {
        self.visible().filter_map(CollectionEntry::floor_value).sum()
    }
}

pub struct CollectionsState {
    container: Arc<StateContainer<CollectionList>>,
    overrides: OverrideStore,
}

impl CollectionsState {
    pub fn new(overrides: OverrideStore, fetch_timeout: Duration) -> Self {
        Self {
            container: Arc::new(StateContainer::new("collections", fetch_timeout)),
            overrides,
        }
    }

    pub fn container(&self) -> &Arc<StateContainer<CollectionList>> {
        &self.container
    }

    /// Resolve the listing for `address` from `fetch`.
    ///
    /// Hide overrides for `address` are read while the listing is applied,
    /// under the same lock [`hide`](Self::hide) and [`unhide`](Self::unhide)
    /// hold, so an override recorded while the fetch was in flight is honoured.
    pub fn set_pending<F>(&self, address: Address, fetch: F) -> PendingHandle
    where
        F: Future<Output = std::result::Result<Vec<CollectionEntry>, FetchError>> + Send + 'static,
    {
        let overrides = self.overrides.clone();
        self.container.set_pending_with(fetch, move |entries| {
            let hidden = overrides.get(&address);
            CollectionList::merged(address, entries, &hidden)
        })
    }

    pub fn set_resolved(&self, address: Address, entries: Vec<CollectionEntry>) {
        let hidden = self.overrides.get(&address);
        self.container
            .set_resolved(CollectionList::merged(address, entries, &hidden));
    }

    pub fn get(&self) -> Option<CollectionList> {
        self.container.get()
    }

    pub fn status(&self) -> Status {
        self.container.status()
    }

    pub fn get_collection(&self, slug: &str) -> Option<CollectionEntry> {
        self.container
            .with_current(|list| list.and_then(|list| list.find(slug).cloned()))
    }

    pub fn get_visible(&self) -> Vec<CollectionEntry> {
        self.container.with_current(|list| {
            list.map(|list| list.visible().cloned().collect())
                .unwrap_or_default()
        })
    }

    /// `true` unless the slug is present and flagged hidden.
    pub fn is_visible(&self, slug: &str) -> bool {
        self.get_collection(slug)
            .map(|entry| !entry.hidden)
            .unwrap_or(true)
    }

    /// Hide `slug`, persist the override and notify subscribers.
    pub fn hide(&self, slug: &str) -> Result<()> {
        self.set_hidden(slug, true)
    }

    /// Reverse of [`hide`](Self::hide). Also removes the persisted override.
    pub fn unhide(&self, slug: &str) -> Result<()> {
        self.set_hidden(slug, false)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Update<CollectionList>) + Send + Sync + 'static,
    {
        self.container.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.container.unsubscribe(id)
    }

    fn set_hidden(&self, slug: &str, hidden: bool) -> Result<()> {
        self.container
            .exclusive(|| self.set_hidden_locked(slug, hidden))
    }

    fn set_hidden_locked(&self, slug: &str, hidden: bool) -> Result<()> {
        let owner = self
            .container
            .with_current(|list| {
                list.and_then(|list| list.find(slug).map(|_| list.address.clone()))
            })
            .ok_or_else(|| AppError::NotFound(slug.to_string()))?;

        if hidden {
            self.overrides.add(&owner, slug)?;
        } else {
            self.overrides.remove(&owner, slug)?;
        }

        let applied = self
            .container
            .modify(|list| {
                if list.address != owner {
                    return false;
                }
                match list.find_mut(slug) {
                    Some(entry) => {
                        entry.hidden = hidden;
                        true
                    }
                    None => false,
                }
            })
            .unwrap_or(false);

        if applied {
            self.container.emit_update();
        }
        info!(address = %owner, slug, hidden, "Collection visibility changed");
        Ok(())
    }
}
