//! Per-address set of hidden collection slugs, persisted through a
//! [`KeyValueStore`] under `hidden_collections_<address>` as a JSON array.

use std::collections::BTreeSet;
use std::sync::Arc;

use shared::Address;
use tracing::{debug, warn};

use crate::core::error::StorageError;
use crate::core::service::KeyValueStore;

pub const KEY_PREFIX: &str = "hidden_collections_";

/// Storage key for `address`.
pub fn storage_key(address: &Address) -> String {
    format!("{}{}", KEY_PREFIX, address)
}

#[derive(Clone)]
pub struct OverrideStore {
    store: Arc<dyn KeyValueStore>,
}

impl OverrideStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Hidden slugs for `address`.
    ///
    /// A missing key is the empty set. So is a stored value that is not a
    /// JSON array of strings; that case is logged and otherwise ignored.
    pub fn get(&self, address: &Address) -> BTreeSet<String> {
        let key = storage_key(address);
        let Some(raw) = self.store.read_string(&key) else {
            return BTreeSet::new();
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(slugs) => slugs.into_iter().collect(),
            Err(e) => {
                warn!(key = %key, error = %e, "Corrupt hidden-collections entry, treating as empty");
                BTreeSet::new()
            }
        }
    }

    /// Replace the stored set for `address`.
    pub fn write(&self, address: &Address, slugs: &BTreeSet<String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string(slugs)?;
        self.store.write_string(&storage_key(address), &raw)
    }

    /// Add `slug`; returns whether it was newly inserted.
    pub fn add(&self, address: &Address, slug: &str) -> Result<bool, StorageError> {
        let mut slugs = self.get(address);
        let inserted = slugs.insert(slug.to_string());
        self.write(address, &slugs)?;
        debug!(address = %address, slug, inserted, "Hidden override added");
        Ok(inserted)
    }

    /// Remove `slug`; returns whether it was present.
    pub fn remove(&self, address: &Address, slug: &str) -> Result<bool, StorageError> {
        let mut slugs = self.get(address);
        let removed = slugs.remove(slug);
        self.write(address, &slugs)?;
        debug!(address = %address, slug, removed, "Hidden override removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;

    fn address(raw: &str) -> Address {
        Address::parse(raw).unwrap()
    }

    fn overrides() -> (Arc<MemoryStore>, OverrideStore) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), OverrideStore::new(store))
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(storage_key(&address("0xabc")), "hidden_collections_0xabc");
    }

    #[test]
    fn test_absent_key_is_empty_set() {
        let (_, overrides) = overrides();
        assert!(overrides.get(&address("0xabc")).is_empty());
    }

    #[test]
    fn test_corrupt_value_is_empty_set() {
        let (store, overrides) = overrides();
        store.write_string("hidden_collections_0xabc", "{not json").unwrap();
        assert!(overrides.get(&address("0xabc")).is_empty());

        store.write_string("hidden_collections_0xabc", "[1, 2]").unwrap();
        assert!(overrides.get(&address("0xabc")).is_empty());
    }

    #[test]
    fn test_add_remove_persist() {
        let (store, overrides) = overrides();
        let owner = address("0xabc");

        assert!(overrides.add(&owner, "b").unwrap());
        assert!(overrides.add(&owner, "a").unwrap());
        assert!(!overrides.add(&owner, "a").unwrap());
        assert_eq!(
            store.read_string("hidden_collections_0xabc").as_deref(),
            Some(r#"["a","b"]"#)
        );

        assert!(overrides.remove(&owner, "b").unwrap());
        assert!(!overrides.remove(&owner, "b").unwrap());
        let expected: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        assert_eq!(overrides.get(&owner), expected);
    }

    #[test]
    fn test_sets_are_isolated_per_address() {
        let (_, overrides) = overrides();
        overrides.add(&address("0x1"), "punks").unwrap();
        assert!(overrides.get(&address("0x2")).is_empty());
    }

    #[test]
    fn test_add_over_corrupt_value_recovers() {
        let (store, overrides) = overrides();
        store.write_string("hidden_collections_0xabc", "garbage").unwrap();
        overrides.add(&address("0xabc"), "punks").unwrap();
        assert!(overrides.get(&address("0xabc")).contains("punks"));
    }
}
