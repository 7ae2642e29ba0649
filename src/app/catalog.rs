//! Catalog persistence.

use serde_json::Value;
use tracing::{error, info, warn};
use crate::domain::aggregates::Product;
use crate::storage::{keys, load_json, save_json, SharedStore, StorageError};

#[derive(Clone)]
pub struct CatalogStore {
    store: SharedStore,
}

impl CatalogStore {
    pub fn new(store: SharedStore) -> Self { Self { store } }

    /// `Ok(None)` when nothing was ever saved. Entries that are not products
    /// are skipped; a document that is not an array is an error.
    pub fn try_load(&self) -> Result<Option<Vec<Product>>, StorageError> {
        let Some(entries) = load_json::<Vec<Value>>(self.store.as_ref(), keys::CATALOG)? else {
            return Ok(None);
        };
        let total = entries.len();
        let products: Vec<Product> = entries
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();
        if products.len() < total {
            warn!(dropped = total - products.len(), "skipped unreadable catalog entries");
        }
        Ok(Some(products))
    }

    /// Never fails: missing or corrupt data reads as an empty catalog.
    pub fn load(&self) -> Vec<Product> {
        match self.try_load() {
            Ok(products) => products.unwrap_or_default(),
            Err(e) => {
                error!(error = %e, "failed to load catalog");
                Vec::new()
            }
        }
    }

    pub fn save(&self, products: &[Product]) -> crate::Result<()> {
        save_json(self.store.as_ref(), keys::CATALOG, products).map_err(|e| {
            error!(error = %e, "failed to save catalog");
            e.into()
        })
    }

    /// Loads the saved catalog, or copies `template` in when none was saved yet.
    pub fn load_or_seed(&self, template: &[Product]) -> Vec<Product> {
        match self.try_load() {
            Ok(Some(products)) => products,
            Ok(None) if !template.is_empty() => {
                info!(count = template.len(), "seeding catalog from template");
                // An unsaved seed still serves this session.
                let _ = self.save(template);
                template.to_vec()
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, "failed to load catalog");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id, name: name.into(), brand: "Kilian".into(), price: "4 100 ₽".into(), numeric_price: Some(4100),
            stock: Some(4), notes: "rose".into(), description: "desc".into(), image: "https://img/x.jpg".into(),
            volume: "10 ml".into(), category: "women".into(),
        }
    }

    #[test]
    fn test_round_trip() {
        let store = CatalogStore::new(MemoryStore::shared());
        let products = vec![product(1, "Good Girl Gone Bad"), product(2, "Love, don't be shy")];
        store.save(&products).unwrap();
        assert_eq!(store.load(), products);
    }

    #[test]
    fn test_corrupt_document_loads_empty() {
        let shared = MemoryStore::shared();
        shared.set(keys::CATALOG, r#"{"id":1}"#).unwrap();
        let store = CatalogStore::new(shared.clone());
        assert!(store.try_load().is_err());
        assert!(store.load().is_empty());
        shared.set(keys::CATALOG, "not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_null_entries_are_skipped() {
        let shared = MemoryStore::shared();
        shared.set(keys::CATALOG, r#"[null, {"id":5,"name":"X"}, {"name":"no id"}]"#).unwrap();
        let loaded = CatalogStore::new(shared).load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 5);
    }

    #[test]
    fn test_seed_happens_once() {
        let shared: SharedStore = Arc::new(MemoryStore::new());
        let store = CatalogStore::new(shared);
        let template = vec![product(1, "Seed")];
        assert_eq!(store.load_or_seed(&template), template);

        let mut edited = template.clone();
        edited[0].stock = Some(0);
        store.save(&edited).unwrap();
        assert_eq!(store.load_or_seed(&template), edited);
    }

    #[test]
    fn test_nothing_saved_and_no_template() {
        let store = CatalogStore::new(MemoryStore::shared());
        assert!(store.load_or_seed(&[]).is_empty());
        assert!(store.try_load().unwrap().is_none());
    }
}
