//! Inventory administration.

use chrono::Utc;
use tracing::{info, warn};
use crate::app::{CatalogStore, NoticeLevel, Notices};
use crate::domain::aggregates::{Product, ProductDraft};
use crate::domain::value_objects::ProductId;
use crate::storage::SharedStore;
use crate::{Field, FieldError, Result, StoreError};

/// Timestamp-flavoured ids that never repeat within a catalog, even when two
/// products are created in the same millisecond.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    last: ProductId,
}

impl IdAllocator {
    pub fn next(&mut self, existing: &[Product]) -> ProductId {
        self.next_at(Utc::now().timestamp_millis(), existing)
    }

    pub fn next_at(&mut self, now_ms: i64, existing: &[Product]) -> ProductId {
        let max_existing = existing.iter().map(|p| p.id).max().unwrap_or(0);
        let id = now_ms.max(self.last + 1).max(max_existing + 1);
        self.last = id;
        id
    }
}

pub struct AdminPanel {
    catalog_store: CatalogStore,
    products: Vec<Product>,
    ids: IdAllocator,
    pending_delete: Option<ProductId>,
    notices: Notices,
}

impl AdminPanel {
    /// Opens the saved catalog, seeding it from `template` on first use.
    pub fn open(store: SharedStore, template: &[Product]) -> Self {
        let catalog_store = CatalogStore::new(store);
        let products = catalog_store.load_or_seed(template);
        Self { catalog_store, products, ids: IdAllocator::default(), pending_delete: None, notices: Notices::default() }
    }

    pub fn products(&self) -> &[Product] { &self.products }
    pub fn notices(&self) -> &Notices { &self.notices }
    pub fn pending_delete(&self) -> Option<ProductId> { self.pending_delete }

    pub fn create(&mut self, draft: &ProductDraft) -> Result<ProductId> {
        let valid = draft.validate().map_err(|e| self.reject(e))?;
        let id = self.ids.next(&self.products);
        let product = valid.into_product(id);
        let name = product.name.clone();

        let mut next = self.products.clone();
        next.push(product);
        self.commit(next)?;
        info!(id, name = %name, "product created");
        self.notices.push(NoticeLevel::Success, "Product added");
        Ok(id)
    }

    /// `raw` is the stock input as typed.
    pub fn update_stock(&mut self, id: ProductId, raw: &str) -> Result<u32> {
        let stock = raw.trim().parse::<u32>()
            .map_err(|_| self.reject(FieldError::new(Field::Stock, "Enter a valid quantity")))?;
        let Some(index) = self.index_of(id) else {
            warn!(id, "stock update for a missing product");
            return Err(StoreError::ReferenceNotFound(id));
        };

        let mut next = self.products.clone();
        next[index].stock = Some(stock);
        self.commit(next)?;
        let name = &self.products[index].name;
        info!(id, stock, "stock updated");
        self.notices.push(NoticeLevel::Success, format!("Stock of \"{name}\" set to {stock}"));
        Ok(stock)
    }

    /// First step of deletion. Returns the confirmation prompt.
    pub fn request_delete(&mut self, id: ProductId) -> Result<String> {
        let Some(index) = self.index_of(id) else {
            warn!(id, "delete requested for a missing product");
            return Err(StoreError::ReferenceNotFound(id));
        };
        self.pending_delete = Some(id);
        Ok(format!("Are you sure you want to delete \"{}\"?", self.products[index].name))
    }

    pub fn cancel_delete(&mut self) { self.pending_delete = None; }

    /// Second step of deletion. The pending request is cleared whatever happens.
    pub fn confirm_delete(&mut self) -> Result<Product> {
        let pending = self.pending_delete.take();
        let Some((id, index)) = pending.and_then(|id| self.index_of(id).map(|i| (id, i))) else {
            self.notices.push(NoticeLevel::Error, "Delete failed: product not found");
            return Err(StoreError::ReferenceNotFound(pending.unwrap_or_default()));
        };

        let mut next = self.products.clone();
        let removed = next.remove(index);
        if let Err(e) = self.commit(next) {
            self.notices.push(NoticeLevel::Error, "Could not delete the product");
            return Err(e);
        }
        info!(id, name = %removed.name, "product deleted");
        self.notices.push(NoticeLevel::Success, format!("\"{}\" deleted", removed.name));
        Ok(removed)
    }

    fn index_of(&self, id: ProductId) -> Option<usize> { self.products.iter().position(|p| p.id == id) }

    /// Saves `next` and only then makes it current.
    fn commit(&mut self, next: Vec<Product>) -> Result<()> {
        if let Err(e) = self.catalog_store.save(&next) {
            self.notices.push(NoticeLevel::Error, "Could not save the catalog");
            return Err(e);
        }
        self.products = next;
        Ok(())
    }

    fn reject(&mut self, e: FieldError) -> StoreError {
        self.notices.push(NoticeLevel::Error, e.message.clone());
        e.into()
    }
}
