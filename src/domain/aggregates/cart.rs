//! Cart Aggregate

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductId;
use crate::{Result, StoreError};

/// One cart line. Name and price are snapshots taken when the line was created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    pub price: i64,
    pub quantity: u32,
}

impl CartItem {
    /// Saturates rather than overflowing on absurd persisted prices.
    pub fn line_total(&self) -> i64 { self.price.saturating_mul(i64::from(self.quantity)) }
}

/// Cart line joined with its catalog product.
#[derive(Clone, Copy, Debug)]
pub struct CartLine<'a> {
    pub item: &'a CartItem,
    pub product: &'a Product,
}

impl CartLine<'_> {
    pub fn name(&self) -> &str {
        if self.item.name.is_empty() { &self.product.name } else { &self.item.name }
    }
    pub fn line_total(&self) -> i64 { self.item.line_total() }
}

/// Sum of line totals, saturating like [`CartItem::line_total`].
pub fn lines_total(lines: &[CartLine<'_>]) -> i64 {
    lines.iter().fold(0i64, |acc, l| acc.saturating_add(l.line_total()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Increased { quantity: u32 },
}

/// Stock-checked line items. Every line satisfies `1 <= quantity <= stock`
/// as of the last mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    /// Rebuilds a cart from a persisted document, dropping malformed entries.
    pub fn from_persisted(entries: Vec<Value>) -> Self {
        let total = entries.len();
        let items: Vec<CartItem> = entries
            .into_iter()
            .filter_map(|v| serde_json::from_value::<CartItem>(v).ok())
            .filter(|item| item.quantity > 0)
            .collect();
        if items.len() < total {
            warn!(dropped = total - items.len(), "discarded malformed cart entries");
        }
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn line_count(&self) -> usize { self.items.len() }

    /// Units across all lines, for the cart badge.
    pub fn item_count(&self) -> u32 { self.items.iter().fold(0u32, |acc, i| acc.saturating_add(i.quantity)) }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items.iter().find(|i| i.product_id == product_id).map(|i| i.quantity)
    }

    pub fn total(&self) -> i64 { self.items.iter().fold(0i64, |acc, i| acc.saturating_add(i.line_total())) }

    pub fn add_item(&mut self, product_id: ProductId, catalog: &[Product]) -> Result<AddOutcome> {
        let product = find(catalog, product_id)?;
        let stock = product.available();
        if stock == 0 { return Err(StoreError::OutOfStock); }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let quantity = existing.quantity + 1;
            if quantity > stock { return Err(StoreError::InsufficientStock { available: stock }); }
            existing.quantity = quantity;
            return Ok(AddOutcome::Increased { quantity });
        }

        self.items.push(CartItem {
            product_id,
            name: product.name.clone(),
            price: product.unit_price(),
            quantity: 1,
        });
        Ok(AddOutcome::Added)
    }

    /// Applies `delta` to a line. Returns the new quantity, or `None` when the
    /// line dropped to zero and was removed.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64, catalog: &[Product]) -> Result<Option<u32>> {
        let index = self.items.iter().position(|i| i.product_id == product_id)
            .ok_or(StoreError::ReferenceNotFound(product_id))?;
        let quantity = i64::from(self.items[index].quantity).saturating_add(delta);
        if quantity <= 0 {
            self.items.remove(index);
            return Ok(None);
        }

        let stock = find(catalog, product_id)?.available();
        if quantity > i64::from(stock) { return Err(StoreError::InsufficientStock { available: stock }); }
        // quantity <= stock, which is a u32
        let quantity = quantity as u32;
        self.items[index].quantity = quantity;
        Ok(Some(quantity))
    }

    /// Removes the line if present. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) { self.items.clear(); }

    /// Lines whose product still exists, in cart order.
    pub fn lines<'a>(&'a self, catalog: &'a [Product]) -> Vec<CartLine<'a>> {
        self.items
            .iter()
            .filter_map(|item| match catalog.iter().find(|p| p.id == item.product_id) {
                Some(product) => Some(CartLine { item, product }),
                None => {
                    warn!(product_id = item.product_id, "cart line references a missing product");
                    None
                }
            })
            .collect()
    }
}

fn find(catalog: &[Product], product_id: ProductId) -> Result<&Product> {
    catalog.iter().find(|p| p.id == product_id).ok_or(StoreError::ReferenceNotFound(product_id))
}
