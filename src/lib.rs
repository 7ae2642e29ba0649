//! Storefront
//!
//! Perfume shop core: catalog, cart, promo codes and chat checkout, plus
//! the password-gated admin panel that edits the inventory.
//!
//! ## Features
//! - Catalog filtering and search
//! - Stock-checked shopping cart
//! - Promo code discounts
//! - Order hand-off through a chat deep link
//! - Inventory administration

pub mod app;
pub mod config;
pub mod domain;
pub mod storage;
pub mod web;

use std::fmt;
use thiserror::Error;

pub use app::{AdminPanel, CatalogStore, Notice, NoticeLevel, Notices, Storefront};
pub use domain::aggregates::{Cart, CartItem, CustomerProfile, Product, ProductDraft};
pub use domain::services::{FilterCriteria, PromoCode, PromoKind, Totals};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, SharedStore, StorageError};

// =============================================================================
// Error Types
// =============================================================================

/// Form field a validation failure points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Brand,
    Price,
    Stock,
    Image,
    Volume,
    Category,
    Phone,
    Address,
    Cart,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Brand => "brand",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Image => "image",
            Self::Volume => "volume",
            Self::Category => "category",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Cart => "cart",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error("Product {0} not found")]
    ReferenceNotFound(i64),

    #[error("Product is out of stock")]
    OutOfStock,

    #[error("Not enough stock: {available} available")]
    InsufficientStock { available: u32 },

    #[error("Unknown promo code {0}")]
    InvalidPromoCode(String),

    #[error("Promo code is empty")]
    EmptyPromoCode,
}

pub type Result<T> = std::result::Result<T, StoreError>;
