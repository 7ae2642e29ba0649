//! Shopper-facing state: catalog view, cart, promo code, checkout, theme.

use serde_json::Value;
use tracing::{error, info, warn};
use crate::app::{CatalogStore, NoticeLevel, Notices};
use crate::domain::aggregates::{format_order, lines_total, AddOutcome, Cart, CartLine, ChatTarget, ContactMethod, CustomerProfile, Product};
use crate::domain::services::{self, promo, FilterCriteria, PromoCode, Totals};
use crate::domain::value_objects::{ProductId, Theme};
use crate::storage::{keys, load_json, save_json, SharedStore};
use crate::{Field, FieldError, Result, StoreError};

pub struct Storefront {
    store: SharedStore,
    catalog_store: CatalogStore,
    catalog: Vec<Product>,
    cart: Cart,
    promo: Option<&'static PromoCode>,
    theme: Theme,
    notices: Notices,
}

impl Storefront {
    /// Restores catalog, cart and theme from `store`. Unreadable state starts empty.
    pub fn open(store: SharedStore) -> Self {
        let catalog_store = CatalogStore::new(store.clone());
        let mut notices = Notices::default();

        let catalog = match catalog_store.try_load() {
            Ok(products) => products.unwrap_or_default(),
            Err(e) => {
                error!(error = %e, "failed to load catalog");
                notices.push(NoticeLevel::Error, "Could not load the catalog");
                Vec::new()
            }
        };

        let cart = match load_json::<Vec<Value>>(store.as_ref(), keys::CART) {
            Ok(entries) => Cart::from_persisted(entries.unwrap_or_default()),
            Err(e) => {
                error!(error = %e, "failed to load cart");
                notices.push(NoticeLevel::Error, "Could not restore your cart");
                Cart::new()
            }
        };

        let theme = match load_json::<Theme>(store.as_ref(), keys::THEME) {
            Ok(theme) => theme,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable theme preference");
                notices.push(NoticeLevel::Info, "Could not restore your theme preference");
                None
            }
        };

        info!(products = catalog.len(), cart_lines = cart.line_count(), "storefront opened");
        Self { store, catalog_store, catalog, cart, promo: None, theme: theme.unwrap_or_default(), notices }
    }

    /// Picks up catalog edits made through the admin panel.
    pub fn reload_catalog(&mut self) { self.catalog = self.catalog_store.load(); }

    pub fn catalog(&self) -> &[Product] { &self.catalog }
    pub fn product(&self, id: ProductId) -> Option<&Product> { self.catalog.iter().find(|p| p.id == id) }

    pub fn search(&self, criteria: &FilterCriteria, text: &str) -> Vec<&Product> {
        services::filter(&self.catalog, criteria, text)
    }

    pub fn brands(&self) -> Vec<&str> { services::brands(&self.catalog) }
    pub fn categories(&self) -> Vec<&str> { services::categories(&self.catalog) }

    pub fn cart(&self) -> &Cart { &self.cart }
    pub fn cart_lines(&self) -> Vec<CartLine<'_>> { self.cart.lines(&self.catalog) }

    /// Totals over the lines still present in the catalog.
    pub fn totals(&self) -> Totals {
        Totals::compute(lines_total(&self.cart_lines()), self.promo)
    }

    pub fn notices(&self) -> &Notices { &self.notices }

    pub fn add_to_cart(&mut self, id: ProductId) -> Result<AddOutcome> {
        let outcome = self.cart.add_item(id, &self.catalog);
        match &outcome {
            Ok(AddOutcome::Added) => self.notices.push(NoticeLevel::Success, "Added to cart"),
            Ok(AddOutcome::Increased { .. }) => self.notices.push(NoticeLevel::Success, "Quantity increased"),
            Err(e) => self.report(e),
        }
        if outcome.is_ok() { self.persist_cart(); }
        outcome
    }

    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> Result<Option<u32>> {
        let outcome = self.cart.update_quantity(id, delta, &self.catalog);
        match &outcome {
            Ok(None) => self.notices.push(NoticeLevel::Info, "Removed from cart"),
            Ok(Some(_)) => {}
            Err(e) => self.report(e),
        }
        if outcome.is_ok() { self.persist_cart(); }
        outcome
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        if self.cart.remove_item(id) {
            self.notices.push(NoticeLevel::Info, "Removed from cart");
        }
        self.persist_cart();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    /// Replaces any code applied before. Codes are not persisted.
    pub fn apply_promo(&mut self, input: &str) -> Result<&'static PromoCode> {
        match promo::resolve(input) {
            Ok(code) => {
                self.promo = Some(code);
                info!(code = code.code, "promo code applied");
                self.notices.push(NoticeLevel::Success, format!("Promo code \"{}\" applied", code.code));
                Ok(code)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    pub fn remove_promo(&mut self) {
        if self.promo.take().is_some() {
            self.notices.push(NoticeLevel::Info, "Promo code removed");
        }
    }

    pub fn applied_promo(&self) -> Option<&'static PromoCode> { self.promo }

    pub fn theme(&self) -> Theme { self.theme }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = save_json(self.store.as_ref(), keys::THEME, &self.theme) {
            error!(error = %e, "failed to save theme preference");
        }
        self.theme
    }

    /// Details from the previous order, to pre-fill the checkout form.
    pub fn customer_profile(&self) -> CustomerProfile {
        load_json(self.store.as_ref(), keys::CUSTOMER_PROFILE)
            .unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable customer profile");
                None
            })
            .unwrap_or_default()
    }

    /// Validates the form, remembers it and returns the chat link carrying the order.
    pub fn checkout(&mut self, profile: &CustomerProfile, method: ContactMethod, target: &ChatTarget) -> std::result::Result<String, Vec<FieldError>> {
        if self.cart_lines().is_empty() {
            let errors = vec![FieldError::new(Field::Cart, "Your cart is empty")];
            self.notices.push(NoticeLevel::Error, errors[0].message.clone());
            return Err(errors);
        }
        if let Err(errors) = profile.validate() {
            self.notices.push(NoticeLevel::Error, "Please check the highlighted fields");
            return Err(errors);
        }

        if let Err(e) = save_json(self.store.as_ref(), keys::CUSTOMER_PROFILE, profile) {
            error!(error = %e, "failed to save customer profile");
        }

        let message = format_order(&self.cart, profile, &self.catalog, self.promo);
        let link = target.deep_link(method, &message);
        info!(lines = self.cart.line_count(), total = self.totals().total, ?method, "order handed off to chat");
        self.notices.push(NoticeLevel::Success, "Order placed! Opening the chat...");
        Ok(link)
    }

    fn persist_cart(&mut self) {
        if let Err(e) = save_json(self.store.as_ref(), keys::CART, &self.cart) {
            error!(error = %e, "failed to save cart");
            self.notices.push(NoticeLevel::Error, "Could not save your cart");
        }
    }

    fn report(&mut self, e: &StoreError) {
        match e {
            StoreError::ReferenceNotFound(id) => warn!(product_id = id, "stale product reference"),
            StoreError::OutOfStock => self.notices.push(NoticeLevel::Error, "This product is out of stock"),
            StoreError::InsufficientStock { .. } => self.notices.push(NoticeLevel::Error, "Not enough items in stock"),
            StoreError::EmptyPromoCode => self.notices.push(NoticeLevel::Error, "Please enter a promo code"),
            StoreError::InvalidPromoCode(_) => self.notices.push(NoticeLevel::Error, "Invalid promo code"),
            other => self.notices.push(NoticeLevel::Error, other.to_string()),
        }
    }
}
