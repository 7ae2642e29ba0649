//! Order hand-off: customer contact details and the chat message.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use crate::domain::aggregates::{lines_total, Cart, Product};
use crate::domain::services::{PromoCode, Totals};
use crate::domain::value_objects::{format_amount, Phone};
use crate::{Field, FieldError};

/// Checkout form, remembered between orders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub comment: String,
}

impl CustomerProfile {
    /// Reports every bad field, in form order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(Field::Name, "Please enter your name"));
        }
        if !Phone::new(self.phone.as_str()).is_valid() {
            errors.push(FieldError::new(Field::Phone, "Please enter a valid phone number"));
        }
        if self.address.trim().is_empty() {
            errors.push(FieldError::new(Field::Address, "Please enter a delivery address"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    /// Straight into a chat with the shop owner.
    #[default]
    Direct,
    /// Through the shop's bot start parameter.
    Bot,
}

/// Chat accounts orders are handed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTarget {
    pub username: String,
    pub bot_username: String,
}

impl ChatTarget {
    pub fn deep_link(&self, method: ContactMethod, message: &str) -> String {
        let encoded = urlencoding::encode(message);
        match method {
            ContactMethod::Direct => format!("https://t.me/{}?text={}", self.username, encoded),
            ContactMethod::Bot => format!("https://t.me/{}?start=order_{}", self.bot_username, encoded),
        }
    }
}

/// Plain-text order for the chat hand-off. Cart lines whose product left the
/// catalog are not listed and not counted.
pub fn format_order(cart: &Cart, customer: &CustomerProfile, catalog: &[Product], promo: Option<&PromoCode>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "🛒 NEW ORDER");
    let _ = writeln!(out, "👤 Name: {}", customer.name.trim());
    let _ = writeln!(out, "📱 Phone: {}", customer.phone.trim());
    let _ = writeln!(out, "📍 Address: {}", customer.address.trim());
    let comment = customer.comment.trim();
    if !comment.is_empty() {
        let _ = writeln!(out, "💬 Comment: {comment}");
    }
    let _ = writeln!(out, "\n🛍️ Items:");

    let lines = cart.lines(catalog);
    for line in &lines {
        let _ = writeln!(
            out,
            "• {} ({}) x{} = {}₽",
            line.name(), line.product.volume, line.item.quantity, format_amount(line.line_total()),
        );
    }

    let totals = Totals::compute(lines_total(&lines), promo);
    match promo {
        Some(code) => {
            let _ = writeln!(out, "\n💰 Subtotal: {}₽", format_amount(totals.subtotal));
            let _ = writeln!(out, "🏷️ Discount: -{}₽", format_amount(totals.discount));
            let _ = write!(out, "💳 TOTAL: {}₽ (promo code {})", format_amount(totals.total), code.code);
        }
        None => {
            let _ = write!(out, "\n💰 TOTAL: {}₽", format_amount(totals.total));
        }
    }
    out
}
