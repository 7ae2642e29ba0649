//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::{Product, ProductDraft, ValidProduct};
pub use order::{format_order, ChatTarget, ContactMethod, CustomerProfile};
pub use cart::{lines_total, AddOutcome, Cart, CartItem, CartLine};
