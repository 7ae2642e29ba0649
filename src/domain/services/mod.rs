//! Pure catalog and pricing services.
pub mod filter;
pub mod promo;

pub use filter::{brands, categories, filter, FilterCriteria};
pub use promo::{calculate_discount, PromoCode, PromoKind, Totals};
