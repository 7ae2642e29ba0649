//! Application layer: the storefront and admin panel over an injected store.
pub mod admin;
pub mod catalog;
pub mod notice;
pub mod storefront;

pub use admin::{AdminPanel, IdAllocator};
pub use catalog::CatalogStore;
pub use notice::{Notice, NoticeLevel, Notices};
pub use storefront::Storefront;
