//! Storefront domain: aggregates, value objects and pure services.
pub mod aggregates;
pub mod services;
pub mod value_objects;
