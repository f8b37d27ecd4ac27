//! Core types for the Black Royalty storefront.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;
pub mod settings;

pub use cart::{Cart, CartLineItem};
pub use id::ProductId;
pub use price::{CurrencyCode, Price};
pub use product::{Catalog, Product};
pub use quantity::{Quantity, QuantityError};
pub use settings::SiteSettings;
