//! Catalog documents.
//!
//! These mirror `content/products.json`, which is supplied by the content
//! editors and treated as read-only:
//!
//! ```json
//! { "products": [ { "id": "p1", "name": "...", "description": "...",
//!                   "price": 2500000, "image": "img/p1.jpg", "in_stock": true } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub image: String,
    /// Missing means out of stock.
    #[serde(default)]
    pub in_stock: bool,
    /// Additional gallery images shown after `image` on the detail page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Product {
    /// All gallery images, starting with the main image.
    pub fn gallery(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image.as_str()).chain(self.images.iter().map(String::as_str))
    }
}

/// The `products.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a list of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Find a product by id (linear scan; catalogs are small).
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
