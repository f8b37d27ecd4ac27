//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! br-cli cart show
//! br-cli cart add royal-oud -q 2
//! br-cli cart increase royal-oud
//! br-cli cart decrease royal-oud
//! br-cli cart remove royal-oud
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATA_DIR` - Directory holding the persisted cart
//! - `STOREFRONT_CONTENT_URL` / `STOREFRONT_CONTENT_DIR` - Catalog source for `add`

use std::sync::Arc;

use black_royalty_core::{ProductId, Quantity};
use black_royalty_storefront::{
    cart::CartStore,
    config::StorefrontConfig,
    content::ContentLoader,
    storage::{CartPersistence, FileStore},
};

use super::CommandError;

/// Open the cart persisted under the configured data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_store(config: &StorefrontConfig) -> Result<CartStore, CommandError> {
    let store = FileStore::open(&config.data_dir)?;
    Ok(CartStore::restore(CartPersistence::new(Arc::new(store))))
}

/// Add `quantity` of a catalog product.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the id is unknown, the
/// product is out of stock or the cart cannot be written.
pub async fn add(
    store: &mut CartStore,
    loader: &ContentLoader,
    id: &ProductId,
    quantity: Quantity,
) -> Result<(), CommandError> {
    let product = loader
        .find_product(id)
        .await?
        .ok_or_else(|| CommandError::UnknownProduct(id.to_string()))?;
    if !product.in_stock {
        return Err(CommandError::OutOfStock(product.name));
    }

    store.add_product(&product, quantity)?;
    Ok(())
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns [`CommandError::NotInCart`] if the id has no line, or a storage
/// error if the cart cannot be written.
pub fn adjust(store: &mut CartStore, id: &ProductId, delta: i64) -> Result<(), CommandError> {
    if store.set_quantity(id, delta)? {
        Ok(())
    } else {
        Err(CommandError::NotInCart(id.to_string()))
    }
}

/// Remove a line.
///
/// # Errors
///
/// Returns [`CommandError::NotInCart`] if the id has no line, or a storage
/// error if the cart cannot be written.
pub fn remove(store: &mut CartStore, id: &ProductId) -> Result<(), CommandError> {
    if store.remove(id)? {
        Ok(())
    } else {
        Err(CommandError::NotInCart(id.to_string()))
    }
}

/// Render the cart as plain text.
#[must_use]
pub fn format_cart(store: &CartStore) -> String {
    let cart = store.cart();
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        out.push_str(&format!(
            "{:<24} {:>4} x {:>14} = {:>16}\n",
            item.id.as_str(),
            item.quantity.get(),
            item.price.display(),
            item.line_total().display_fixed()
        ));
    }
    out.push_str(&format!(
        "{} item(s), total {}",
        store.count(),
        store.total().display_fixed()
    ));
    out
}

/// Print the cart.
#[allow(clippy::print_stdout)]
pub fn show(store: &CartStore) {
    println!("{}", format_cart(store));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use black_royalty_core::{Price, Product};

    use super::*;

    fn store(dir: &std::path::Path) -> CartStore {
        let store = FileStore::open(dir).unwrap();
        CartStore::restore(CartPersistence::new(Arc::new(store)))
    }

    fn product(id: &str, price: u64) -> Product {
        Product {
            id: ProductId::from(id),
            name: id.to_string(),
            description: String::new(),
            price: Price::from_minor(price),
            image: String::new(),
            in_stock: true,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_adjust_and_remove_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = store(dir.path());
        cart.add_product(&product("oud", 2_500_000), Quantity::ONE).unwrap();

        adjust(&mut cart, &ProductId::from("oud"), 1).unwrap();
        assert_eq!(store(dir.path()).count(), 2);

        remove(&mut cart, &ProductId::from("oud")).unwrap();
        assert!(store(dir.path()).cart().is_empty());
    }

    #[test]
    fn test_missing_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = store(dir.path());
        assert!(matches!(
            adjust(&mut cart, &ProductId::from("ghost"), -1),
            Err(CommandError::NotInCart(_))
        ));
        assert!(matches!(
            remove(&mut cart, &ProductId::from("ghost")),
            Err(CommandError::NotInCart(_))
        ));
    }

    #[test]
    fn test_failed_write_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = store(dir.path());
        cart.add_product(&product("oud", 2_500_000), Quantity::ONE).unwrap();

        // A directory where the temp file goes makes every write fail.
        std::fs::create_dir(dir.path().join("blackRoyaltyCart.json.tmp")).unwrap();

        assert!(matches!(
            adjust(&mut cart, &ProductId::from("oud"), 1),
            Err(CommandError::Storage(_))
        ));
        assert!(matches!(
            remove(&mut cart, &ProductId::from("oud")),
            Err(CommandError::Storage(_))
        ));
        assert_eq!(store(dir.path()).count(), 1);
    }

    #[test]
    fn test_format_cart() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = store(dir.path());
        assert_eq!(format_cart(&cart), "Your cart is empty.");

        cart.add_product(&product("oud", 2_500_000), Quantity::new(2).unwrap()).unwrap();
        let text = format_cart(&cart);
        assert!(text.contains("oud"));
        assert!(text.ends_with("2 item(s), total ₦50,000.00"));
    }
}
