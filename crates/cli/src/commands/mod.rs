//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod content;

use black_royalty_storefront::checkout::CheckoutError;
use black_royalty_storefront::content::ContentError;
use black_royalty_storefront::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A content document could not be loaded.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Checkout refused.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The product cannot be ordered.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// The product id is not in the cart.
    #[error("Not in cart: {0}")]
    NotInCart(String),
}
