//! The cart store: the single cart instance plus its drawer state.
//!
//! Wraps the pure [`Cart`] model with persistence. Every mutation that
//! changes the cart is written through [`CartPersistence`] before the method
//! returns; callers then re-render the drawer from [`CartStore::cart`].
//! A failed write is returned to the caller. The in-memory change is kept,
//! so the storefront can log it and carry on while the CLI reports it.

use black_royalty_core::{Cart, CartLineItem, Price, Product, ProductId, Quantity};

use crate::storage::{CartPersistence, StorageError};

/// Whether the cart drawer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

impl DrawerState {
    /// `true` when open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Process-wide cart state.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    drawer: DrawerState,
    persistence: CartPersistence,
}

impl CartStore {
    /// Rehydrate the cart from storage. The drawer starts closed.
    #[must_use]
    pub fn restore(persistence: CartPersistence) -> Self {
        let cart = persistence.load();
        Self {
            cart,
            drawer: DrawerState::Closed,
            persistence,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current drawer state.
    #[must_use]
    pub const fn drawer(&self) -> DrawerState {
        self.drawer
    }

    /// Add a line (merging with an existing line of the same id) and open
    /// the drawer.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be written. The line is still
    /// added and the drawer still opens.
    pub fn add(&mut self, item: CartLineItem) -> Result<(), StorageError> {
        tracing::info!(product_id = %item.id, quantity = %item.quantity, "Adding to cart");
        self.cart.add(item);
        self.drawer = DrawerState::Open;
        self.persist()
    }

    /// Snapshot `product` and add `quantity` of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be written.
    pub fn add_product(
        &mut self,
        product: &Product,
        quantity: Quantity,
    ) -> Result<(), StorageError> {
        self.add(CartLineItem::from_product(product, quantity))
    }

    /// Apply a quantity delta. Lines reaching zero are removed; missing ids
    /// are ignored. Returns whether the cart changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed cart could not be written.
    pub fn set_quantity(&mut self, id: &ProductId, delta: i64) -> Result<bool, StorageError> {
        let changed = self.cart.set_quantity(id, delta);
        if changed {
            self.persist()?;
        } else {
            tracing::debug!(product_id = %id, "Quantity change for item not in cart");
        }
        Ok(changed)
    }

    /// Increase a line's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed cart could not be written.
    pub fn increase(&mut self, id: &ProductId) -> Result<bool, StorageError> {
        self.set_quantity(id, 1)
    }

    /// Decrease a line's quantity by one, removing it at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed cart could not be written.
    pub fn decrease(&mut self, id: &ProductId) -> Result<bool, StorageError> {
        self.set_quantity(id, -1)
    }

    /// Remove a line. Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed cart could not be written.
    pub fn remove(&mut self, id: &ProductId) -> Result<bool, StorageError> {
        let removed = self.cart.remove(id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Open the drawer.
    pub const fn open(&mut self) {
        self.drawer = DrawerState::Open;
    }

    /// Close the drawer.
    pub const fn close(&mut self) {
        self.drawer = DrawerState::Closed;
    }

    /// Cart total.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.persistence.save(&self.cart)
    }
}
