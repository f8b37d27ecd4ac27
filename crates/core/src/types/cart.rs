//! The shopping cart model.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s in insertion order.
//! Two invariants hold after every operation:
//!
//! - no two lines share a product id
//! - every line has a quantity of at least one
//!
//! Lines are snapshots of the product taken when it was added; later catalog
//! edits do not change what is already in the cart.
//!
//! Operations on missing ids are silent no-ops. Totals are recomputed on every
//! call rather than tracked incrementally.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;
use crate::types::product::Product;
use crate::types::quantity::Quantity;

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price at the time the product was added.
    pub price: Price,
    pub image: String,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Snapshot a catalog product as a cart line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopping cart.
///
/// Serializes as a plain JSON array of line items. Deserializing merges
/// duplicate ids so that stored data can never break the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a line item.
    ///
    /// If a line with the same id exists its quantity grows by
    /// `item.quantity`; otherwise the item is appended.
    pub fn add(&mut self, item: CartLineItem) {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Change the quantity of a line by `delta`.
    ///
    /// Missing ids are ignored. A resulting quantity of zero or less removes
    /// the line. Returns whether the cart changed.
    pub fn set_quantity(&mut self, id: &ProductId, delta: i64) -> bool {
        let Some(index) = self.items.iter().position(|line| &line.id == id) else {
            return false;
        };
        let next = self
            .items
            .get(index)
            .and_then(|line| line.quantity.checked_offset(delta));
        match next {
            Some(quantity) => {
                if let Some(line) = self.items.get_mut(index) {
                    line.quantity = quantity;
                }
            }
            None => {
                self.items.remove(index);
            }
        }
        true
    }

    /// Remove the line with `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.id != id);
        self.items.len() != before
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn line(id: &str, price: u64, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: Price::from_minor(price),
            image: format!("img/{id}.jpg"),
            quantity: Quantity::new(quantity).unwrap(),
        }
    }

    #[test]
    fn test_add_same_id_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(line("p1", 1000, 1));
        cart.add(line("p1", 1000, 2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"p1".into()).unwrap().quantity.get(), 3);
        assert_eq!(cart.total(), Price::from_minor(3000));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add(line("p1", 1000, 1));
        let mut repriced = line("p1", 9999, 1);
        repriced.name = "Renamed".to_string();
        cart.add(repriced);

        let item = cart.get(&"p1".into()).unwrap();
        assert_eq!(item.price, Price::from_minor(1000));
        assert_eq!(item.name, "Product p1");
    }

    #[test]
    fn test_insertion_order() {
        let mut cart = Cart::new();
        cart.add(line("b", 1, 1));
        cart.add(line("a", 1, 1));
        cart.add(line("b", 1, 1));

        let ids: Vec<&str> = cart.items().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_decrement_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(line("p1", 500, 1));

        assert!(cart.set_quantity(&"p1".into(), -1));
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_set_quantity_by_negative_quantity_removes() {
        let mut cart = Cart::new();
        cart.add(line("p1", 500, 4));
        cart.add(line("p2", 500, 1));

        assert!(cart.set_quantity(&"p1".into(), -4));
        assert!(cart.get(&"p1".into()).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_updates_in_place() {
        let mut cart = Cart::new();
        cart.add(line("p1", 500, 2));
        cart.add(line("p2", 700, 1));

        cart.set_quantity(&"p1".into(), 1);
        cart.set_quantity(&"p2".into(), 2);

        assert_eq!(cart.items()[0].quantity.get(), 3);
        assert_eq!(cart.items()[1].quantity.get(), 3);
        assert_eq!(cart.total(), Price::from_minor(3600));
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add(line("p1", 500, 1));
        let before = cart.clone();

        assert!(!cart.set_quantity(&"missing".into(), -1));
        assert!(!cart.remove(&"missing".into()));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(line("p1", 500, 3));
        cart.add(line("p2", 200, 1));

        assert!(cart.remove(&"p1".into()));
        assert_eq!(cart.total(), Price::from_minor(200));
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_empty_total_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut cart = Cart::new();
        cart.add(line("p1", 1000, 2));

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "p1");
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[0]["price"], 1000);
    }

    #[test]
    fn test_deserialize_merges_duplicates() {
        let json = r#"[
            {"id": "p1", "name": "A", "price": 100, "image": "a.jpg", "quantity": 1},
            {"id": "p2", "name": "B", "price": 200, "image": "b.jpg", "quantity": 1},
            {"id": "p1", "name": "A", "price": 100, "image": "a.jpg", "quantity": 2}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(&"p1".into()).unwrap().quantity.get(), 3);
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"[{"id": "p1", "name": "A", "price": 100, "image": "a.jpg", "quantity": 0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, u32),
        SetQuantity(u8, i64),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..5, 1u32..5).prop_map(|(id, qty)| Op::Add(id, qty)),
            (0u8..5, -6i64..6).prop_map(|(id, delta)| Op::SetQuantity(id, delta)),
            (0u8..5).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_any_sequence(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut cart = Cart::new();
            for op in ops {
                match op {
                    Op::Add(id, qty) => cart.add(line(&format!("p{id}"), 250, qty)),
                    Op::SetQuantity(id, delta) => {
                        cart.set_quantity(&ProductId::new(format!("p{id}")), delta);
                    }
                    Op::Remove(id) => {
                        cart.remove(&ProductId::new(format!("p{id}")));
                    }
                }

                let ids: HashSet<&ProductId> = cart.items().iter().map(|l| &l.id).collect();
                prop_assert_eq!(ids.len(), cart.len());
                prop_assert!(cart.items().iter().all(|l| l.quantity.get() >= 1));

                let expected: u64 = cart
                    .items()
                    .iter()
                    .map(|l| l.price.minor_units() * u64::from(l.quantity.get()))
                    .sum();
                prop_assert_eq!(cart.total().minor_units(), expected);
            }
        }

        #[test]
        fn prop_json_round_trip(quantities in prop::collection::vec(1u32..20, 0..8)) {
            let mut cart = Cart::new();
            for (i, qty) in quantities.iter().enumerate() {
                cart.add(line(&format!("p{i}"), 100 * (i as u64 + 1), *qty));
            }
            let json = serde_json::to_string(&cart).unwrap();
            let restored: Cart = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(restored, cart);
        }
    }
}
