//! Shopping cart and cart line types.

use crate::catalog::Product;
use crate::ids::{CartLineId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One product + quantity entry in the cart.
///
/// The product is copied in by value: later catalog edits never change what a
/// line already holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Line-level identifier, distinct from the product id.
    pub id: CartLineId,
    /// Snapshot of the product at the time it was added.
    pub product: Product,
    /// Units of the product, always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Create a new line for a product.
    pub fn new(product: Product, quantity: i64) -> Self {
        Self {
            id: CartLineId::generate(),
            product,
            quantity,
        }
    }

    /// Unit price times quantity, recomputed on every call.
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// The shopping cart: an ordered list of lines, at most one per product id.
///
/// Mutations report whether anything actually changed; callers use that to
/// decide whether a save is worth queueing. Operations on absent products are
/// silent no-ops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, merging into an existing line when one holds the same
    /// product id. Quantities <= 0 are ignored.
    pub fn add(&mut self, product: &Product, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine::new(product.clone(), quantity));
        }
        true
    }

    /// Remove the line holding a product, if any.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product.id != product_id);
        self.lines.len() < before
    }

    /// Set the quantity for a product's line.
    ///
    /// A quantity <= 0 removes the line; an absent product is a no-op.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        match self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.lines.clear();
        true
    }

    /// Quantity held for a product, 0 if absent.
    pub fn quantity(&self, product_id: &ProductId) -> i64 {
        self.lines
            .iter()
            .find(|l| &l.product.id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total unit count across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, recomputed on every call (never cached).
    pub fn total_price(&self) -> Money {
        let currency = self
            .lines
            .first()
            .map(|l| l.product.price.currency)
            .unwrap_or(Currency::default());
        Money::sum(self.lines.iter().map(CartLine::line_total), currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(
            id,
            format!("Bike {id}"),
            "test bike",
            Money::new(cents, Currency::USD),
            "bicycle",
        )
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        let bike = product("evoque-atom", 199900);

        assert!(cart.add(&bike, 1));
        assert!(cart.add(&bike, 2));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity(&bike.id), 3);
    }

    #[test]
    fn test_add_ignores_non_positive_quantity() {
        let mut cart = Cart::new();
        let bike = product("evoque-atom", 199900);

        assert!(!cart.add(&bike, 0));
        assert!(!cart.add(&bike, -2));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let bike = product("urban-cruiser", 129900);
        cart.add(&bike, 2);

        assert!(cart.set_quantity(&bike.id, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        let bike = product("urban-cruiser", 129900);
        cart.add(&bike, 2);

        assert!(cart.set_quantity(&bike.id, -1));
        assert_eq!(cart.quantity(&bike.id), 0);
    }

    #[test]
    fn test_set_quantity_for_absent_product_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.set_quantity(&ProductId::new("missing"), 3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price() {
        let mut cart = Cart::new();
        let a = product("a", 1000); // $10
        let b = product("b", 500); // $5
        cart.add(&a, 2);
        cart.add(&b, 1);

        assert_eq!(cart.total_price().amount_cents, 2500);

        cart.remove(&a.id);
        assert_eq!(cart.total_price().amount_cents, 500);
    }

    #[test]
    fn test_total_price_is_recomputed() {
        let mut cart = Cart::new();
        let a = product("a", 1000);
        cart.add(&a, 1);
        assert_eq!(cart.total_price().amount_cents, 1000);

        cart.set_quantity(&a.id, 4);
        assert_eq!(cart.total_price().amount_cents, 4000);
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(&ProductId::new("missing")));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000), 1);

        assert!(cart.clear());
        assert!(cart.is_empty());
        assert!(!cart.clear());
    }

    #[test]
    fn test_line_keeps_product_snapshot() {
        let mut cart = Cart::new();
        let bike = product("a", 1000);
        cart.add(&bike, 1);

        // The cart holds its own copy of the product.
        let line = &cart.lines()[0];
        assert_eq!(line.product, bike);
        assert_ne!(line.id.as_str(), bike.id.as_str());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000), 2);
        cart.add(&product("b", 500), 1);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
