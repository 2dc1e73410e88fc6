//! Order types.
//!
//! An order is a frozen snapshot of the cart at checkout time. Everything but
//! the status is immutable after creation: line products keep their historical
//! name and price, and the total is computed once and never re-derived.

use crate::cart::CartLine;
use crate::ids::{OrderId, OrderLineId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed and confirmed.
    #[default]
    Confirmed,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::Confirmed | OrderStatus::Processing | OrderStatus::Shipped
        )
    }
}

/// A frozen snapshot of a cart line captured at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Unique line identifier.
    pub id: OrderLineId,
    /// Full product snapshot, preserving historical price and name.
    pub product: crate::catalog::Product,
    /// Quantity ordered.
    pub quantity: i64,
}

impl OrderLine {
    /// Snapshot a cart line.
    pub fn from_cart_line(line: &CartLine) -> Self {
        Self {
            id: OrderLineId::generate(),
            product: line.product.clone(),
            quantity: line.quantity,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Ordered lines.
    pub lines: Vec<OrderLine>,
    /// Total computed at creation time, frozen thereafter.
    pub total_price: Money,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Current status; the only mutable field.
    pub status: OrderStatus,
}

impl Order {
    /// Build an order from cart lines, computing the total and stamping the
    /// placement time.
    pub fn from_cart_lines(lines: &[CartLine]) -> Self {
        let currency = lines
            .first()
            .map(|l| l.product.price.currency)
            .unwrap_or(Currency::default());
        let total = Money::sum(lines.iter().map(CartLine::line_total), currency);
        Self {
            id: OrderId::generate(),
            lines: lines.iter().map(OrderLine::from_cart_line).collect(),
            total_price: total,
            placed_at: Utc::now(),
            status: OrderStatus::Confirmed,
        }
    }

    /// Total unit count across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Update the status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn line(id: &str, cents: i64, quantity: i64) -> CartLine {
        let product = Product::new(
            id,
            format!("Bike {id}"),
            "test bike",
            Money::new(cents, Currency::USD),
            "bicycle",
        );
        CartLine::new(product, quantity)
    }

    #[test]
    fn test_order_from_cart_lines() {
        let lines = vec![line("a", 1000, 2), line("b", 500, 1)];
        let order = Order::from_cart_lines(&lines);

        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total_price.amount_cents, 2500);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_order_lines_snapshot_products() {
        let lines = vec![line("a", 1000, 1)];
        let order = Order::from_cart_lines(&lines);

        assert_eq!(order.lines[0].product, lines[0].product);
        assert_eq!(order.lines[0].line_total().amount_cents, 1000);
    }

    #[test]
    fn test_status_transitions() {
        let mut order = Order::from_cart_lines(&[line("a", 1000, 1)]);
        assert!(order.status.can_cancel());

        order.set_status(OrderStatus::Shipped);
        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(!order.status.is_terminal());

        order.set_status(OrderStatus::Delivered);
        assert!(order.status.is_terminal());
        assert!(!order.status.can_cancel());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(OrderStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(OrderStatus::Cancelled.display_name(), "Cancelled");
    }

    #[test]
    fn test_serde_round_trip() {
        let order = Order::from_cart_lines(&[line("a", 1000, 2), line("b", 500, 1)]);
        let json = serde_json::to_string(&order).unwrap();
        let restored: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, order);
    }
}
