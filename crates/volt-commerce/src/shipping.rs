//! Shipping method types.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shipping method option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Stable identifier (e.g., "standard").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Delivery detail shown under the name.
    pub detail: String,
    /// Shipping cost.
    pub price: Money,
    /// Minimum delivery days.
    pub min_delivery_days: Option<u32>,
    /// Maximum delivery days.
    pub max_delivery_days: Option<u32>,
}

impl ShippingMethod {
    /// Create a new shipping method.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        detail: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            detail: detail.into(),
            price,
            min_delivery_days: None,
            max_delivery_days: None,
        }
    }

    /// Set the delivery window in business days.
    pub fn with_delivery_days(mut self, min: u32, max: u32) -> Self {
        self.min_delivery_days = Some(min);
        self.max_delivery_days = Some(max);
        self
    }

    /// Get a delivery estimate string.
    pub fn delivery_estimate(&self) -> Option<String> {
        match (self.min_delivery_days, self.max_delivery_days) {
            (Some(min), Some(max)) if min == max => Some(format!("{} days", min)),
            (Some(min), Some(max)) => Some(format!("{}-{} days", min, max)),
            (Some(min), None) => Some(format!("{}+ days", min)),
            (None, Some(max)) => Some(format!("Up to {} days", max)),
            (None, None) => None,
        }
    }

    /// Check if this is free shipping.
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    /// The storefront's fixed delivery tiers.
    pub fn delivery_tiers() -> Vec<ShippingMethod> {
        vec![
            ShippingMethod::new(
                "standard",
                "Standard Delivery",
                "Delivery in 5-7 business days",
                Money::zero(Currency::USD),
            )
            .with_delivery_days(5, 7),
            ShippingMethod::new(
                "express",
                "Express Delivery",
                "Delivery in 2-3 business days",
                Money::new(4999, Currency::USD),
            )
            .with_delivery_days(2, 3),
            ShippingMethod::new(
                "premium",
                "Premium Delivery",
                "Next business day delivery",
                Money::new(9999, Currency::USD),
            )
            .with_delivery_days(1, 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_estimate() {
        let method = ShippingMethod::new(
            "express",
            "Express Delivery",
            "Delivery in 2-3 business days",
            Money::new(4999, Currency::USD),
        )
        .with_delivery_days(2, 3);

        assert_eq!(method.delivery_estimate(), Some("2-3 days".to_string()));
        assert!(!method.is_free());
    }

    #[test]
    fn test_fixed_tiers() {
        let tiers = ShippingMethod::delivery_tiers();
        assert_eq!(tiers.len(), 3);

        let standard = &tiers[0];
        assert_eq!(standard.id, "standard");
        assert!(standard.is_free());

        let premium = &tiers[2];
        assert_eq!(premium.price.amount_cents, 9999);
        assert_eq!(premium.delivery_estimate(), Some("1 days".to_string()));
    }
}
