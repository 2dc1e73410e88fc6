//! Payment request summaries.
//!
//! The request is what the payment sheet renders: one row per cart line, a
//! shipping row, an estimated-tax row, and a final total labeled with the
//! merchant's display name.

use volt_commerce::{CartLine, Currency, Money, ShippingMethod};

/// Card networks accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

impl PaymentNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentNetwork::Visa => "visa",
            PaymentNetwork::Mastercard => "mastercard",
            PaymentNetwork::Amex => "amex",
            PaymentNetwork::Discover => "discover",
        }
    }
}

/// Static merchant configuration for building payment requests.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfig {
    /// Merchant identifier registered with the payment network.
    pub merchant_id: String,
    /// Name shown on the final total row.
    pub display_name: String,
    /// ISO country code of the merchant.
    pub country_code: String,
    /// Currency all summary rows are denominated in.
    pub currency: Currency,
    /// Sales tax estimate, in percent of the subtotal.
    pub tax_rate_percent: f64,
    /// Accepted card networks.
    pub supported_networks: Vec<PaymentNetwork>,
    /// Offered delivery tiers; the first one is preselected.
    pub shipping_methods: Vec<ShippingMethod>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            merchant_id: "merchant.com.voltcycles.store".to_string(),
            display_name: "Volt Cycles".to_string(),
            country_code: "US".to_string(),
            currency: Currency::USD,
            tax_rate_percent: 8.0,
            supported_networks: vec![
                PaymentNetwork::Visa,
                PaymentNetwork::Mastercard,
                PaymentNetwork::Amex,
                PaymentNetwork::Discover,
            ],
            shipping_methods: ShippingMethod::delivery_tiers(),
        }
    }
}

/// One row in the payment sheet summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryItem {
    /// Row label, e.g. `"Lightning Bolt x2"`.
    pub label: String,
    /// Row amount.
    pub amount: Money,
}

/// A payment request ready to hand to the sink.
///
/// Summary rows are, in order: one per cart line, `"Shipping"`,
/// `"Estimated Tax"`, and the final total labeled with the merchant name.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Merchant identifier.
    pub merchant_id: String,
    /// Merchant country code.
    pub country_code: String,
    /// Request currency.
    pub currency: Currency,
    /// Accepted card networks.
    pub supported_networks: Vec<PaymentNetwork>,
    /// Delivery tiers the user may pick from mid-flow.
    pub shipping_methods: Vec<ShippingMethod>,
    summary_items: Vec<SummaryItem>,
    subtotal: Money,
    tax: Money,
    shipping_rate: Money,
}

impl PaymentRequest {
    /// Build the summary for a set of cart lines.
    ///
    /// Lines with quantity > 1 are labeled `"Name xN"`; the preselected
    /// shipping tier is the first configured one; tax is a percentage of the
    /// item subtotal; the total is subtotal + shipping + tax.
    pub fn build(lines: &[CartLine], config: &PaymentConfig) -> Self {
        let currency = config.currency;

        let mut summary_items: Vec<SummaryItem> = lines
            .iter()
            .map(|line| {
                let label = if line.quantity > 1 {
                    format!("{} x{}", line.product.name, line.quantity)
                } else {
                    line.product.name.clone()
                };
                SummaryItem {
                    label,
                    amount: line.line_total(),
                }
            })
            .collect();

        let subtotal = Money::sum(lines.iter().map(CartLine::line_total), currency);
        let shipping_rate = config
            .shipping_methods
            .first()
            .map(|m| m.price)
            .unwrap_or_else(|| Money::zero(currency));
        let tax = subtotal.percentage(config.tax_rate_percent);
        let total = Money::sum([subtotal, shipping_rate, tax], currency);

        summary_items.push(SummaryItem {
            label: "Shipping".to_string(),
            amount: shipping_rate,
        });
        summary_items.push(SummaryItem {
            label: "Estimated Tax".to_string(),
            amount: tax,
        });
        summary_items.push(SummaryItem {
            label: config.display_name.clone(),
            amount: total,
        });

        Self {
            merchant_id: config.merchant_id.clone(),
            country_code: config.country_code.clone(),
            currency,
            supported_networks: config.supported_networks.clone(),
            shipping_methods: config.shipping_methods.clone(),
            summary_items,
            subtotal,
            tax,
            shipping_rate,
        }
    }

    /// Re-price the request for a newly selected shipping method.
    ///
    /// Only the final total row is replaced (subtotal + new shipping + tax);
    /// every other row stays exactly as first displayed. Unknown method ids
    /// are a no-op.
    pub fn select_shipping(&mut self, method_id: &str) -> bool {
        let Some(method) = self.shipping_methods.iter().find(|m| m.id == method_id) else {
            return false;
        };
        self.shipping_rate = method.price;
        let total = Money::sum([self.subtotal, self.shipping_rate, self.tax], self.currency);
        if let Some(total_row) = self.summary_items.last_mut() {
            total_row.amount = total;
        }
        true
    }

    /// All summary rows, in display order.
    pub fn summary_items(&self) -> &[SummaryItem] {
        &self.summary_items
    }

    /// The item subtotal.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// The estimated tax row amount.
    pub fn tax(&self) -> Money {
        self.tax
    }

    /// The currently selected shipping rate.
    pub fn shipping_rate(&self) -> Money {
        self.shipping_rate
    }

    /// The final total row amount.
    pub fn total(&self) -> Money {
        self.summary_items
            .last()
            .map(|row| row.amount)
            .unwrap_or_else(|| Money::zero(self.currency))
    }
}
