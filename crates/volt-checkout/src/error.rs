//! Checkout error types.

use thiserror::Error;

/// Precondition failures, surfaced before any payment UI is presented.
///
/// Flow outcomes (cancellation, a declined charge) are not errors; they come
/// back as [`crate::CheckoutOutcome`] variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to pay for.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// The payment capability is not present on this device.
    #[error("Payment is not available on this device.")]
    PaymentUnavailable,

    /// Another payment flow is already in flight.
    #[error("A payment is already in progress.")]
    AlreadyProcessing,
}
