//! Payment flow and order placement for Volt Cycles.
//!
//! The [`CheckoutCoordinator`] drives one payment flow at a time: it builds a
//! [`PaymentRequest`] summary from the cart lines, hands it to an injected
//! [`PaymentSink`], and on a captured charge converts the lines into an order
//! and empties the cart. Cancelled or failed flows leave every store exactly
//! as they found it.
//!
//! ```rust,ignore
//! let coordinator = CheckoutCoordinator::new(
//!     stores.cart.clone(),
//!     stores.orders.clone(),
//!     Arc::new(SimulatedSink::default()),
//!     PaymentConfig::default(),
//! );
//!
//! match coordinator.start_payment_from_cart().await? {
//!     CheckoutOutcome::Success(order) => println!("placed {}", order.id),
//!     CheckoutOutcome::Cancelled => {}
//!     CheckoutOutcome::Failed(reason) => eprintln!("{reason}"),
//! }
//! ```

mod coordinator;
mod error;
mod request;
mod sink;

pub use coordinator::{CheckoutCoordinator, CheckoutOutcome};
pub use error::CheckoutError;
pub use request::{PaymentConfig, PaymentNetwork, PaymentRequest, SummaryItem};
pub use sink::{ChargeOutcome, PaymentSink, PaymentToken, PresentationOutcome, SimulatedSink};
