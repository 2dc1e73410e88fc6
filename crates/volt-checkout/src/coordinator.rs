//! Checkout coordinator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use volt_commerce::{CartLine, Order};
use volt_store::{CartStore, OrdersStore};

use crate::error::CheckoutError;
use crate::request::{PaymentConfig, PaymentRequest};
use crate::sink::{ChargeOutcome, PaymentSink, PresentationOutcome};

/// Terminal result of a payment flow.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The charge was captured: the order is placed and the cart is empty.
    Success(Order),
    /// The user dismissed the payment sheet. No store was touched.
    Cancelled,
    /// Presentation or charge processing failed. No store was touched.
    Failed(String),
}

/// Flow states, traced as a payment advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    RequestBuilt,
    Presented,
    Authorized,
    Processing,
    Completed,
}

impl FlowState {
    fn as_str(&self) -> &'static str {
        match self {
            FlowState::RequestBuilt => "request_built",
            FlowState::Presented => "presented",
            FlowState::Authorized => "authorized",
            FlowState::Processing => "processing",
            FlowState::Completed => "completed",
        }
    }
}

/// Clears the in-flight flag on every exit path.
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives the payment flow and, on success, the cart-to-order transition.
///
/// One flow may be in flight at a time across the process. UIs should disable
/// the initiating control while [`CheckoutCoordinator::is_processing`] is
/// true; a second call during an active flow is rejected with
/// [`CheckoutError::AlreadyProcessing`] rather than queued.
pub struct CheckoutCoordinator {
    cart: Arc<CartStore>,
    orders: Arc<OrdersStore>,
    sink: Arc<dyn PaymentSink>,
    config: PaymentConfig,
    charge_timeout: Option<Duration>,
    processing: AtomicBool,
}

impl CheckoutCoordinator {
    /// Create a coordinator over the given stores and payment sink.
    pub fn new(
        cart: Arc<CartStore>,
        orders: Arc<OrdersStore>,
        sink: Arc<dyn PaymentSink>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            cart,
            orders,
            sink,
            config,
            charge_timeout: None,
            processing: AtomicBool::new(false),
        }
    }

    /// Bound the charge-processing step. An elapsed timeout completes the
    /// flow as `Failed` with no store mutation, same as a declined charge.
    pub fn with_charge_timeout(mut self, limit: Duration) -> Self {
        self.charge_timeout = Some(limit);
        self
    }

    /// Whether a flow is currently in flight.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Human-readable readiness string for the UI.
    pub async fn availability_status(&self) -> &'static str {
        if self.sink.is_available().await {
            "Ready"
        } else {
            "Payment is not supported on this device"
        }
    }

    /// Start a payment flow over the cart's current lines.
    pub async fn start_payment_from_cart(&self) -> Result<CheckoutOutcome, CheckoutError> {
        self.start_payment(self.cart.lines()).await
    }

    /// Start a payment flow over an explicit line set.
    ///
    /// Preconditions are checked before any request is built: a flow already
    /// in flight, an unavailable sink, or an empty line set each fail
    /// synchronously. Flow outcomes come back as [`CheckoutOutcome`]; only
    /// `Success` mutates the stores.
    pub async fn start_payment(
        &self,
        lines: Vec<CartLine>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if self.processing.swap(true, Ordering::SeqCst) {
            return Err(CheckoutError::AlreadyProcessing);
        }
        let _guard = ProcessingGuard(&self.processing);

        if !self.sink.is_available().await {
            return Err(CheckoutError::PaymentUnavailable);
        }
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let request = PaymentRequest::build(&lines, &self.config);
        self.trace(FlowState::RequestBuilt);

        self.trace(FlowState::Presented);
        let outcome = match self.sink.present_request(&request).await {
            PresentationOutcome::Authorized(token) => {
                self.trace(FlowState::Authorized);
                self.trace(FlowState::Processing);
                match self.charge(token).await {
                    ChargeOutcome::Captured => {
                        // No await point between these two calls: observers
                        // never see the order placed with the cart still full.
                        let order = self.orders.place_order(&lines);
                        self.cart.clear();
                        tracing::info!(order_id = %order.id, total = %order.total_price, "checkout completed");
                        CheckoutOutcome::Success(order)
                    }
                    ChargeOutcome::Declined(reason) => CheckoutOutcome::Failed(reason),
                }
            }
            PresentationOutcome::Cancelled => CheckoutOutcome::Cancelled,
            PresentationOutcome::Failed(err) => CheckoutOutcome::Failed(err),
        };
        self.trace(FlowState::Completed);

        Ok(outcome)
    }

    async fn charge(&self, token: crate::sink::PaymentToken) -> ChargeOutcome {
        match self.charge_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.sink.process_charge(token)).await
            {
                Ok(outcome) => outcome,
                Err(_) => ChargeOutcome::Declined("payment processing timed out".to_string()),
            },
            None => self.sink.process_charge(token).await,
        }
    }

    fn trace(&self, state: FlowState) {
        tracing::debug!(state = state.as_str(), "payment flow advanced");
    }
}
