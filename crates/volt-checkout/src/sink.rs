//! Payment sink boundary.
//!
//! The sink is the external capability that presents a payment sheet and
//! authorizes/charges a transaction. The coordinator only ever talks to this
//! trait, so tests and demos swap in fakes freely.

use std::time::Duration;

use async_trait::async_trait;

use crate::request::PaymentRequest;

/// Opaque authorization token returned by a successful presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentToken(String);

impl PaymentToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of presenting the payment sheet to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationOutcome {
    /// The user authorized the payment.
    Authorized(PaymentToken),
    /// The user dismissed the sheet without authorizing. Terminal and
    /// idempotent: repeated cancellation signals are no-ops.
    Cancelled,
    /// The sheet could not be presented.
    Failed(String),
}

/// Result of processing an authorized charge.
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeOutcome {
    /// The charge went through.
    Captured,
    /// The processor declined the charge.
    Declined(String),
}

/// External payment capability.
#[async_trait]
pub trait PaymentSink: Send + Sync {
    /// Whether the device can take payments at all.
    async fn is_available(&self) -> bool;

    /// Present the payment sheet and wait for the user's decision.
    async fn present_request(&self, request: &PaymentRequest) -> PresentationOutcome;

    /// Send an authorized charge to the processor.
    async fn process_charge(&self, token: PaymentToken) -> ChargeOutcome;
}

/// Demo sink: always available, authorizes immediately, and captures every
/// charge after a bounded delay standing in for the processor round-trip.
pub struct SimulatedSink {
    capture_delay: Duration,
}

impl SimulatedSink {
    /// Create a sink with the default 1.5 s capture delay.
    pub fn new() -> Self {
        Self {
            capture_delay: Duration::from_millis(1500),
        }
    }

    /// Override the capture delay (tests shorten it).
    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentSink for SimulatedSink {
    async fn is_available(&self) -> bool {
        true
    }

    async fn present_request(&self, _request: &PaymentRequest) -> PresentationOutcome {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        PresentationOutcome::Authorized(PaymentToken::new(format!("sim-{nanos:x}")))
    }

    async fn process_charge(&self, _token: PaymentToken) -> ChargeOutcome {
        tokio::time::sleep(self.capture_delay).await;
        ChargeOutcome::Captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PaymentConfig;

    #[tokio::test]
    async fn test_simulated_sink_authorizes_and_captures() {
        let sink = SimulatedSink::new().with_capture_delay(Duration::from_millis(1));
        assert!(sink.is_available().await);

        let request = PaymentRequest::build(&[], &PaymentConfig::default());
        let token = match sink.present_request(&request).await {
            PresentationOutcome::Authorized(token) => token,
            other => panic!("expected authorization, got {other:?}"),
        };
        assert!(token.as_str().starts_with("sim-"));

        assert_eq!(sink.process_charge(token).await, ChargeOutcome::Captured);
    }
}
