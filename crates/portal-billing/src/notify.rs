//! Host Notification
//!
//! Best-effort side channel that tells an opener window or extension host
//! about a completed payment. Failures are swallowed: notification never
//! affects the primary flow's outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// Cross-context messages sent to the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostEvent {
    PaymentSuccess,
}

/// Host notification channel (Strategy pattern)
#[async_trait]
pub trait HostNotifier: Send + Sync {
    /// Whether a host is present to receive messages
    fn is_available(&self) -> bool;

    /// Deliver one event. Callers treat any error as ignorable.
    async fn send(&self, event: &HostEvent) -> Result<()>;

    /// Channel name (for logging)
    fn name(&self) -> &str;
}

/// Notify every available channel that payment succeeded, swallowing
/// all failures.
pub async fn notify_payment_success(notifiers: &[std::sync::Arc<dyn HostNotifier>]) {
    for notifier in notifiers {
        if !notifier.is_available() {
            continue;
        }
        if let Err(e) = notifier.send(&HostEvent::PaymentSuccess).await {
            tracing::debug!(channel = notifier.name(), error = %e, "host notification failed");
        }
    }
}

/// Notifier for contexts with no host channel
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl HostNotifier for NoopNotifier {
    fn is_available(&self) -> bool {
        false
    }

    async fn send(&self, _: &HostEvent) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Posts events to an extension host bridge over HTTP
pub struct HttpHostNotifier {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpHostNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create from environment variables; unavailable when unset.
    pub fn from_env() -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: std::env::var("PORTAL_HOST_BRIDGE_URL").ok(),
        }
    }
}

#[async_trait]
impl HostNotifier for HttpHostNotifier {
    fn is_available(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn send(&self, event: &HostEvent) -> Result<()> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or_else(|| BillingError::Notify("no host bridge configured".into()))?;

        let response = self
            .http
            .post(endpoint)
            .json(event)
            .send()
            .await
            .map_err(|e| BillingError::Notify(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BillingError::Notify(format!("HTTP {}", response.status())));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "http-host-bridge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingNotifier {
        available: bool,
        fail: bool,
        sent: AtomicUsize,
    }

    #[async_trait]
    impl HostNotifier for CountingNotifier {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn send(&self, _: &HostEvent) -> Result<()> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(BillingError::Notify("boom".into()))
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_string(&HostEvent::PaymentSuccess).unwrap();
        assert_eq!(json, r#"{"type":"PAYMENT_SUCCESS"}"#);
    }

    #[tokio::test]
    async fn test_unavailable_channels_are_skipped() {
        let notifier = Arc::new(CountingNotifier {
            available: false,
            fail: false,
            sent: AtomicUsize::new(0),
        });
        notify_payment_success(&[notifier.clone() as Arc<dyn HostNotifier>]).await;
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let failing = Arc::new(CountingNotifier {
            available: true,
            fail: true,
            sent: AtomicUsize::new(0),
        });
        let healthy = Arc::new(CountingNotifier {
            available: true,
            fail: false,
            sent: AtomicUsize::new(0),
        });

        // Must not panic or short-circuit past the second channel.
        notify_payment_success(&[
            failing.clone() as Arc<dyn HostNotifier>,
            healthy.clone() as Arc<dyn HostNotifier>,
        ])
        .await;

        assert_eq!(failing.sent.load(Ordering::SeqCst), 1);
        assert_eq!(healthy.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_noop_notifier_is_unavailable() {
        assert!(!NoopNotifier.is_available());
        assert!(NoopNotifier.send(&HostEvent::PaymentSuccess).await.is_ok());
    }
}
