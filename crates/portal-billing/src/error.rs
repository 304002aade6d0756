//! Billing Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, BillingError>;

/// Billing-related errors
#[derive(Error, Debug)]
pub enum BillingError {
    /// Checkout requested for the free tier
    #[error("The free tier has no checkout: {0}")]
    FreeTierCheckout(String),

    /// Checkout requires an authenticated session
    #[error("Checkout requires sign-in")]
    CheckoutUnauthenticated,

    /// Host notification failed (always swallowed by callers)
    #[error("Host notification failed: {0}")]
    Notify(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BillingError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            BillingError::FreeTierCheckout(_) => "This plan does not require checkout.",
            BillingError::CheckoutUnauthenticated => "Please sign in to subscribe.",
            _ => "An error occurred processing your request.",
        }
    }
}
