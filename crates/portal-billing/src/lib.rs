//! # portal-billing
//!
//! Checkout links, payment confirmation, and host notification for the
//! extension portal.
//!
//! ## Checkout flow
//!
//! Checkout itself is hosted by the payment provider; this crate only builds
//! the redirect URL and interprets the aftermath.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  Pricing    │────▶│  Hosted Checkout │────▶│ /payment-success │
//! │  page       │     │  (external)      │     │  (confirmation)  │
//! └─────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! The redirect carries the signed-in user's email and id as checkout
//! parameters; completion is observed only through the success page, which
//! re-reads the quota service for the confirmed plan and order id. The
//! payment is assumed committed upstream, so a failed confirmation lookup
//! degrades to a soft "details unavailable" message, never an error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use portal_billing::{checkout_url, confirm, SuccessParams};
//!
//! let url = checkout_url(tier, &session)?;
//! // Redirect the user to `url` in a new browsing context.
//!
//! // Later, on the success page:
//! let outcome = confirm(identity.as_ref(), quota.as_ref(), &params).await;
//! ```

mod checkout;
mod confirmation;
mod error;
mod notify;

pub use checkout::{checkout_url, install_url, success_redirect_url};
pub use confirmation::{confirm, plan_amount_minor, Confirmation, PaymentSummary, SuccessParams};
pub use error::{BillingError, Result};
pub use notify::{notify_payment_success, HostEvent, HostNotifier, HttpHostNotifier, NoopNotifier};
