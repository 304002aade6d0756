//! # portal-client
//!
//! HTTP implementations of the portal's two external interfaces: the
//! identity provider (session retrieval, OAuth sign-in) and the quota
//! service (current plan lookup).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use portal_client::{identity_from_env, quota_from_env};
//!
//! // Construct once at process start; pass down explicitly.
//! let identity = identity_from_env();
//! let quota = quota_from_env();
//!
//! let session = portal_core::resolve_session(identity.as_ref()).await;
//! let plan = portal_core::current_plan(quota.as_ref(), session.as_ref()).await;
//! ```
//!
//! When the environment carries no provider configuration the factories
//! return stub implementations of the same traits, so shared logic runs
//! identically in non-interactive contexts.

pub mod identity;
pub mod quota;

pub use identity::{
    identity_from_env, parse_callback_fragment, CallbackTokens, HttpIdentityProvider,
    IdentityConfig, StubIdentityProvider,
};
pub use quota::{quota_from_env, HttpQuotaClient, QuotaConfig};

// Re-export core types for convenience
pub use portal_core::{
    current_plan, resolve_session, IdentityProvider, PortalError, QuotaClient,
    RemotePlanStatus, Result, Session,
};
