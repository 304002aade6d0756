//! Application State

use std::sync::Arc;

use portal_billing::HostNotifier;
use portal_core::{IdentityProvider, QuotaClient, TierCatalog};

/// Shared application state
///
/// Constructed once in `main` and injected into every handler; no hidden
/// global client instances.
#[derive(Clone)]
pub struct AppState {
    /// Identity provider (HTTP or stub, per environment)
    pub identity: Arc<dyn IdentityProvider>,

    /// Quota service client
    pub quota: Arc<dyn QuotaClient>,

    /// Static tier catalog, loaded at startup
    pub catalog: Arc<TierCatalog>,

    /// Best-effort host notification channels
    pub notifiers: Arc<Vec<Arc<dyn HostNotifier>>>,

    /// Public origin of this portal, used for sign-in return targets
    pub origin: String,

    /// Whether a real identity provider is configured
    pub sign_in_enabled: bool,
}
