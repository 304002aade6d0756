//! Error Types

use thiserror::Error;

/// Result type alias for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

/// Portal error types
#[derive(Error, Debug)]
pub enum PortalError {
    /// Identity provider error
    #[error("Identity error: {0}")]
    Identity(String),

    /// Identity provider unreachable or not responding
    #[error("Identity provider unavailable: {0}")]
    IdentityUnavailable(String),

    /// Quota lookup failed (network or non-2xx status)
    #[error("Quota lookup failed: {0}")]
    Quota(String),

    /// No authenticated session where one is required
    #[error("Not authenticated")]
    Unauthenticated,

    /// Tier not present in the catalog
    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    /// Malformed URL (checkout or sign-in target)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl PortalError {
    /// Check if this failure may be degraded to a safe default instead of
    /// being surfaced to the user.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            PortalError::Quota(_) | PortalError::IdentityUnavailable(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Unauthenticated => "Not authenticated. Please sign in.".into(),
            PortalError::Identity(_) | PortalError::IdentityUnavailable(_) => {
                "Sign-in is currently unavailable. Please try again.".into()
            }
            PortalError::Quota(_) => {
                "Unable to load plan details. Your purchase was successful.".into()
            }
            PortalError::UnknownTier(name) => format!("The plan '{name}' is not available."),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        PortalError::Other(err.to_string())
    }
}
