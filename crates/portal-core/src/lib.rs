//! # portal-core
//!
//! Plan resolution and checkout-eligibility engine for the extension portal.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Eligibility Engine                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │   Session    │  │    Tier      │  │    QuotaClient     │  │
//! │  │   Resolver   │──│   Catalog    │──│    (Strategy)      │  │
//! │  └──────────────┘  └──────────────┘  └────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `IdentityProvider` and `QuotaClient` traits keep the engine independent
//! of any concrete auth backend or quota API; `portal-client` supplies the
//! HTTP implementations and `decide` stays a pure function over their output.

pub mod decision;
pub mod error;
pub mod install;
pub mod quota;
pub mod session;
pub mod tier;

pub use decision::{decide, ButtonAction, ButtonDecision};
pub use error::{PortalError, Result};
pub use install::{Browser, InstallTarget};
pub use quota::{current_plan, QuotaClient, RemotePlanStatus};
pub use session::{resolve_session, IdentityProvider, Session};
pub use tier::{Feature, Plan, Tier, TierCatalog};
