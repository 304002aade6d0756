//! Checkout Eligibility
//!
//! The decision table behind every pricing-tier button: given the tier, the
//! user's current plan, and whether a session exists, compute what the button
//! says, whether it is clickable, and where clicking it goes.

use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::tier::{Plan, Tier};

/// Where a tier button sends the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Open the install link directly, no parameters appended
    Install,
    /// Navigate to the checkout URL parameterized with user identity
    Checkout,
    /// Trigger identity-provider sign-in, returning to this page
    SignIn,
}

/// Derived button state for one tier card. Never stored; recomputed per view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDecision {
    pub enabled: bool,
    pub label: String,
    /// Absent for disabled buttons
    pub action: Option<ButtonAction>,
}

impl ButtonDecision {
    fn disabled(label: &str) -> Self {
        Self {
            enabled: false,
            label: label.into(),
            action: None,
        }
    }

    fn enabled(label: &str, action: ButtonAction) -> Self {
        Self {
            enabled: true,
            label: label.into(),
            action: Some(action),
        }
    }
}

/// Compute the button state for one tier.
///
/// The current plan name is compared case-insensitively against the closed
/// plan set; names outside it (or an empty name) compare as free, so exactly
/// one tier is "current" for any input.
///
/// Rules are evaluated in order, first match wins:
///
/// 1. current plan equals this tier            → disabled "Current Plan"
/// 2. on team, tier is pro or free             → disabled "Already on Team plan"
/// 3. on pro, tier is free                     → disabled "Already a Pro member"
/// 4. free tier while on free                  → disabled "Current Plan"
/// 5. paid tier, not signed in                 → sign-in prompt
/// 6. otherwise                                → install (free) or checkout (paid)
///
/// Rule 4 is shadowed by rule 1; it shipped that way and is kept for
/// back-compat rather than inferring stricter intent.
pub fn decide(tier: &Tier, current_plan_name: &str, session: Option<&Session>) -> ButtonDecision {
    let current = Plan::from_name(current_plan_name);

    if current == tier.plan {
        return ButtonDecision::disabled("Current Plan");
    }

    if current == Plan::Team && matches!(tier.plan, Plan::Pro | Plan::Free) {
        return ButtonDecision::disabled("Already on Team plan");
    }

    if current == Plan::Pro && tier.plan == Plan::Free {
        return ButtonDecision::disabled("Already a Pro member");
    }

    if tier.plan == Plan::Free && current == Plan::Free {
        return ButtonDecision::disabled("Current Plan");
    }

    if tier.plan != Plan::Free && session.is_none() {
        return ButtonDecision::enabled("Sign in to Subscribe", ButtonAction::SignIn);
    }

    if tier.plan == Plan::Free {
        ButtonDecision::enabled("Try Now", ButtonAction::Install)
    } else {
        ButtonDecision::enabled("Subscribe Now", ButtonAction::Checkout)
    }
}
