//! Tier Catalog
//!
//! Static pricing catalog: plan tiers, feature lists, and action URLs.
//! Loaded once at process start and immutable afterwards.

use serde::{Deserialize, Serialize};

/// Subscription plan tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Team,
}

impl Plan {
    pub fn as_str(&self) -> &str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Team => "team",
        }
    }

    /// Parse a plan name. Comparison is case-insensitive; anything outside
    /// the closed set maps to `Free`.
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pro" => Plan::Pro,
            "team" => Plan::Team,
            _ => Plan::Free,
        }
    }

    /// Display name shown on tier cards
    pub fn display_name(&self) -> &str {
        match self {
            Plan::Free => "Free",
            Plan::Pro => "Pro",
            Plan::Team => "Team",
        }
    }

    /// Monthly price in minor currency units
    pub fn price_minor_units(&self) -> i64 {
        match self {
            Plan::Free => 0,
            Plan::Pro => 999,
            Plan::Team => 3999,
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::Free
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single feature line on a tier card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub text: String,
    /// Whether the feature is included in this tier
    pub available: bool,
}

impl Feature {
    pub fn included(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            available: true,
        }
    }

    pub fn excluded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            available: false,
        }
    }
}

/// A catalog entry for one pricing tier
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tier {
    /// Stable catalog key
    pub id: String,

    /// Plan this tier sells
    pub plan: Plan,

    /// Monthly price in minor currency units
    pub price_minor_units: i64,

    /// Ordered feature list
    pub features: Vec<Feature>,

    /// Install link for the free tier, checkout link template for paid tiers
    pub action_url: String,
}

impl Tier {
    pub fn display_name(&self) -> &str {
        self.plan.display_name()
    }

    pub fn is_free(&self) -> bool {
        self.plan == Plan::Free
    }
}

/// The static tier catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TierCatalog {
    tiers: Vec<Tier>,
}

impl TierCatalog {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Look up a tier by plan name (case-insensitive)
    pub fn find(&self, plan_name: &str) -> Option<&Tier> {
        let plan = Plan::from_name(plan_name);
        self.tiers.iter().find(|t| t.plan == plan)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for TierCatalog {
    /// The shipping catalog: free, team (recommended), pro.
    fn default() -> Self {
        Self::new(vec![
            Tier {
                id: "tier_free".into(),
                plan: Plan::Free,
                price_minor_units: Plan::Free.price_minor_units(),
                features: vec![
                    Feature::included("AI analysis 5/day"),
                    Feature::included("Save up to 3 analyses"),
                    Feature::excluded("Detailed save, search & filter analyses"),
                    Feature::excluded("CSV & Excel export"),
                    Feature::excluded("Priority email support"),
                ],
                action_url:
                    "https://chromewebstore.google.com/detail/extension?utm_source=portal".into(),
            },
            Tier {
                id: "tier_team".into(),
                plan: Plan::Team,
                price_minor_units: Plan::Team.price_minor_units(),
                features: vec![
                    Feature::included("All Pro features"),
                    Feature::included("AI analysis 500/day"),
                    Feature::included("Save up to 5000 analyses"),
                    Feature::included("Detailed save, search & filter analyses"),
                    Feature::included("CSV & Excel export"),
                    Feature::included("Priority email support"),
                ],
                action_url:
                    "https://pay.example.com/checkout/buy/team?media=0&desc=0&discount=0".into(),
            },
            Tier {
                id: "tier_pro".into(),
                plan: Plan::Pro,
                price_minor_units: Plan::Pro.price_minor_units(),
                features: vec![
                    Feature::included("AI analysis 50/day"),
                    Feature::included("Save up to 200 analyses"),
                    Feature::included("Detailed save, search & filter analyses"),
                    Feature::included("CSV & Excel export"),
                    Feature::included("Priority email support"),
                ],
                action_url:
                    "https://pay.example.com/checkout/buy/pro?media=0&desc=0&discount=0".into(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parsing_is_case_insensitive() {
        assert_eq!(Plan::from_name("PRO"), Plan::Pro);
        assert_eq!(Plan::from_name("pro"), Plan::Pro);
        assert_eq!(Plan::from_name("Team"), Plan::Team);
        assert_eq!(Plan::from_name(" free "), Plan::Free);
    }

    #[test]
    fn test_unknown_plan_defaults_to_free() {
        assert_eq!(Plan::from_name("enterprise"), Plan::Free);
        assert_eq!(Plan::from_name(""), Plan::Free);
    }

    #[test]
    fn test_plan_pricing() {
        assert_eq!(Plan::Free.price_minor_units(), 0);
        assert_eq!(Plan::Pro.price_minor_units(), 999);
        assert_eq!(Plan::Team.price_minor_units(), 3999);
    }

    #[test]
    fn test_default_catalog_has_one_tier_per_plan() {
        let catalog = TierCatalog::default();
        assert_eq!(catalog.len(), 3);
        for plan in [Plan::Free, Plan::Pro, Plan::Team] {
            let matching = catalog.tiers().iter().filter(|t| t.plan == plan).count();
            assert_eq!(matching, 1, "expected exactly one {plan} tier");
        }
    }

    #[test]
    fn test_catalog_find_is_case_insensitive() {
        let catalog = TierCatalog::default();
        let tier = catalog.find("TEAM").expect("team tier");
        assert_eq!(tier.plan, Plan::Team);
    }
}
