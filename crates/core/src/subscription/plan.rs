//! Static tier table.

use fylr_shared::types::Tier;
use rust_decimal::Decimal;
use serde::Serialize;

/// A feature unlocked by a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Form templates with completion tracking.
    BasicForms,
    /// A small allowance of AI requests.
    LimitedAi,
    /// Every supported form.
    FullForms,
    /// AI form guidance.
    AiGuidance,
    /// Completed form export.
    Export,
    /// Priority support queue.
    PrioritySupport,
    /// Audit protection.
    AuditProtection,
}

/// Price and features of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierPlan {
    /// Tier.
    pub tier: Tier,
    /// Display name.
    pub name: &'static str,
    /// One-time price in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Unlocked features.
    pub features: &'static [Feature],
}

impl TierPlan {
    /// Returns true if the tier unlocks `feature`.
    #[must_use]
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

const TRIAL_FEATURES: &[Feature] = &[Feature::BasicForms, Feature::LimitedAi];
const BASIC_FEATURES: &[Feature] = &[Feature::FullForms, Feature::AiGuidance, Feature::Export];
const PRO_FEATURES: &[Feature] = &[
    Feature::FullForms,
    Feature::AiGuidance,
    Feature::Export,
    Feature::PrioritySupport,
    Feature::AuditProtection,
];

/// Returns the plan for a tier.
#[must_use]
pub fn plan_for(tier: Tier) -> TierPlan {
    match tier {
        Tier::Trial => TierPlan {
            tier,
            name: "Trial",
            price: Decimal::ZERO,
            features: TRIAL_FEATURES,
        },
        Tier::Basic => TierPlan {
            tier,
            name: "Basic",
            price: Decimal::from(197),
            features: BASIC_FEATURES,
        },
        Tier::Pro => TierPlan {
            tier,
            name: "Pro",
            price: Decimal::from(497),
            features: PRO_FEATURES,
        },
    }
}

/// Returns every plan, cheapest first.
#[must_use]
pub fn plans() -> Vec<TierPlan> {
    Tier::ALL.into_iter().map(plan_for).collect()
}
