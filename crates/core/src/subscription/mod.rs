//! Subscription tiers, their features and upgrade prompts.

pub mod gate;
pub mod plan;

pub use gate::{UpgradePrompt, UpgradeReason, check_upgrade};
pub use plan::{Feature, TierPlan, plan_for, plans};
