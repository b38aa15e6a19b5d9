//! Postgres enum mappings.

use fylr_shared::types::Tier;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `subscription_tier` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "subscription_tier")]
pub enum SubscriptionTier {
    /// Free trial.
    #[sea_orm(string_value = "trial")]
    Trial,
    /// Paid basic tier.
    #[sea_orm(string_value = "basic")]
    Basic,
    /// Paid pro tier.
    #[sea_orm(string_value = "pro")]
    Pro,
}

impl From<Tier> for SubscriptionTier {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Trial => Self::Trial,
            Tier::Basic => Self::Basic,
            Tier::Pro => Self::Pro,
        }
    }
}

impl From<SubscriptionTier> for Tier {
    fn from(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Trial => Self::Trial,
            SubscriptionTier::Basic => Self::Basic,
            SubscriptionTier::Pro => Self::Pro,
        }
    }
}
