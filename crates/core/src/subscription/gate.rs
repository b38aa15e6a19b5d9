//! Upgrade prompts for entry-tier users.

use fylr_shared::types::Tier;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Savings above this push an entry-tier user to the top tier.
const SAVINGS_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Completion above this pushes an entry-tier user to the mid tier.
const COMPLETION_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Why an upgrade is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeReason {
    /// Estimated savings crossed the threshold.
    Savings,
    /// Form completion crossed the threshold.
    Completion,
}

/// Outcome of the upgrade check.
///
/// Either no upgrade, or an upgrade with a recommended tier, a reason and a
/// message. The two are built only through [`UpgradePrompt::none`] and
/// [`UpgradePrompt::recommend`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradePrompt {
    show_upgrade: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommended_tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<UpgradeReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl UpgradePrompt {
    /// No upgrade shown.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            show_upgrade: false,
            recommended_tier: None,
            reason: None,
            message: None,
        }
    }

    /// Upgrade to `tier`.
    #[must_use]
    pub fn recommend(tier: Tier, reason: UpgradeReason, message: impl Into<String>) -> Self {
        Self {
            show_upgrade: true,
            recommended_tier: Some(tier),
            reason: Some(reason),
            message: Some(message.into()),
        }
    }

    /// Whether to show the prompt.
    #[must_use]
    pub const fn show_upgrade(&self) -> bool {
        self.show_upgrade
    }

    /// Recommended tier, if shown.
    #[must_use]
    pub const fn recommended_tier(&self) -> Option<Tier> {
        self.recommended_tier
    }

    /// Reason, if shown.
    #[must_use]
    pub const fn reason(&self) -> Option<UpgradeReason> {
        self.reason
    }

    /// Message, if shown.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Decides whether to show an upgrade prompt.
///
/// Only the entry tier is ever prompted. High savings win over high
/// completion.
#[must_use]
pub fn check_upgrade(
    current_tier: Tier,
    estimated_savings: Decimal,
    completion_percentage: Decimal,
) -> UpgradePrompt {
    if !current_tier.is_entry() {
        return UpgradePrompt::none();
    }

    if estimated_savings > SAVINGS_THRESHOLD {
        return UpgradePrompt::recommend(
            Tier::Pro,
            UpgradeReason::Savings,
            format!(
                "You've found ${} in potential savings! Upgrade to Pro to unlock advanced strategies.",
                format_dollars(estimated_savings)
            ),
        );
    }

    if completion_percentage > COMPLETION_THRESHOLD {
        return UpgradePrompt::recommend(
            Tier::Basic,
            UpgradeReason::Completion,
            format!(
                "You're {}% complete! Upgrade to Basic for AI-guided completion and export.",
                completion_percentage.normalize()
            ),
        );
    }

    UpgradePrompt::none()
}

/// Whole dollars with thousands separators, e.g. `12,345`.
fn format_dollars(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .normalize()
        .to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount.is_sign_negative() && !grouped.chars().all(|c| c == '0') {
        grouped.insert(0, '-');
    }
    grouped
}
