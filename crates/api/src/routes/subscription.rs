//! Subscription routes: tier catalog, upgrade prompts and purchases.

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use fylr_core::subscription::{Feature, TierPlan, UpgradePrompt, check_upgrade, plan_for, plans};
use fylr_db::UserRepository;
use fylr_integrations::{SubscriptionOutcome, SubscriptionStatus};
use fylr_shared::types::Tier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::auth::normalize_email;
use crate::AppState;
use crate::error::ApiError;
use crate::extractors::Json;

/// Creates the subscription router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscription/tiers", get(list_tiers))
        .route("/subscription/upgrade-trigger", post(upgrade_trigger))
        .route("/subscription/create", post(create_subscription))
}

fn default_tier() -> String {
    Tier::default().as_str().to_string()
}

/// Request body for the upgrade check.
#[derive(Debug, Deserialize)]
pub struct UpgradeTriggerRequest {
    /// Tier the user is on.
    #[serde(default = "default_tier")]
    pub current_tier: String,
    /// Estimated savings in dollars.
    #[serde(default)]
    pub estimated_savings: Decimal,
    /// Form completion percentage.
    #[serde(default)]
    pub completion_percentage: Decimal,
}

/// Request body for a purchase.
#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Purchaser email.
    #[serde(default)]
    pub email: String,
    /// Tier to buy.
    #[serde(default)]
    pub tier: String,
}

/// Response for a purchase attempt.
#[derive(Debug, Serialize)]
pub struct CreateSubscriptionResponse {
    /// Purchased tier.
    pub tier: Tier,
    /// Tier price in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Features the tier unlocks.
    pub features: &'static [Feature],
    /// Provider outcome.
    #[serde(flatten)]
    pub outcome: SubscriptionOutcome,
}

/// Tier catalog.
#[derive(Debug, Serialize)]
pub struct TiersResponse {
    /// Every tier, lowest first.
    pub tiers: Vec<TierPlan>,
}

/// GET /subscription/tiers - Lists tiers with prices and features.
async fn list_tiers() -> Json<TiersResponse> {
    Json(TiersResponse { tiers: plans() })
}

/// POST /subscription/upgrade-trigger - Decides whether to prompt an upgrade.
async fn upgrade_trigger(
    Json(payload): Json<UpgradeTriggerRequest>,
) -> Result<Json<UpgradePrompt>, ApiError> {
    let tier: Tier = payload.current_tier.parse()?;

    Ok(Json(check_upgrade(
        tier,
        payload.estimated_savings,
        payload.completion_percentage,
    )))
}

/// POST /subscription/create - Buys a tier and grants it on success.
async fn create_subscription(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubscriptionRequest>,
) -> Result<Json<CreateSubscriptionResponse>, ApiError> {
    let email = normalize_email(&payload.email);
    if email.is_empty() {
        return Err(ApiError::validation("email is required"));
    }
    if payload.tier.trim().is_empty() {
        return Err(ApiError::validation("tier is required"));
    }
    let tier: Tier = payload.tier.parse()?;

    let outcome = state.billing.create_subscription(&email, tier).await;

    if outcome.status.grants_access() {
        let updated = UserRepository::new(&state.db)
            .update_tier_by_email(&email, tier, outcome.customer_id.as_deref())
            .await?;
        tracing::info!(
            %tier,
            mock = outcome.mock,
            user_updated = updated.is_some(),
            "Subscription granted"
        );
    } else if outcome.status == SubscriptionStatus::Failed {
        tracing::warn!(%tier, error = ?outcome.error, "Subscription failed");
    }

    let plan = plan_for(tier);
    Ok(Json(CreateSubscriptionResponse {
        tier,
        price: plan.price,
        features: plan.features,
        outcome,
    }))
}
