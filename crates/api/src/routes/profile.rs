//! Authenticated account routes.

use axum::{
    Router,
    extract::State,
    routing::{get, put},
};
use fylr_core::profile::BusinessProfile;
use fylr_db::UserRepository;
use fylr_db::entities::users;
use fylr_db::repositories::business_profile;
use fylr_shared::types::Tier;
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::Json;
use crate::middleware::auth::AuthUser;

/// Creates the account router. Mounted behind the auth middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/me/profile", put(update_profile))
}

/// The authenticated user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Current tier.
    pub tier: Tier,
    /// Stored business profile.
    pub business_profile: BusinessProfile,
    /// Registration time, RFC 3339.
    pub created_at: String,
}

impl From<users::Model> for MeResponse {
    fn from(user: users::Model) -> Self {
        Self {
            business_profile: business_profile(&user),
            id: user.id,
            tier: user.subscription_tier.into(),
            created_at: user.created_at.to_rfc3339(),
            email: user.email,
        }
    }
}

/// Profile update response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Profile as stored.
    pub business_profile: BusinessProfile,
}

/// GET /me - Returns the authenticated user.
async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = UserRepository::new(&state.db)
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user.into()))
}

/// PUT /me/profile - Replaces the business profile.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BusinessProfile>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = payload.validated()?;

    let user = UserRepository::new(&state.db)
        .update_profile(auth.user_id(), &profile)
        .await?;

    tracing::info!(user_id = %user.id, "Business profile updated");

    Ok(Json(ProfileResponse {
        business_profile: business_profile(&user),
    }))
}
