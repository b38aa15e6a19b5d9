//! AI guidance routes.

use axum::{Router, extract::State, routing::post};
use fylr_core::forms::{FormData, FormGuidance, FormType, template_for};
use fylr_db::UserRepository;
use fylr_db::repositories::business_profile;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::Json;

/// Creates the AI router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ai/guidance", post(guidance))
}

/// Request body for form guidance.
#[derive(Debug, Deserialize)]
pub struct GuidanceRequest {
    /// Form type the data belongs to.
    pub form_type: String,
    /// Current field values.
    #[serde(default)]
    pub form_data: FormData,
    /// Requesting user.
    pub user_id: Uuid,
}

/// POST /ai/guidance - Suggests next steps for a form.
async fn guidance(
    State(state): State<AppState>,
    Json(payload): Json<GuidanceRequest>,
) -> Result<Json<FormGuidance>, ApiError> {
    let form_type: FormType = payload.form_type.parse()?;
    let template = template_for(form_type);
    payload.form_data.validate(template)?;

    let user = UserRepository::new(&state.db)
        .find_by_id(payload.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let profile = business_profile(&user);
    let guidance = state
        .advisor
        .advise(template, &payload.form_data, &profile)
        .await;

    tracing::debug!(
        user_id = %user.id,
        %form_type,
        ai_generated = guidance.ai_generated,
        "Guidance generated"
    );

    Ok(Json(guidance))
}
