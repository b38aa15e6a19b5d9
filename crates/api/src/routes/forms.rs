//! Tax form routes: templates, creation and field updates.

use axum::{
    Router,
    extract::State,
    routing::{get, post, put},
};
use fylr_core::forms::{FormData, FormTemplate, FormType, all_templates, template_for};
use fylr_db::TaxFormRepository;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{Json, Path};

/// Creates the forms router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forms/templates", get(list_templates))
        .route("/forms/templates/{form_type}", get(get_template))
        .route("/forms/create/{form_type}", post(create_form))
        .route("/forms/update/{form_id}", put(update_form))
}

/// Template list response.
#[derive(Serialize)]
pub struct TemplatesResponse {
    /// Every supported template.
    pub templates: &'static [FormTemplate],
}

/// Request body for form creation.
#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    /// Owning user.
    pub user_id: Uuid,
}

/// Form creation response.
#[derive(Serialize)]
pub struct CreateFormResponse {
    /// Form ID.
    pub form_id: Uuid,
    /// Template the form follows.
    pub template: &'static FormTemplate,
    /// Current field values.
    pub data: FormData,
    /// Completion percentage.
    #[serde(with = "rust_decimal::serde::float")]
    pub completion_percentage: Decimal,
    /// True if this request created the form.
    pub created: bool,
}

/// Request body for form updates.
#[derive(Debug, Deserialize)]
pub struct UpdateFormRequest {
    /// Replacement field values.
    pub form_data: FormData,
}

/// Form update response.
#[derive(Serialize)]
pub struct UpdateFormResponse {
    /// Always true on success.
    pub success: bool,
    /// Recomputed completion percentage.
    #[serde(with = "rust_decimal::serde::float")]
    pub completion_percentage: Decimal,
}

/// GET /forms/templates
async fn list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: all_templates(),
    })
}

/// GET /forms/templates/{form_type}
async fn get_template(
    Path(form_type): Path<String>,
) -> Result<Json<&'static FormTemplate>, ApiError> {
    let form_type: FormType = form_type.parse()?;
    Ok(Json(template_for(form_type)))
}

/// POST /forms/create/{form_type} - Returns the user's form, creating it if needed.
async fn create_form(
    State(state): State<AppState>,
    Path(form_type): Path<String>,
    Json(payload): Json<CreateFormRequest>,
) -> Result<Json<CreateFormResponse>, ApiError> {
    let form_type: FormType = form_type.parse()?;

    let record = TaxFormRepository::new(&state.db)
        .get_or_create(payload.user_id, form_type)
        .await?;

    if record.created {
        tracing::info!(user_id = %payload.user_id, form_id = %record.model.id, %form_type, "Form created");
    }

    Ok(Json(CreateFormResponse {
        form_id: record.model.id,
        template: template_for(form_type),
        data: record.data,
        completion_percentage: record.model.completion_percentage,
        created: record.created,
    }))
}

/// PUT /forms/update/{form_id} - Replaces field values and recomputes completion.
async fn update_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(payload): Json<UpdateFormRequest>,
) -> Result<Json<UpdateFormResponse>, ApiError> {
    let form = TaxFormRepository::new(&state.db)
        .update_data(form_id, &payload.form_data)
        .await?;

    tracing::debug!(form_id = %form_id, completion = %form.completion_percentage, "Form updated");

    Ok(Json(UpdateFormResponse {
        success: true,
        completion_percentage: form.completion_percentage,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{body_json, get, json_request, mock_db, send, state_with, state_without_db, user_model};
    use axum::http::StatusCode;
    use chrono::Utc;
    use fylr_core::forms::{FormData, FormType, template_for};
    use fylr_db::entities::{tax_forms, users};
    use rust_decimal::Decimal;
    use sea_orm::MockExecResult;
    use serde_json::json;
    use uuid::Uuid;

    fn form_model(user_id: Uuid, form_type: FormType, data: &FormData, completion: Decimal) -> tax_forms::Model {
        let now = Utc::now().into();
        tax_forms::Model {
            id: Uuid::new_v4(),
            user_id,
            form_type: form_type.as_str().to_string(),
            template_version: 1,
            form_data: serde_json::to_value(data).unwrap(),
            completion_percentage: completion,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_templates() {
        let response = send(state_without_db(), get("/api/forms/templates")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let types: Vec<_> = body["templates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["form_type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(types, vec!["schedule_c", "schedule_se", "1099nec"]);
    }

    #[tokio::test]
    async fn test_get_unknown_template_is_400() {
        let response = send(state_without_db(), get("/api/forms/templates/w2")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_unknown_form_type_is_400() {
        let response = send(
            state_without_db(),
            json_request("POST", "/api/forms/create/form_1040", &json!({ "user_id": Uuid::new_v4() })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_returns_blank_form() {
        let user = user_model("forms@example.com");
        let template = template_for(FormType::ScheduleC);
        let form = form_model(user.id, FormType::ScheduleC, &FormData::blank(template), Decimal::ZERO);
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .append_query_results([[form.clone()]])
            .into_connection();

        let response = send(
            state_with(db),
            json_request("POST", "/api/forms/create/schedule_c", &json!({ "user_id": user.id })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["form_id"], json!(form.id));
        assert_eq!(body["completion_percentage"], json!(0.0));
        assert_eq!(body["created"], true);
        assert_eq!(body["template"]["form_type"], "schedule_c");
        assert_eq!(body["data"]["income.gross_receipts"], "");
    }

    #[tokio::test]
    async fn test_second_create_returns_existing_data() {
        let user = user_model("forms@example.com");
        let mut data = FormData::new();
        data.insert("income.gross_receipts", json!(500));
        let form = form_model(user.id, FormType::ScheduleC, &data, Decimal::new(323, 2));
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }])
            .append_query_results([[form]])
            .into_connection();

        let response = send(
            state_with(db),
            json_request("POST", "/api/forms/create/schedule_c", &json!({ "user_id": user.id })),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["created"], false);
        assert_eq!(body["data"]["income.gross_receipts"], 500);
        assert_eq!(body["completion_percentage"], json!(3.23));
    }

    #[tokio::test]
    async fn test_create_for_missing_user_is_404() {
        let db = mock_db()
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let response = send(
            state_with(db),
            json_request("POST", "/api/forms/create/schedule_c", &json!({ "user_id": Uuid::new_v4() })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_form_is_404() {
        let db = mock_db()
            .append_query_results([Vec::<tax_forms::Model>::new()])
            .into_connection();

        let response = send(
            state_with(db),
            json_request(
                "PUT",
                &format!("/api/forms/update/{}", Uuid::new_v4()),
                &json!({ "form_data": {} }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_recomputes_completion() {
        let user_id = Uuid::new_v4();
        let stored = form_model(user_id, FormType::ScheduleSe, &FormData::new(), Decimal::ZERO);
        let mut submitted = FormData::new();
        submitted.insert("taxpayer_info.name", json!("Jordan Lee"));
        submitted.insert("taxpayer_info.ssn", json!("123-45-6789"));
        submitted.insert("income_info.schedule_c_income", json!(52000));
        let mut updated = stored.clone();
        updated.form_data = serde_json::to_value(&submitted).unwrap();
        updated.completion_percentage = Decimal::new(50, 0);

        let db = mock_db()
            .append_query_results([[stored.clone()]])
            .append_query_results([[updated]])
            .into_connection();

        let response = send(
            state_with(db),
            json_request(
                "PUT",
                &format!("/api/forms/update/{}", stored.id),
                &json!({ "form_data": submitted }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["completion_percentage"], json!(50.0));
    }

    #[tokio::test]
    async fn test_update_with_unknown_field_is_400() {
        let stored = form_model(Uuid::new_v4(), FormType::ScheduleC, &FormData::new(), Decimal::ZERO);
        let db = mock_db().append_query_results([[stored.clone()]]).into_connection();

        let response = send(
            state_with(db),
            json_request(
                "PUT",
                &format!("/api/forms/update/{}", stored.id),
                &json!({ "form_data": { "gross_receipts": 500 } }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_with_bad_id_is_400() {
        let response = send(
            state_without_db(),
            json_request("PUT", "/api/forms/update/not-a-uuid", &json!({ "form_data": {} })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
