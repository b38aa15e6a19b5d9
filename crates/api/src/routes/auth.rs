//! Authentication routes for registration and login.

use axum::{Router, extract::State, http::StatusCode, routing::post};
use fylr_core::auth::{hash_password, verify_password};
use fylr_db::UserRepository;
use fylr_db::entities::users;
use fylr_shared::auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use fylr_shared::types::Tier;
use tracing::info;
use validator::Validate;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::Json;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn auth_response(state: &AppState, user: users::Model) -> Result<AuthResponse, ApiError> {
    let tier = Tier::from(user.subscription_tier);
    let token = state.jwt_service.generate_token(user.id, tier)?;

    Ok(AuthResponse {
        token,
        expires_in: state.jwt_service.expires_in(),
        user: UserInfo {
            id: user.id,
            email: user.email,
            tier,
        },
    })
}

/// POST /auth/register - Create an account on the trial tier.
async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.email = normalize_email(&payload.email);
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let user = UserRepository::new(&state.db)
        .create(&payload.email, &password_hash)
        .await?;

    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(auth_response(&state, user)?)))
}

/// POST /auth/login - Exchange credentials for a token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let Some(user) = UserRepository::new(&state.db)
        .find_by_email(&email)
        .await?
    else {
        info!("Login attempt for unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    info!(user_id = %user.id, "User logged in");
    Ok(Json(auth_response(&state, user)?))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::test_support::{body_json, json_request, mock_db, send, state_with, state_without_db, user_model};
    use axum::http::StatusCode;
    use fylr_core::auth::hash_password;
    use fylr_db::entities::users;
    use sea_orm::Value;
    use serde_json::json;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn test_register_creates_trial_user() {
        let user = user_model("new@example.com");
        let db = mock_db()
            .append_query_results([[count_row(0)]])
            .append_query_results([[user.clone()]])
            .into_connection();

        let response = send(
            state_with(db),
            json_request(
                "POST",
                "/api/auth/register",
                &json!({ "email": "New@Example.com ", "password": "correct-horse" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["email"], "new@example.com");
        assert_eq!(body["user"]["tier"], "trial");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_400() {
        let db = mock_db().append_query_results([[count_row(1)]]).into_connection();

        let response = send(
            state_with(db),
            json_request(
                "POST",
                "/api/auth/register",
                &json!({ "email": "taken@example.com", "password": "correct-horse" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Email already registered");
    }

    #[tokio::test]
    async fn test_register_missing_fields_is_400() {
        let response = send(
            state_without_db(),
            json_request("POST", "/api/auth/register", &json!({ "email": "nope" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_malformed_json_is_400() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let response = send(state_without_db(), request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_401() {
        let db = mock_db()
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let response = send(
            state_with(db),
            json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "ghost@example.com", "password": "whatever1" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let mut user = user_model("owner@example.com");
        user.password_hash = hash_password("correct-horse").unwrap();
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_query_results([[user]])
            .into_connection();
        let state = state_with(db);

        let ok = send(
            state.clone(),
            json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "owner@example.com", "password": "correct-horse" }),
            ),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);

        let token = body_json(ok).await["token"].as_str().unwrap().to_string();
        assert!(state.jwt_service.validate_token(&token).is_ok());

        let wrong = send(
            state,
            json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "owner@example.com", "password": "battery-staple" }),
            ),
        )
        .await;
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    }
}
