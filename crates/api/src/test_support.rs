//! Shared helpers for handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use chrono::Utc;
use fylr_core::forms::{FormData, FormGuidance, FormTemplate};
use fylr_core::ledger::Categorization;
use fylr_core::profile::BusinessProfile;
use fylr_db::entities::{sea_orm_active_enums::SubscriptionTier, users};
use fylr_integrations::{BillingProvider, ExpenseCategorizer, GuidanceAdvisor, SubscriptionOutcome};
use fylr_shared::types::Tier;
use fylr_shared::{JwtConfig, JwtService};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};

/// Categorizer returning a fixed judgment.
pub struct StubCategorizer(pub Categorization);

#[async_trait]
impl ExpenseCategorizer for StubCategorizer {
    async fn categorize(&self, _description: &str, _amount: Decimal) -> Categorization {
        self.0.clone()
    }
}

/// Advisor returning template guidance.
pub struct TemplateAdvisor;

#[async_trait]
impl GuidanceAdvisor for TemplateAdvisor {
    async fn advise(
        &self,
        template: &FormTemplate,
        data: &FormData,
        _profile: &BusinessProfile,
    ) -> FormGuidance {
        FormGuidance::from_template(template, data)
    }
}

/// Billing returning a fixed outcome.
pub struct StubBilling(pub Option<SubscriptionOutcome>);

#[async_trait]
impl BillingProvider for StubBilling {
    async fn create_subscription(&self, _email: &str, tier: Tier) -> SubscriptionOutcome {
        self.0.clone().unwrap_or_else(|| SubscriptionOutcome::mock(tier))
    }
}

pub fn jwt_service() -> JwtService {
    JwtService::new(&JwtConfig {
        secret: "test-secret-key-for-handlers".to_string(),
        token_expiry_secs: 3600,
    })
}

/// State over `db` with fallback integrations.
pub fn state_with(db: DatabaseConnection) -> AppState {
    AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service()),
        categorizer: Arc::new(StubCategorizer(Categorization::fallback())),
        advisor: Arc::new(TemplateAdvisor),
        billing: Arc::new(StubBilling(None)),
    }
}

/// State whose database must not be touched.
pub fn state_without_db() -> AppState {
    state_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn user_model(email: &str) -> users::Model {
    let now = Utc::now().into();
    users::Model {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "$argon2id$unused".to_string(),
        business_profile: serde_json::to_value(BusinessProfile::default())
            .unwrap_or_default(),
        subscription_tier: SubscriptionTier::Trial,
        stripe_customer_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// Sends one request through the full router.
pub async fn send(state: AppState, request: Request<Body>) -> Response {
    let app: Router = create_router(state);
    app.oneshot(request).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
