//! Smart ledger routes: expense capture, history and tax readiness.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use fylr_core::ledger::{
    ExpenseCategory, LedgerEntry, ReadinessReport, check_amount, readiness_score,
};
use fylr_db::entities::ledger_entries;
use fylr_db::{LedgerEntryRepository, UserRepository};
use fylr_shared::types::id::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{Json, Path};

/// Creates the smart ledger router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/smart-ledger/add-expense", post(add_expense))
        .route("/smart-ledger/expenses/{user_id}", get(list_expenses))
        .route("/smart-ledger/tax-readiness/{user_id}", get(tax_readiness))
}

/// Request body for adding an expense.
#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    /// Owning user.
    pub user_id: Uuid,
    /// Positive amount in whole cents.
    pub amount: Decimal,
    /// Non-empty description.
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD` or RFC 3339; defaults to now.
    #[serde(default)]
    pub date: Option<String>,
}

/// Response for an added expense.
#[derive(Debug, Serialize)]
pub struct AddExpenseResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Assigned category.
    pub category: ExpenseCategory,
    /// Display name of the category.
    pub category_name: &'static str,
    /// Whether the expense is deductible.
    pub tax_deductible: bool,
    /// Categorizer confidence.
    #[serde(with = "rust_decimal::serde::float")]
    pub confidence: Decimal,
    /// Categorizer explanation.
    pub reasoning: String,
    /// Estimated tax saved by the expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_tax_savings: Decimal,
}

/// One expense in a listing.
#[derive(Debug, Serialize)]
pub struct ExpenseItem {
    /// Entry ID.
    pub id: Uuid,
    /// Amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Category wire name.
    pub category: String,
    /// Deductibility.
    pub tax_deductible: bool,
    /// Categorizer confidence.
    #[serde(with = "rust_decimal::serde::float")]
    pub confidence: Decimal,
    /// Categorizer explanation.
    pub reasoning: Option<String>,
    /// Transaction date, RFC 3339.
    pub date: String,
}

impl From<ledger_entries::Model> for ExpenseItem {
    fn from(model: ledger_entries::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            description: model.description,
            category: model.category,
            tax_deductible: model.tax_deductible,
            confidence: model.confidence,
            reasoning: model.reasoning,
            date: model.transaction_date.to_rfc3339(),
        }
    }
}

/// Expense listing response.
#[derive(Debug, Serialize)]
pub struct ExpensesResponse {
    /// Most recent expenses, newest first.
    pub expenses: Vec<ExpenseItem>,
}

/// Parses an optional `YYYY-MM-DD` or RFC 3339 date.
fn parse_date(date: Option<&str>) -> Result<DateTime<Utc>, ApiError> {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(Utc::now());
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ApiError::validation("date must be YYYY-MM-DD or RFC 3339"))
}

async fn ensure_user(state: &AppState, user_id: Uuid) -> Result<(), ApiError> {
    UserRepository::new(&state.db)
        .find_by_id(user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// POST /smart-ledger/add-expense - Categorizes and stores an expense.
async fn add_expense(
    State(state): State<AppState>,
    Json(payload): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<AddExpenseResponse>), ApiError> {
    let amount = check_amount(payload.amount)?;
    let description = payload.description.trim();
    if description.is_empty() {
        return Err(ApiError::validation("description is required"));
    }
    let date = parse_date(payload.date.as_deref())?;

    ensure_user(&state, payload.user_id).await?;

    let categorization = state
        .categorizer
        .categorize(description, amount)
        .await;

    let entry = LedgerEntry::record(
        UserId::from_uuid(payload.user_id),
        amount,
        description,
        &categorization,
        date,
    );
    let stored = LedgerEntryRepository::new(&state.db)
        .create(&entry, Some(&categorization.reasoning))
        .await?;

    tracing::info!(
        user_id = %payload.user_id,
        entry_id = %stored.id,
        category = %categorization.category,
        "Expense recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(AddExpenseResponse {
            id: stored.id,
            category: categorization.category,
            category_name: categorization.category.display_name(),
            tax_deductible: categorization.tax_deductible,
            confidence: categorization.confidence,
            estimated_tax_savings: categorization.estimated_tax_savings(amount),
            reasoning: categorization.reasoning,
        }),
    ))
}

/// GET /smart-ledger/expenses/{user_id} - Most recent expenses, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ExpensesResponse>, ApiError> {
    ensure_user(&state, user_id).await?;

    let expenses = LedgerEntryRepository::new(&state.db)
        .list_recent(user_id)
        .await?
        .into_iter()
        .map(ExpenseItem::from)
        .collect();

    Ok(Json(ExpensesResponse { expenses }))
}

/// GET /smart-ledger/tax-readiness/{user_id} - Scores the user's ledger.
async fn tax_readiness(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ReadinessReport>, ApiError> {
    ensure_user(&state, user_id).await?;

    let entries = LedgerEntryRepository::new(&state.db)
        .all_for_user(user_id)
        .await?;

    Ok(Json(readiness_score(&entries)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::test_support::{
        StubCategorizer, body_json, get, json_request, mock_db, send, state_with, state_without_db,
        user_model,
    };
    use fylr_core::ledger::Categorization;
    use fylr_db::entities::users;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn entry_model(user_id: Uuid, category: &str, confidence: Decimal) -> ledger_entries::Model {
        let now = Utc::now().into();
        ledger_entries::Model {
            id: Uuid::new_v4(),
            user_id,
            amount: dec!(25.00),
            description: "Entry".to_string(),
            category: category.to_string(),
            tax_deductible: category != "uncategorized",
            confidence,
            reasoning: None,
            transaction_date: now,
            created_at: now,
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let day = parse_date(Some("2026-03-15")).unwrap();
        assert_eq!(day.to_rfc3339(), "2026-03-15T00:00:00+00:00");

        let instant = parse_date(Some("2026-03-15T10:30:00-05:00")).unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-03-15T15:30:00+00:00");

        assert!(parse_date(None).is_ok());
        assert!(parse_date(Some("  ")).is_ok());
        assert!(parse_date(Some("15/03/2026")).is_err());
    }

    #[tokio::test]
    async fn test_add_expense_rejects_non_positive_amount() {
        let response = send(
            state_without_db(),
            json_request(
                "POST",
                "/api/smart-ledger/add-expense",
                &json!({ "user_id": Uuid::new_v4(), "amount": 0, "description": "Nothing" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case(json!("0.004"))]
    #[case(json!("12.345"))]
    #[case(json!("10000000000000"))]
    #[tokio::test]
    async fn test_add_expense_rejects_unstorable_amount(#[case] amount: serde_json::Value) {
        let response = send(
            state_without_db(),
            json_request(
                "POST",
                "/api/smart-ledger/add-expense",
                &json!({ "user_id": Uuid::new_v4(), "amount": amount, "description": "Stamps" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_expense_reports_confidence_as_stored() {
        let user = user_model("ledger@example.com");
        let stored = entry_model(user.id, "travel", dec!(0.700));
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_query_results([[stored]])
            .into_connection();

        let mut state = state_with(db);
        state.categorizer = Arc::new(StubCategorizer(
            Categorization::validated("travel", true, dec!(0.7004), "Train ticket").unwrap(),
        ));

        let response = send(
            state,
            json_request(
                "POST",
                "/api/smart-ledger/add-expense",
                &json!({ "user_id": user.id, "amount": "48.20", "description": "Train to client" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["confidence"], json!(0.7));
    }

    #[tokio::test]
    async fn test_add_expense_rejects_blank_description() {
        let response = send(
            state_without_db(),
            json_request(
                "POST",
                "/api/smart-ledger/add-expense",
                &json!({ "user_id": Uuid::new_v4(), "amount": 10, "description": "  " }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_expense_for_missing_user_is_404() {
        let db = mock_db()
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let response = send(
            state_with(db),
            json_request(
                "POST",
                "/api/smart-ledger/add-expense",
                &json!({ "user_id": Uuid::new_v4(), "amount": 10, "description": "Paper" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_expense_propagates_categorization() {
        let user = user_model("ledger@example.com");
        let stored = entry_model(user.id, "software", dec!(0.9));
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_query_results([[stored.clone()]])
            .into_connection();

        let mut state = state_with(db);
        state.categorizer = Arc::new(StubCategorizer(
            Categorization::validated("software", true, dec!(0.9), "Design subscription").unwrap(),
        ));

        let response = send(
            state,
            json_request(
                "POST",
                "/api/smart-ledger/add-expense",
                &json!({
                    "user_id": user.id,
                    "amount": "120.00",
                    "description": "Figma annual plan",
                    "date": "2026-02-01"
                }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], json!(stored.id));
        assert_eq!(body["category"], "software");
        assert_eq!(body["tax_deductible"], true);
        assert_eq!(body["confidence"], json!(0.9));
        assert_eq!(body["estimated_tax_savings"], json!(30.0));
    }

    #[tokio::test]
    async fn test_add_expense_fallback_when_categorizer_unavailable() {
        let user = user_model("ledger@example.com");
        let stored = entry_model(user.id, "uncategorized", Decimal::ZERO);
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_query_results([[stored]])
            .into_connection();

        let response = send(
            state_with(db),
            json_request(
                "POST",
                "/api/smart-ledger/add-expense",
                &json!({ "user_id": user.id, "amount": 4.5, "description": "Coffee" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["category"], "uncategorized");
        assert_eq!(body["tax_deductible"], false);
        assert_eq!(body["confidence"], json!(0.0));
        assert_eq!(body["estimated_tax_savings"], json!(0.0));
    }

    #[tokio::test]
    async fn test_list_expenses() {
        let user = user_model("ledger@example.com");
        let entries = vec![
            entry_model(user.id, "travel", dec!(0.8)),
            entry_model(user.id, "meals", dec!(0.6)),
        ];
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_query_results([entries])
            .into_connection();

        let response = send(
            state_with(db),
            get(&format!("/api/smart-ledger/expenses/{}", user.id)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let expenses = body["expenses"].as_array().unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0]["category"], "travel");
        assert_eq!(expenses[0]["amount"], json!(25.0));
    }

    #[tokio::test]
    async fn test_tax_readiness_empty() {
        let user = user_model("ledger@example.com");
        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_query_results([Vec::<ledger_entries::Model>::new()])
            .into_connection();

        let response = send(
            state_with(db),
            get(&format!("/api/smart-ledger/tax-readiness/{}", user.id)),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["score"], json!(0.0));
        assert_eq!(body["total_count"], 0);
        assert_eq!(body["message"], "No expenses tracked yet");
    }

    #[tokio::test]
    async fn test_tax_readiness_scores_entries() {
        let user = user_model("ledger@example.com");
        let mut entries: Vec<_> = (0..6)
            .map(|_| entry_model(user.id, "software", dec!(0.9)))
            .collect();
        entries.extend((0..2).map(|_| entry_model(user.id, "uncategorized", dec!(0.8))));
        entries.extend((0..2).map(|_| entry_model(user.id, "uncategorized", dec!(0.1))));

        let db = mock_db()
            .append_query_results([[user.clone()]])
            .append_query_results([entries])
            .into_connection();

        let response = send(
            state_with(db),
            get(&format!("/api/smart-ledger/tax-readiness/{}", user.id)),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["score"], json!(68.0));
        assert_eq!(body["categorized_count"], 6);
        assert_eq!(body["band"], "more_work_needed");
    }
}
