//! Error to response mapping.
//!
//! Handlers return `Result<_, ApiError>`. Every domain and repository error
//! converts into the shared [`AppError`] taxonomy here, and the status code
//! is chosen only in [`IntoResponse`].

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fylr_core::auth::PasswordError;
use fylr_core::forms::FormError;
use fylr_core::ledger::AmountError;
use fylr_core::profile::ProfileError;
use fylr_db::{TaxFormError, UserError};
use fylr_shared::types::tier::ParseTierError;
use fylr_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use validator::ValidationErrors;

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with `message`.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 401 with `message`.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 404 with `message`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 500 with `message`; the message is logged, not returned.
    pub fn internal(message: impl Into<String>) -> Self {
        Self(AppError::Internal(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            match &self.0 {
                AppError::Unauthorized(m)
                | AppError::Forbidden(m)
                | AppError::NotFound(m)
                | AppError::Validation(m)
                | AppError::Database(m)
                | AppError::Internal(m) => m.clone(),
            }
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        Self(AppError::Database(e.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self::internal(e.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(e: JwtError) -> Self {
        Self::internal(e.to_string())
    }
}

impl From<FormError> for ApiError {
    fn from(e: FormError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<AmountError> for ApiError {
    fn from(e: AmountError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<ProfileError> for ApiError {
    fn from(e: ProfileError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<ParseTierError> for ApiError {
    fn from(e: ParseTierError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<TaxFormError> for ApiError {
    fn from(e: TaxFormError) -> Self {
        match e {
            TaxFormError::NotFound(_) => Self::not_found("Form not found"),
            TaxFormError::UserNotFound(_) => Self::not_found("User not found"),
            TaxFormError::Form(e) => e.into(),
            TaxFormError::CorruptData(e) => Self::internal(e.to_string()),
            TaxFormError::Database(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => Self::not_found("User not found"),
            UserError::EmailTaken => Self::validation("Email already registered"),
            UserError::Profile(e) => Self::internal(e.to_string()),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        let mut fields: Vec<_> = e.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| {
                    err.message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}
