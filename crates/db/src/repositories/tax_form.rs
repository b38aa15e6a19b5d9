//! Tax form repository.
//!
//! One form exists per `(user_id, form_type)`. Field values are stored as a
//! JSON document and the completion percentage is recomputed from the
//! template on every write.

use fylr_core::forms::{FormData, FormError, FormType, compute_completion, template_for};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{tax_forms, users};

/// Error types for tax form operations.
#[derive(Debug, thiserror::Error)]
pub enum TaxFormError {
    /// Form not found.
    #[error("Tax form not found: {0}")]
    NotFound(Uuid),

    /// Owning user not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Submitted data does not fit the template.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Stored document could not be decoded.
    #[error("Corrupt form data: {0}")]
    CorruptData(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of [`TaxFormRepository::get_or_create`].
#[derive(Debug, Clone)]
pub struct FormRecord {
    /// Stored row.
    pub model: tax_forms::Model,
    /// Decoded field values.
    pub data: FormData,
    /// True if this call inserted the row.
    pub created: bool,
}

/// Tax form repository.
#[derive(Debug)]
pub struct TaxFormRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaxFormRepository<'a> {
    /// Creates a new tax form repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's forms.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<tax_forms::Model>, DbErr> {
        tax_forms::Entity::find()
            .filter(tax_forms::Column::UserId.eq(user_id))
            .all(self.db)
            .await
    }

    /// Returns the user's form of this type, creating a blank one first if
    /// none exists.
    ///
    /// Concurrent calls never create duplicates: the insert is skipped on
    /// conflict and the surviving row is re-read, so every caller sees the
    /// same row and its data unchanged.
    pub async fn get_or_create(
        &self,
        user_id: Uuid,
        form_type: FormType,
    ) -> Result<FormRecord, TaxFormError> {
        let template = template_for(form_type);
        let txn = self.db.begin().await?;

        if users::Entity::find_by_id(user_id).one(&txn).await?.is_none() {
            return Err(TaxFormError::UserNotFound(user_id));
        }

        let blank = FormData::blank(template);
        let now = chrono::Utc::now().into();
        let form = tax_forms::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            form_type: Set(form_type.as_str().to_string()),
            template_version: Set(i32::try_from(template.version).unwrap_or(i32::MAX)),
            form_data: Set(serde_json::to_value(&blank)?),
            completion_percentage: Set(compute_completion(template, &blank)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = tax_forms::Entity::insert(form)
            .on_conflict(
                OnConflict::columns([tax_forms::Column::UserId, tax_forms::Column::FormType])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let model = tax_forms::Entity::find()
            .filter(tax_forms::Column::UserId.eq(user_id))
            .filter(tax_forms::Column::FormType.eq(form_type.as_str()))
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("tax form {form_type} for {user_id}")))?;

        txn.commit().await?;

        let data = serde_json::from_value(model.form_data.clone())?;
        Ok(FormRecord {
            model,
            data,
            created: inserted > 0,
        })
    }

    /// Validates and stores new field values, recomputing completion.
    ///
    /// The submitted document replaces the stored one.
    pub async fn update_data(
        &self,
        id: Uuid,
        data: &FormData,
    ) -> Result<tax_forms::Model, TaxFormError> {
        let txn = self.db.begin().await?;

        let form = tax_forms::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(TaxFormError::NotFound(id))?;

        let form_type: FormType = form.form_type.parse()?;
        let template = template_for(form_type);
        data.validate(template)?;

        let mut active = form.into_active_model();
        active.form_data = Set(serde_json::to_value(data)?);
        active.completion_percentage = Set(compute_completion(template, data));
        active.template_version = Set(i32::try_from(template.version).unwrap_or(i32::MAX));
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }
}
