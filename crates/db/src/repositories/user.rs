//! User repository for database operations.

use fylr_core::profile::BusinessProfile;
use fylr_shared::types::Tier;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::SubscriptionTier, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Email already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// Profile could not be encoded.
    #[error("Invalid business profile: {0}")]
    Profile(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository for CRUD operations.
#[derive(Debug)]
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(self.db).await
    }

    /// Checks if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user on the trial tier with an empty profile.
    ///
    /// Returns [`UserError::EmailTaken`] if the email is already registered,
    /// including when a concurrent registration wins the unique constraint.
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<users::Model, UserError> {
        if self.email_exists(email).await? {
            return Err(UserError::EmailTaken);
        }

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::now_v7()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            business_profile: Set(serde_json::to_value(BusinessProfile::default())?),
            subscription_tier: Set(SubscriptionTier::Trial),
            stripe_customer_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::EmailTaken
            } else {
                UserError::Database(e)
            }
        })
    }

    /// Replaces a user's business profile.
    pub async fn update_profile(
        &self,
        id: Uuid,
        profile: &BusinessProfile,
    ) -> Result<users::Model, UserError> {
        let user = self.find_by_id(id).await?.ok_or(UserError::NotFound(id))?;

        let mut active = user.into_active_model();
        active.business_profile = Set(serde_json::to_value(profile)?);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    /// Sets the tier of the user with `email`, if one exists.
    pub async fn update_tier_by_email(
        &self,
        email: &str,
        tier: Tier,
        stripe_customer_id: Option<&str>,
    ) -> Result<Option<users::Model>, DbErr> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        let mut active = user.into_active_model();
        active.subscription_tier = Set(tier.into());
        if let Some(customer_id) = stripe_customer_id {
            active.stripe_customer_id = Set(Some(customer_id.to_string()));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(self.db).await.map(Some)
    }
}

/// Decodes a stored profile, falling back to an empty one if the stored
/// document does not match the schema.
#[must_use]
pub fn business_profile(user: &users::Model) -> BusinessProfile {
    serde_json::from_value(user.business_profile.clone()).unwrap_or_else(|e| {
        tracing::warn!(user_id = %user.id, error = %e, "Stored business profile is unreadable");
        BusinessProfile::default()
    })
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
