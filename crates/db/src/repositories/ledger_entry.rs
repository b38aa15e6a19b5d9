//! Smart ledger entry repository.

use fylr_core::ledger::{ExpenseCategory, LedgerEntry};
use fylr_shared::types::id::{LedgerEntryId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::ledger_entries;

/// Number of entries returned by [`LedgerEntryRepository::list_recent`].
pub const RECENT_LIMIT: u64 = 50;

/// Ledger entry repository. Entries are insert-only.
#[derive(Debug)]
pub struct LedgerEntryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LedgerEntryRepository<'a> {
    /// Creates a new ledger entry repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new entry.
    ///
    /// Amount and confidence are stored as given; callers pass values that
    /// passed `check_amount` and `Categorization::validated`.
    pub async fn create(
        &self,
        entry: &LedgerEntry,
        reasoning: Option<&str>,
    ) -> Result<ledger_entries::Model, DbErr> {
        let model = ledger_entries::ActiveModel {
            id: Set(entry.id.into_inner()),
            user_id: Set(entry.user_id.into_inner()),
            amount: Set(entry.amount),
            description: Set(entry.description.clone()),
            category: Set(entry.category.as_str().to_string()),
            tax_deductible: Set(entry.tax_deductible),
            confidence: Set(entry.confidence),
            reasoning: Set(reasoning.filter(|r| !r.is_empty()).map(ToString::to_string)),
            transaction_date: Set(entry.date.into()),
            created_at: Set(chrono::Utc::now().into()),
        };

        model.insert(self.db).await
    }

    /// Most recent entries for a user, newest first.
    pub async fn list_recent(&self, user_id: Uuid) -> Result<Vec<ledger_entries::Model>, DbErr> {
        ledger_entries::Entity::find()
            .filter(ledger_entries::Column::UserId.eq(user_id))
            .order_by_desc(ledger_entries::Column::TransactionDate)
            .order_by_desc(ledger_entries::Column::CreatedAt)
            .limit(RECENT_LIMIT)
            .all(self.db)
            .await
    }

    /// Every entry for a user, as domain values.
    pub async fn all_for_user(&self, user_id: Uuid) -> Result<Vec<LedgerEntry>, DbErr> {
        let models = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(into_domain).collect())
    }
}

/// Converts a stored row into a domain entry.
///
/// Unknown stored categories read as `Uncategorized`.
#[must_use]
pub fn into_domain(model: ledger_entries::Model) -> LedgerEntry {
    LedgerEntry {
        id: LedgerEntryId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        amount: model.amount,
        category: model
            .category
            .parse()
            .unwrap_or(ExpenseCategory::Uncategorized),
        description: model.description,
        tax_deductible: model.tax_deductible,
        confidence: model.confidence,
        date: model.transaction_date.into(),
    }
}
