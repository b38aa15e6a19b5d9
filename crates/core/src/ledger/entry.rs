//! Ledger entry domain type.

use chrono::{DateTime, Utc};
use fylr_shared::types::id::{LedgerEntryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::categorization::Categorization;
use super::category::ExpenseCategory;

/// Decimal places an amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Exclusive upper bound on amounts, the range of `NUMERIC(15, 2)`.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);

/// Reasons an expense amount is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// Zero or negative.
    #[error("amount must be positive")]
    NotPositive,

    /// More than two decimal places.
    #[error("amount must have at most 2 decimal places")]
    TooPrecise,

    /// Does not fit the stored range.
    #[error("amount must be less than 10000000000000")]
    TooLarge,
}

/// Checks an expense amount is a positive whole number of cents within range.
pub fn check_amount(amount: Decimal) -> Result<Decimal, AmountError> {
    if amount <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(AmountError::TooPrecise);
    }
    if amount >= AMOUNT_LIMIT {
        return Err(AmountError::TooLarge);
    }
    Ok(amount)
}

/// A recorded expense with its derived categorization.
///
/// Entries are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry ID.
    pub id: LedgerEntryId,
    /// Owning user.
    pub user_id: UserId,
    /// Expense amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Derived category.
    pub category: ExpenseCategory,
    /// Derived deductibility.
    pub tax_deductible: bool,
    /// Derived confidence in `[0, 1]`.
    #[serde(with = "rust_decimal::serde::float")]
    pub confidence: Decimal,
    /// Transaction date.
    pub date: DateTime<Utc>,
}

impl LedgerEntry {
    /// Builds a new entry from a categorizer judgment.
    #[must_use]
    pub fn record(
        user_id: UserId,
        amount: Decimal,
        description: impl Into<String>,
        categorization: &Categorization,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::new(),
            user_id,
            amount,
            description: description.into(),
            category: categorization.category,
            tax_deductible: categorization.tax_deductible,
            confidence: categorization.confidence,
            date,
        }
    }

    /// Returns true unless the category is the fallback.
    #[must_use]
    pub fn is_categorized(&self) -> bool {
        self.category != ExpenseCategory::Uncategorized
    }
}
