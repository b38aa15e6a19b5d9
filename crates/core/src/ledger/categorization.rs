//! Categorizer judgments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::ExpenseCategory;

/// Share of a deductible amount assumed saved in tax.
const ESTIMATED_TAX_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Decimal places kept on confidence, matching the stored column.
pub const CONFIDENCE_SCALE: u32 = 3;

/// Errors raised while accepting a categorizer judgment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategorizationError {
    /// Category outside the closed set.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Confidence outside `[0, 1]`.
    #[error("confidence out of range: {0}")]
    ConfidenceOutOfRange(Decimal),
}

/// A categorizer's judgment about one expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    /// Assigned category.
    pub category: ExpenseCategory,
    /// Whether the expense is tax deductible.
    pub tax_deductible: bool,
    /// Confidence in `[0, 1]`.
    #[serde(with = "rust_decimal::serde::float")]
    pub confidence: Decimal,
    /// Short explanation.
    pub reasoning: String,
}

impl Categorization {
    /// Result used whenever the categorizer cannot produce a judgment.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            category: ExpenseCategory::Uncategorized,
            tax_deductible: false,
            confidence: Decimal::ZERO,
            reasoning: "Automatic categorization unavailable".to_string(),
        }
    }

    /// Builds a judgment from raw categorizer output.
    ///
    /// `Personal` and `Uncategorized` are never deductible regardless of the
    /// flag supplied. Confidence is rounded to [`CONFIDENCE_SCALE`] places so
    /// the value reported, stored and scored is the same.
    pub fn validated(
        category: &str,
        tax_deductible: bool,
        confidence: Decimal,
        reasoning: impl Into<String>,
    ) -> Result<Self, CategorizationError> {
        let category: ExpenseCategory = category
            .parse()
            .map_err(|_| CategorizationError::UnknownCategory(category.to_string()))?;

        if confidence < Decimal::ZERO || confidence > Decimal::ONE {
            return Err(CategorizationError::ConfidenceOutOfRange(confidence));
        }

        Ok(Self {
            category,
            tax_deductible: tax_deductible && !category.deductible_percentage().is_zero(),
            confidence: confidence.round_dp(CONFIDENCE_SCALE),
            reasoning: reasoning.into(),
        })
    }

    /// Returns true unless the category is the fallback.
    #[must_use]
    pub fn is_categorized(&self) -> bool {
        self.category != ExpenseCategory::Uncategorized
    }

    /// Estimated tax saved by this expense.
    #[must_use]
    pub fn estimated_tax_savings(&self, amount: Decimal) -> Decimal {
        if self.tax_deductible {
            estimate_tax_savings(amount, self.category)
        } else {
            Decimal::ZERO
        }
    }
}

/// `amount × deductible% × 25%`, rounded to cents.
#[must_use]
pub fn estimate_tax_savings(amount: Decimal, category: ExpenseCategory) -> Decimal {
    (amount * category.deductible_percentage() / Decimal::ONE_HUNDRED * ESTIMATED_TAX_RATE)
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fallback_is_uncategorized() {
        let fallback = Categorization::fallback();
        assert_eq!(fallback.category, ExpenseCategory::Uncategorized);
        assert!(!fallback.tax_deductible);
        assert_eq!(fallback.confidence, Decimal::ZERO);
        assert!(!fallback.is_categorized());
    }

    #[test]
    fn test_validated_accepts_known_category() {
        let result = Categorization::validated("software", true, dec!(0.92), "IDE license").unwrap();
        assert_eq!(result.category, ExpenseCategory::Software);
        assert!(result.tax_deductible);
        assert!(result.is_categorized());
    }

    #[test]
    fn test_validated_rejects_unknown_category() {
        let err = Categorization::validated("groceries", true, dec!(0.5), "").unwrap_err();
        assert_eq!(err, CategorizationError::UnknownCategory("groceries".into()));
    }

    #[test]
    fn test_validated_rejects_confidence_out_of_range() {
        assert!(Categorization::validated("travel", true, dec!(1.01), "").is_err());
        assert!(Categorization::validated("travel", true, dec!(-0.1), "").is_err());
        assert!(Categorization::validated("travel", true, Decimal::ONE, "").is_ok());
    }

    #[test]
    fn test_validated_rounds_confidence_to_stored_scale() {
        let result = Categorization::validated("travel", true, dec!(0.7004), "").unwrap();
        assert_eq!(result.confidence, dec!(0.700));
        assert!(result.confidence <= crate::ledger::CONFIDENCE_THRESHOLD);

        let result = Categorization::validated("travel", true, dec!(0.7006), "").unwrap();
        assert_eq!(result.confidence, dec!(0.701));
        assert!(result.confidence > crate::ledger::CONFIDENCE_THRESHOLD);

        let result = Categorization::validated("travel", true, dec!(0.99996), "").unwrap();
        assert_eq!(result.confidence, Decimal::ONE);
    }

    #[test]
    fn test_personal_never_deductible() {
        let result = Categorization::validated("personal", true, dec!(0.8), "").unwrap();
        assert!(!result.tax_deductible);
    }

    #[test]
    fn test_estimate_tax_savings() {
        assert_eq!(estimate_tax_savings(dec!(100), ExpenseCategory::Software), dec!(25));
        assert_eq!(estimate_tax_savings(dec!(100), ExpenseCategory::Meals), dec!(12.5));
        assert_eq!(estimate_tax_savings(dec!(100), ExpenseCategory::Personal), dec!(0));
    }

    #[test]
    fn test_savings_zero_when_not_deductible() {
        let result = Categorization::validated("software", false, dec!(0.9), "").unwrap();
        assert_eq!(result.estimated_tax_savings(dec!(100)), Decimal::ZERO);
    }
}
