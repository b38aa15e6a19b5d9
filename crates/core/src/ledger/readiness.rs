//! Tax-readiness scoring over a user's ledger entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::LedgerEntry;

/// Entries with confidence strictly above this count as confident.
pub const CONFIDENCE_THRESHOLD: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

const CATEGORIZATION_WEIGHT: Decimal = Decimal::from_parts(6, 0, 0, false, 1);
const CONFIDENCE_WEIGHT: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

/// Readiness band, checked from the highest threshold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
    /// Score ≥ 90.
    Excellent,
    /// 80 ≤ score < 90.
    GettingThere,
    /// 70 ≤ score < 80.
    GoodProgress,
    /// Score < 70.
    MoreWorkNeeded,
}

impl ReadinessBand {
    /// Maps a score to exactly one band.
    #[must_use]
    pub fn for_score(score: Decimal) -> Self {
        if score >= Decimal::from(90) {
            Self::Excellent
        } else if score >= Decimal::from(80) {
            Self::GettingThere
        } else if score >= Decimal::from(70) {
            Self::GoodProgress
        } else {
            Self::MoreWorkNeeded
        }
    }

    /// User-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! Your records are tax-ready.",
            Self::GettingThere => "Getting there! A few entries still need review.",
            Self::GoodProgress => "Good progress. Keep categorizing your expenses.",
            Self::MoreWorkNeeded => "More work needed. Review uncategorized expenses.",
        }
    }

    /// Suggested next actions.
    #[must_use]
    pub const fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::Excellent => &["Review quarterly for missed deductions"],
            Self::GettingThere => &[
                "Confirm low-confidence categorizations",
                "Keep receipts for major purchases",
            ],
            Self::GoodProgress => &[
                "Re-categorize uncategorized expenses",
                "Add clearer descriptions to new expenses",
            ],
            Self::MoreWorkNeeded => &[
                "Start tracking expenses regularly",
                "Review uncategorized expenses",
                "Separate business and personal spending",
            ],
        }
    }
}

/// Readiness score and the counts it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// Score in `[0, 100]`, one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
    /// Entries with a category other than `uncategorized`.
    pub categorized_count: usize,
    /// Entries with confidence above the threshold.
    pub confident_count: usize,
    /// All entries.
    pub total_count: usize,
    /// Absent when there are no entries.
    pub band: Option<ReadinessBand>,
    /// User-facing message.
    pub message: String,
    /// Suggested next actions.
    pub recommendations: Vec<String>,
}

/// Scores a user's entries.
///
/// `score = (categorized/total × 0.6 + confident/total × 0.4) × 100`,
/// rounded to one decimal place. No entries scores 0.
#[must_use]
pub fn score(entries: &[LedgerEntry]) -> ReadinessReport {
    let total_count = entries.len();
    if total_count == 0 {
        return ReadinessReport {
            score: Decimal::ZERO,
            categorized_count: 0,
            confident_count: 0,
            total_count: 0,
            band: None,
            message: "No expenses tracked yet".to_string(),
            recommendations: vec!["Add your first business expense".to_string()],
        };
    }

    let categorized_count = entries.iter().filter(|e| e.is_categorized()).count();
    let confident_count = entries
        .iter()
        .filter(|e| e.confidence > CONFIDENCE_THRESHOLD)
        .count();

    let score = score_from_counts(categorized_count, confident_count, total_count);
    let band = ReadinessBand::for_score(score);

    ReadinessReport {
        score,
        categorized_count,
        confident_count,
        total_count,
        band: Some(band),
        message: band.message().to_string(),
        recommendations: band
            .recommendations()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Weighted score from raw counts; `total` must be non-zero.
pub(crate) fn score_from_counts(categorized: usize, confident: usize, total: usize) -> Decimal {
    let total = Decimal::from(total);
    let categorization_rate = Decimal::from(categorized) / total;
    let confidence_rate = Decimal::from(confident) / total;

    ((categorization_rate * CATEGORIZATION_WEIGHT + confidence_rate * CONFIDENCE_WEIGHT)
        * Decimal::ONE_HUNDRED)
        .round_dp(1)
}
