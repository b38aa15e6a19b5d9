//! Smart ledger: expense categories, categorization results and the
//! tax-readiness score.

pub mod categorization;
pub mod category;
pub mod entry;
pub mod readiness;


pub use categorization::{
    CONFIDENCE_SCALE, Categorization, CategorizationError, estimate_tax_savings,
};
pub use category::ExpenseCategory;
pub use entry::{AmountError, LedgerEntry, check_amount};
pub use readiness::{
    CONFIDENCE_THRESHOLD, ReadinessBand, ReadinessReport, score as readiness_score,
};
