//! Expense categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of expense categories the categorizer may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// General business expense.
    BusinessExpense,
    /// Office supplies.
    OfficeSupplies,
    /// Travel.
    Travel,
    /// Business meals.
    Meals,
    /// Legal, accounting and other professional services.
    ProfessionalServices,
    /// Marketing and advertising.
    Marketing,
    /// Equipment purchases.
    Equipment,
    /// Software and subscriptions.
    Software,
    /// Utilities.
    Utilities,
    /// Personal, not deductible.
    Personal,
    /// Not yet categorized.
    Uncategorized,
}

impl ExpenseCategory {
    /// Categories the categorizer may choose from (excludes `Uncategorized`).
    pub const ASSIGNABLE: [Self; 10] = [
        Self::BusinessExpense,
        Self::OfficeSupplies,
        Self::Travel,
        Self::Meals,
        Self::ProfessionalServices,
        Self::Marketing,
        Self::Equipment,
        Self::Software,
        Self::Utilities,
        Self::Personal,
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BusinessExpense => "business_expense",
            Self::OfficeSupplies => "office_supplies",
            Self::Travel => "travel",
            Self::Meals => "meals",
            Self::ProfessionalServices => "professional_services",
            Self::Marketing => "marketing",
            Self::Equipment => "equipment",
            Self::Software => "software",
            Self::Utilities => "utilities",
            Self::Personal => "personal",
            Self::Uncategorized => "uncategorized",
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BusinessExpense => "Business Expense",
            Self::OfficeSupplies => "Office Supplies",
            Self::Travel => "Travel Expense",
            Self::Meals => "Business Meals",
            Self::ProfessionalServices => "Professional Services",
            Self::Marketing => "Marketing & Advertising",
            Self::Equipment => "Equipment Purchase",
            Self::Software => "Software & Subscriptions",
            Self::Utilities => "Utilities",
            Self::Personal => "Personal Expense",
            Self::Uncategorized => "Uncategorized",
        }
    }

    /// Share of the amount that is deductible, in percent.
    #[must_use]
    pub fn deductible_percentage(self) -> Decimal {
        match self {
            Self::Meals => Decimal::from(50),
            Self::Personal | Self::Uncategorized => Decimal::ZERO,
            _ => Decimal::ONE_HUNDRED,
        }
    }

    /// Schedule C line (or form) the expense is reported on, if any.
    #[must_use]
    pub const fn schedule_reference(self) -> Option<&'static str> {
        match self {
            Self::OfficeSupplies | Self::Software => Some("Schedule C, Line 18"),
            Self::Travel => Some("Schedule C, Line 24a"),
            Self::Meals => Some("Schedule C, Line 24b"),
            Self::ProfessionalServices => Some("Schedule C, Line 17"),
            Self::Marketing => Some("Schedule C, Line 8"),
            Self::Equipment => Some("Form 4562"),
            Self::Utilities => Some("Schedule C, Line 25"),
            Self::BusinessExpense => Some("Schedule C, Line 27a"),
            Self::Personal | Self::Uncategorized => None,
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ASSIGNABLE
            .into_iter()
            .chain([Self::Uncategorized])
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown expense category: {s}"))
    }
}
