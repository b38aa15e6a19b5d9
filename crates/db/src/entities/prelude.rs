//! Entity re-exports.

pub use super::ledger_entries::Entity as LedgerEntries;
pub use super::tax_forms::Entity as TaxForms;
pub use super::users::Entity as Users;
