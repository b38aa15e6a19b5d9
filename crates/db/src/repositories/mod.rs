//! Repository layer for database operations.

pub mod ledger_entry;
pub mod tax_form;
pub mod user;

pub use ledger_entry::LedgerEntryRepository;
pub use tax_form::{FormRecord, TaxFormError, TaxFormRepository};
pub use user::{UserError, UserRepository, business_profile};
