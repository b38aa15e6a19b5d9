//! `SeaORM` entities.

pub mod prelude;

pub mod ledger_entries;
pub mod sea_orm_active_enums;
pub mod tax_forms;
pub mod users;
