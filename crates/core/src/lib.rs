//! Core business logic for fylr.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing
//! - `forms` - Tax form templates, field-value validation and completion scoring
//! - `ledger` - Expense categories, categorization results and tax-readiness scoring
//! - `profile` - Business profile schema
//! - `subscription` - Tier plans and upgrade prompts

pub mod auth;
pub mod forms;
pub mod ledger;
pub mod profile;
pub mod subscription;
