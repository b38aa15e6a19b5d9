//! Shared types, errors, and configuration for fylr.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Subscription tiers
//! - Application-wide error types
//! - Configuration management
//! - JWT issuance and validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, JwtConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
