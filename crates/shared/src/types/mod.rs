//! Common types used across the application.

pub mod id;
pub mod tier;

pub use id::*;
pub use tier::{ParseTierError, Tier};
