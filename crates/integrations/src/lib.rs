//! External collaborators for fylr.
//!
//! Each collaborator sits behind a trait so handlers can be exercised with
//! stubs. The production implementations never fail outward: when the remote
//! service is unconfigured, unreachable or returns something unusable they
//! log a warning and return a documented default.
//!
//! - [`ExpenseCategorizer`] - assigns a category to an expense
//! - [`GuidanceAdvisor`] - suggests next steps for a tax form
//! - [`BillingProvider`] - creates paid subscriptions

pub mod billing;
pub mod categorizer;
pub mod error;
pub mod guidance;
pub mod openai;

pub use billing::{BillingProvider, StripeBilling, SubscriptionOutcome, SubscriptionStatus};
pub use categorizer::{ExpenseCategorizer, LlmExpenseCategorizer};
pub use error::IntegrationError;
pub use guidance::{GuidanceAdvisor, LlmGuidanceAdvisor};
pub use openai::OpenAiClient;
