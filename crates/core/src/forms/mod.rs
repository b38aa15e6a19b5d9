//! Tax form templates, field values and completion scoring.
//!
//! A template is an ordered list of sections, each an ordered list of
//! fields. Submitted values live in a flat map keyed by the qualified
//! `section.field` path.

pub mod completion;
pub mod data;
pub mod error;
pub mod guidance;
pub mod registry;
pub mod template;


pub use completion::{compute_completion, is_truthy, missing_fields};
pub use data::FormData;
pub use error::FormError;
pub use guidance::FormGuidance;
pub use registry::{all_templates, template_for};
pub use template::{Field, FieldKind, FormTemplate, FormType, Section};
