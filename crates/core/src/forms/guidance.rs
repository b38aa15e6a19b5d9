//! Form completion guidance payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::completion::missing_fields;
use super::data::FormData;
use super::template::{FormTemplate, FormType};

/// Maximum number of next steps listed in template-derived guidance.
pub const MAX_FALLBACK_STEPS: usize = 5;

/// Guidance for completing a tax form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormGuidance {
    /// Concrete next actions.
    pub next_steps: Vec<String>,
    /// Deduction or strategy recommendations.
    pub recommendations: Vec<String>,
    /// Audit-risk or compliance warnings.
    pub warnings: Vec<String>,
    /// Estimated tax savings in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_savings: Decimal,
    /// Confidence in the guidance, 0 to 1.
    #[serde(with = "rust_decimal::serde::float")]
    pub confidence: Decimal,
    /// Whether the text-generation service produced this guidance.
    #[serde(default)]
    pub ai_generated: bool,
}

impl FormGuidance {
    /// Builds guidance from the template alone, used when the text-generation
    /// service is unavailable.
    #[must_use]
    pub fn from_template(template: &FormTemplate, data: &FormData) -> Self {
        let missing = missing_fields(template, data);
        let mut next_steps: Vec<String> = missing
            .iter()
            .take(MAX_FALLBACK_STEPS)
            .filter_map(|key| {
                let (section_name, _) = key.split_once('.')?;
                let section = template.sections.iter().find(|s| s.name == section_name)?;
                let field = template.field(key)?;
                Some(format!("Complete \"{}\" in {}", field.label, section.title))
            })
            .collect();
        if missing.is_empty() {
            next_steps.push("Review your entries and export the completed form".to_string());
        }

        Self {
            next_steps,
            recommendations: default_recommendations(template.form_type),
            warnings: vec!["Keep business and personal expenses separate".to_string()],
            estimated_savings: Decimal::ZERO,
            confidence: Decimal::ZERO,
            ai_generated: false,
        }
    }
}

fn default_recommendations(form_type: FormType) -> Vec<String> {
    let items: &[&str] = match form_type {
        FormType::ScheduleC => &[
            "Consider the home office deduction if part of your home is used exclusively for business",
            "Track business meals; they are generally 50% deductible",
        ],
        FormType::ScheduleSe => &[
            "Self-employment tax applies once net earnings reach $400",
            "Half of self-employment tax is deductible on Form 1040",
        ],
        FormType::Form1099Nec => &["File a 1099-NEC for each contractor paid $600 or more"],
    };
    items.iter().map(|s| (*s).to_string()).collect()
}
