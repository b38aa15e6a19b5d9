//! Form template schema.

use serde::{Deserialize, Serialize};

use super::error::FormError;

/// Supported tax form types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Schedule C - Profit or Loss From Business.
    #[serde(rename = "schedule_c")]
    ScheduleC,
    /// Schedule SE - Self-Employment Tax.
    #[serde(rename = "schedule_se")]
    ScheduleSe,
    /// Form 1099-NEC - Nonemployee Compensation.
    #[serde(rename = "1099nec")]
    Form1099Nec,
}

impl FormType {
    /// All supported form types.
    pub const ALL: [Self; 3] = [Self::ScheduleC, Self::ScheduleSe, Self::Form1099Nec];

    /// Returns the wire name of the form type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScheduleC => "schedule_c",
            Self::ScheduleSe => "schedule_se",
            Self::Form1099Nec => "1099nec",
        }
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|form_type| form_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnsupportedFormType(s.to_string()))
    }
}

/// Kind of value a field accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Dollar amount.
    Currency,
    /// Plain number (areas, miles, codes).
    Number,
    /// ISO-8601 calendar date.
    Date,
    /// Yes/no.
    Checkbox,
    /// One of a fixed set of options.
    Select {
        /// Allowed values.
        options: Vec<String>,
    },
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within its section.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Accepted value kind.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Creates a free-text field.
    #[must_use]
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Creates a currency field.
    #[must_use]
    pub fn currency(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Currency)
    }

    /// Creates a number field.
    #[must_use]
    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Creates a checkbox field.
    #[must_use]
    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// Creates a select field.
    #[must_use]
    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select {
                options: options.iter().map(|o| (*o).to_string()).collect(),
            },
        )
    }
}

/// A named, ordered group of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section name; the prefix of qualified keys.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// Ordered fields.
    pub fields: Vec<Field>,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(name: &str, title: &str, fields: Vec<Field>) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            fields,
        }
    }
}

/// Static schema defining what "complete" means for a form type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTemplate {
    /// Form type this template describes.
    pub form_type: FormType,
    /// Schema version; bumped whenever sections or fields change.
    pub version: u32,
    /// Form title.
    pub title: String,
    /// Ordered sections.
    pub sections: Vec<Section>,
}

impl FormTemplate {
    /// Builds the qualified key for a field.
    #[must_use]
    pub fn qualified_key(section: &str, field: &str) -> String {
        format!("{section}.{field}")
    }

    /// Total number of fields across all sections.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Iterates `(qualified_key, section, field)` in template order.
    pub fn fields(&self) -> impl Iterator<Item = (String, &Section, &Field)> {
        self.sections.iter().flat_map(|section| {
            section
                .fields
                .iter()
                .map(move |field| (Self::qualified_key(&section.name, &field.name), section, field))
        })
    }

    /// Looks up a field by its qualified key.
    #[must_use]
    pub fn field(&self, qualified_key: &str) -> Option<&Field> {
        let (section_name, field_name) = qualified_key.split_once('.')?;
        self.sections
            .iter()
            .find(|s| s.name == section_name)?
            .fields
            .iter()
            .find(|f| f.name == field_name)
    }
}
