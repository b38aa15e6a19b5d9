//! Submitted form field values.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::FormError;
use super::template::{FieldKind, FormTemplate};

/// Field values keyed by qualified `section.field` path.
///
/// Values are JSON scalars. `null` and `""` mean "not answered" for every kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, Value>);

impl FormData {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document with every template field set to `""`.
    #[must_use]
    pub fn blank(template: &FormTemplate) -> Self {
        Self(
            template
                .fields()
                .map(|(key, _, _)| (key, Value::String(String::new())))
                .collect(),
        )
    }

    /// Returns the value stored under a qualified key.
    #[must_use]
    pub fn get(&self, qualified_key: &str) -> Option<&Value> {
        self.0.get(qualified_key)
    }

    /// Sets a value, returning the previous one.
    pub fn insert(&mut self, qualified_key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(qualified_key.into(), value)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Checks every stored key and value against the template.
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownField` for keys outside the template and
    /// `FormError::InvalidValue` for values that do not fit the field kind.
    pub fn validate(&self, template: &FormTemplate) -> Result<(), FormError> {
        for (key, value) in &self.0 {
            let field = template
                .field(key)
                .ok_or_else(|| FormError::UnknownField(key.clone()))?;
            check_value(&field.kind, value).map_err(|reason| FormError::InvalidValue {
                field: key.clone(),
                reason: reason.to_string(),
            })?;
        }
        Ok(())
    }
}

impl FromIterator<(String, Value)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn is_unanswered(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn check_value(kind: &FieldKind, value: &Value) -> Result<(), &'static str> {
    if is_unanswered(value) {
        return Ok(());
    }
    match (kind, value) {
        (_, Value::Array(_) | Value::Object(_)) => Err("expected a single value"),
        (FieldKind::Text, Value::String(_))
        | (FieldKind::Checkbox, Value::Bool(_))
        | (FieldKind::Currency | FieldKind::Number, Value::Number(_)) => Ok(()),
        (FieldKind::Currency | FieldKind::Number, Value::String(s)) => {
            let digits = s.trim().trim_start_matches('$').replace(',', "");
            Decimal::from_str(&digits)
                .map(|_| ())
                .map_err(|_| "expected a number")
        }
        (FieldKind::Date, Value::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| "expected a YYYY-MM-DD date"),
        (FieldKind::Select { options }, Value::String(s)) => {
            if options.iter().any(|o| o == s.trim()) {
                Ok(())
            } else {
                Err("not one of the allowed options")
            }
        }
        (FieldKind::Checkbox, _) => Err("expected true or false"),
        (FieldKind::Currency | FieldKind::Number, _) => Err("expected a number"),
        (FieldKind::Text | FieldKind::Date | FieldKind::Select { .. }, _) => {
            Err("expected a string")
        }
    }
}
