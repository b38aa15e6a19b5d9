//! Form completion scoring.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::data::FormData;
use super::template::FormTemplate;

/// Returns true if a value counts as answered: non-null, non-empty, non-zero.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        // Numbers outside Decimal's range are certainly non-zero.
        Value::Number(n) => {
            let text = n.to_string();
            let parsed = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text));
            !matches!(parsed, Ok(d) if d.is_zero())
        }
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Computes the completion percentage of a form.
///
/// The denominator is every field of the template; the numerator counts
/// fields whose qualified `section.field` key holds a truthy value. Keys
/// outside the template never count. The result is in `[0, 100]`, rounded
/// to two decimal places; an empty template scores 0.
#[must_use]
pub fn compute_completion(template: &FormTemplate, data: &FormData) -> Decimal {
    let total = template.field_count();
    if total == 0 {
        return Decimal::ZERO;
    }

    let completed = template
        .fields()
        .filter(|(key, _, _)| data.get(key).is_some_and(is_truthy))
        .count();

    (Decimal::from(completed) / Decimal::from(total) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Lists qualified keys of fields that are not yet answered, in template order.
#[must_use]
pub fn missing_fields(template: &FormTemplate, data: &FormData) -> Vec<String> {
    template
        .fields()
        .filter(|(key, _, _)| !data.get(key).is_some_and(is_truthy))
        .map(|(key, _, _)| key)
        .collect()
}
