//! Assignment configuration as received from storage or an assignment file.
//!
//! Values arrive from untrusted documents, so numeric fields are read
//! leniently: numbers and numeric strings are accepted, anything else reads as
//! missing and later falls back to the template default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PracticeError;

/// Smallest number of questions a practice set may contain.
pub const MIN_QUESTION_COUNT: usize = 5;
/// Largest number of questions a practice set may contain.
pub const MAX_QUESTION_COUNT: usize = 60;
/// Question count used when the configuration does not give one.
pub const DEFAULT_QUESTION_COUNT: usize = 10;
/// Largest supported number of decimal places in rounded answers.
pub const MAX_DECIMAL_PLACES: u32 = 3;

/// Configuration record describing one assignment instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeAssignmentConfig {
    /// Which question family to generate.
    #[serde(default, deserialize_with = "lenient_template_id")]
    pub template_id: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade_level: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_count: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_range_min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_range_max: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_max: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub multiplicand_min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub multiplicand_max: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub denominator_min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub denominator_max: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub decimal_places: Option<f64>,
    /// Retry policy, enforced by whoever stores student progress.
    #[serde(default, deserialize_with = "lenient_policy")]
    pub attempt_policy: AttemptPolicy,
}

impl PracticeAssignmentConfig {
    /// A configuration for `template_id` with every bound left to defaults.
    pub fn for_template(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            ..Default::default()
        }
    }

    /// The number of questions that will actually be generated.
    pub fn effective_question_count(&self) -> usize {
        match self.question_count {
            Some(n) if n.is_finite() => {
                let n = n.trunc();
                if n <= MIN_QUESTION_COUNT as f64 {
                    MIN_QUESTION_COUNT
                } else if n >= MAX_QUESTION_COUNT as f64 {
                    MAX_QUESTION_COUNT
                } else {
                    n as usize
                }
            }
            _ => DEFAULT_QUESTION_COUNT,
        }
    }

    /// Decimal places for rounded answers, falling back to `default`.
    pub fn effective_decimal_places(&self, default: u32) -> u32 {
        match self.decimal_places {
            Some(p) if p.is_finite() => p.trunc().clamp(0.0, MAX_DECIMAL_PLACES as f64) as u32,
            _ => default,
        }
    }
}

/// Whether a student may retry an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptPolicy {
    /// Only the first attempt counts; no retries.
    Once,
    /// Any number of attempts.
    #[default]
    Unlimited,
}

impl AttemptPolicy {
    /// Whether another attempt is permitted after `completed_attempts`.
    pub fn allows_attempt(self, completed_attempts: u32) -> bool {
        match self {
            AttemptPolicy::Once => completed_attempts == 0,
            AttemptPolicy::Unlimited => true,
        }
    }
}

impl fmt::Display for AttemptPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptPolicy::Once => write!(f, "once"),
            AttemptPolicy::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl FromStr for AttemptPolicy {
    type Err = PracticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "once" => Ok(AttemptPolicy::Once),
            "unlimited" => Ok(AttemptPolicy::Unlimited),
            other => Err(PracticeError::UnknownAttemptPolicy(other.to_string())),
        }
    }
}

/// Interpret a loosely typed value as a finite number.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Accept a number or numeric string; anything else becomes `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Accept a string or a number rendered as text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept any scalar as a template id; other values read as an empty
/// (unknown) id rather than failing the record.
pub(crate) fn lenient_template_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Unknown policies fall back to the default instead of failing the record.
pub(crate) fn lenient_policy<'de, D>(deserializer: D) -> Result<AttemptPolicy, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s.parse().unwrap_or_default(),
        _ => AttemptPolicy::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_json() {
        let json = r#"{
            "templateId": "math-multiplication-facts",
            "subject": "math",
            "gradeLevel": 3,
            "questionCount": 24,
            "tableMin": 1,
            "tableMax": "12",
            "attemptPolicy": "once"
        }"#;
        let config: PracticeAssignmentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.template_id, "math-multiplication-facts");
        assert_eq!(config.grade_level.as_deref(), Some("3"));
        assert_eq!(config.question_count, Some(24.0));
        assert_eq!(config.table_max, Some(12.0));
        assert_eq!(config.attempt_policy, AttemptPolicy::Once);
    }

    #[test]
    fn garbage_numbers_read_as_missing() {
        let json = r#"{
            "templateId": "math-addition-facts",
            "numberRangeMin": "lots",
            "numberRangeMax": [1, 2],
            "questionCount": null,
            "attemptPolicy": "twice"
        }"#;
        let config: PracticeAssignmentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.number_range_min, None);
        assert_eq!(config.number_range_max, None);
        assert_eq!(config.question_count, None);
        assert_eq!(config.attempt_policy, AttemptPolicy::Unlimited);
    }

    #[test]
    fn non_string_template_ids_read_as_unknown() {
        let config: PracticeAssignmentConfig =
            serde_json::from_str(r#"{"templateId": null, "questionCount": 5}"#).unwrap();
        assert_eq!(config.template_id, "");
        assert_eq!(config.question_count, Some(5.0));

        let config: PracticeAssignmentConfig =
            serde_json::from_str(r#"{"templateId": 7}"#).unwrap();
        assert_eq!(config.template_id, "7");

        let config: PracticeAssignmentConfig =
            serde_json::from_str(r#"{"templateId": ["math-addition-facts"]}"#).unwrap();
        assert_eq!(config.template_id, "");

        let config: PracticeAssignmentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.template_id, "");
    }

    #[test]
    fn question_count_is_clamped() {
        let mut config = PracticeAssignmentConfig::for_template("math-addition-facts");
        assert_eq!(config.effective_question_count(), DEFAULT_QUESTION_COUNT);
        config.question_count = Some(1.0);
        assert_eq!(config.effective_question_count(), 5);
        config.question_count = Some(500.0);
        assert_eq!(config.effective_question_count(), 60);
        config.question_count = Some(24.9);
        assert_eq!(config.effective_question_count(), 24);
        config.question_count = Some(-3.0);
        assert_eq!(config.effective_question_count(), 5);
    }

    #[test]
    fn decimal_places_are_clamped() {
        let mut config = PracticeAssignmentConfig::default();
        assert_eq!(config.effective_decimal_places(2), 2);
        config.decimal_places = Some(7.0);
        assert_eq!(config.effective_decimal_places(2), 3);
        config.decimal_places = Some(-1.0);
        assert_eq!(config.effective_decimal_places(2), 0);
    }

    #[test]
    fn attempt_policy_rules() {
        assert!(AttemptPolicy::Once.allows_attempt(0));
        assert!(!AttemptPolicy::Once.allows_attempt(1));
        assert!(AttemptPolicy::Unlimited.allows_attempt(42));
        assert_eq!("ONCE".parse::<AttemptPolicy>().unwrap(), AttemptPolicy::Once);
        assert_eq!(AttemptPolicy::Unlimited.to_string(), "unlimited");
        let err = "sometimes".parse::<AttemptPolicy>().unwrap_err();
        assert_eq!(err.value(), "sometimes");
    }

    #[test]
    fn serializes_without_missing_fields() {
        let config = PracticeAssignmentConfig::for_template("math-ratio");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"templateId\":\"math-ratio\""));
        assert!(!json.contains("tableMin"));
    }
}
