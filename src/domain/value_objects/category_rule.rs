//! Category rules - the generation policy for one category
//!
//! The oracle owns the actual randomization; this side only needs to carry
//! rules around faithfully (echo them back on reroll, save them as
//! templates) and derive them from the settings panel.
//!
//! Rule kinds the oracle knows but this side does not are kept as they came
//! and echoed back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of generation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Always the same value
    Fixed,
    /// Any value of the category
    RandomFromCategory,
    /// A value from an explicit allow-list
    RandomFromList,
    /// An integer from a stepped range
    Range,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::RandomFromCategory => "random_from_category",
            Self::RandomFromList => "random_from_list",
            Self::Range => "range",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, RuleError> {
        match raw.trim() {
            "fixed" => Ok(Self::Fixed),
            "random_from_category" => Ok(Self::RandomFromCategory),
            "random_from_list" => Ok(Self::RandomFromList),
            "range" => Ok(Self::Range),
            other => Err(RuleError::UnknownKind(other.to_string())),
        }
    }

    /// Fixed and range rules always produce exactly one value
    pub fn uses_count(&self) -> bool {
        matches!(self, Self::RandomFromCategory | Self::RandomFromList)
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Unknown rule type '{0}'")]
    UnknownKind(String),
    #[error("Rule '{kind}' requires '{field}'")]
    MissingParameter { kind: RuleKind, field: &'static str },
    #[error("'{field}' must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("Count must be a positive number, got {0}")]
    InvalidCount(i64),
    #[error("No allowed values selected")]
    EmptyAllowedValues,
    #[error("Step must be a positive number")]
    NonPositiveStep,
    #[error("Min ({min}) cannot be greater than max ({max})")]
    InvertedRange { min: i64, max: i64 },
    #[error("Category is not included")]
    CategoryExcluded,
}

/// Stepped integer range, bounds inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

/// Rule-specific parameters; exactly one group exists per rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleParams {
    Fixed { value: String },
    RandomFromCategory,
    RandomFromList { allowed_values: Vec<String> },
    Range(NumericRange),
    /// A rule kind only the oracle understands, with its parameters as received
    Other {
        rule: String,
        fields: Map<String, Value>,
    },
}

impl RuleParams {
    /// `None` for rule kinds carried through opaquely
    pub fn kind(&self) -> Option<RuleKind> {
        match self {
            Self::Fixed { .. } => Some(RuleKind::Fixed),
            Self::RandomFromCategory => Some(RuleKind::RandomFromCategory),
            Self::RandomFromList { .. } => Some(RuleKind::RandomFromList),
            Self::Range(_) => Some(RuleKind::Range),
            Self::Other { .. } => None,
        }
    }

    /// Wire name of the rule
    pub fn name(&self) -> &str {
        match self {
            Self::Other { rule, .. } => rule,
            known => known.kind().map_or("", |kind| kind.as_str()),
        }
    }
}

/// Generation rule for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategoryRule", into = "RawCategoryRule")]
pub struct CategoryRule {
    /// Values produced per invocation
    pub count: u32,
    /// One generated sequence is shared by every player
    pub apply_all: bool,
    pub params: RuleParams,
}

impl CategoryRule {
    pub fn fixed(value: impl Into<String>) -> Self {
        Self {
            count: 1,
            apply_all: false,
            params: RuleParams::Fixed {
                value: value.into(),
            },
        }
    }

    pub fn random_from_category(count: u32) -> Self {
        Self {
            count,
            apply_all: false,
            params: RuleParams::RandomFromCategory,
        }
    }

    pub fn random_from_list<I, S>(allowed_values: I, count: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            count,
            apply_all: false,
            params: RuleParams::RandomFromList {
                allowed_values: allowed_values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn range(min: i64, max: i64, step: i64) -> Self {
        Self {
            count: 1,
            apply_all: false,
            params: RuleParams::Range(NumericRange { min, max, step }),
        }
    }

    pub fn with_apply_all(mut self, apply_all: bool) -> Self {
        self.apply_all = apply_all;
        self
    }

    pub fn kind(&self) -> Option<RuleKind> {
        self.params.kind()
    }

    pub fn rule_name(&self) -> &str {
        self.params.name()
    }

    pub fn is_shared(&self) -> bool {
        self.apply_all
    }

    /// Semantic checks the wire format does not enforce
    pub fn validate(&self) -> Result<(), RuleError> {
        match &self.params {
            RuleParams::Fixed { value } if value.trim().is_empty() => {
                Err(RuleError::MissingParameter {
                    kind: RuleKind::Fixed,
                    field: "value",
                })
            }
            RuleParams::RandomFromList { allowed_values } if allowed_values.is_empty() => {
                Err(RuleError::EmptyAllowedValues)
            }
            RuleParams::Range(range) if range.step <= 0 => Err(RuleError::NonPositiveStep),
            RuleParams::Range(range) if range.min > range.max => Err(RuleError::InvertedRange {
                min: range.min,
                max: range.max,
            }),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

/// Integer that may arrive as a JSON number or as a numeric string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Number(i64),
    Text(String),
}

impl LenientInt {
    fn to_json(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(text) => Value::String(text.clone()),
        }
    }

    fn resolve(&self, field: &'static str) -> Result<Option<i64>, RuleError> {
        match self {
            Self::Number(n) => Ok(Some(*n)),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| RuleError::NotANumber {
                    field,
                    value: text.clone(),
                }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawCategoryRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<LenientInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    apply_all: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<LenientInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<LenientInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    step: Option<LenientInt>,
    /// Anything else; only kept for opaque rules
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn resolve_field(
    raw: &Option<LenientInt>,
    field: &'static str,
) -> Result<Option<i64>, RuleError> {
    match raw {
        Some(value) => value.resolve(field),
        None => Ok(None),
    }
}

impl TryFrom<RawCategoryRule> for CategoryRule {
    type Error = RuleError;

    fn try_from(raw: RawCategoryRule) -> Result<Self, Self::Error> {
        let count = resolve_field(&raw.count, "count")?.unwrap_or(1);
        if count < 1 {
            return Err(RuleError::InvalidCount(count));
        }
        let count = u32::try_from(count).map_err(|_| RuleError::InvalidCount(count))?;
        let apply_all = raw.apply_all.unwrap_or(false);

        let kind = match raw.rule.as_deref() {
            None => RuleKind::RandomFromCategory,
            Some(rule) => match RuleKind::parse(rule) {
                Ok(kind) => kind,
                Err(_) => {
                    return Ok(Self {
                        count,
                        apply_all,
                        params: opaque_params(raw),
                    })
                }
            },
        };

        let params = match kind {
            RuleKind::Fixed => RuleParams::Fixed {
                value: raw.value.ok_or(RuleError::MissingParameter {
                    kind,
                    field: "value",
                })?,
            },
            RuleKind::RandomFromCategory => RuleParams::RandomFromCategory,
            RuleKind::RandomFromList => RuleParams::RandomFromList {
                allowed_values: raw.allowed_values.ok_or(RuleError::MissingParameter {
                    kind,
                    field: "allowed_values",
                })?,
            },
            RuleKind::Range => {
                let min = resolve_field(&raw.min, "min")?
                    .ok_or(RuleError::MissingParameter { kind, field: "min" })?;
                let max = resolve_field(&raw.max, "max")?
                    .ok_or(RuleError::MissingParameter { kind, field: "max" })?;
                let step = resolve_field(&raw.step, "step")?.unwrap_or(1);
                RuleParams::Range(NumericRange { min, max, step })
            }
        };

        Ok(Self {
            count,
            apply_all,
            params,
        })
    }
}

fn opaque_params(raw: RawCategoryRule) -> RuleParams {
    let mut fields = raw.extra;
    if let Some(value) = raw.value {
        fields.insert("value".to_string(), Value::String(value));
    }
    if let Some(allowed_values) = raw.allowed_values {
        fields.insert(
            "allowed_values".to_string(),
            Value::Array(allowed_values.into_iter().map(Value::String).collect()),
        );
    }
    for (name, number) in [("min", &raw.min), ("max", &raw.max), ("step", &raw.step)] {
        if let Some(number) = number {
            fields.insert(name.to_string(), number.to_json());
        }
    }
    RuleParams::Other {
        rule: raw.rule.unwrap_or_default(),
        fields,
    }
}

impl From<CategoryRule> for RawCategoryRule {
    fn from(rule: CategoryRule) -> Self {
        let mut raw = RawCategoryRule {
            rule: Some(rule.rule_name().to_string()),
            count: Some(LenientInt::Number(i64::from(rule.count))),
            apply_all: Some(rule.apply_all),
            ..Default::default()
        };
        match rule.params {
            RuleParams::Fixed { value } => raw.value = Some(value),
            RuleParams::RandomFromCategory => {}
            RuleParams::RandomFromList { allowed_values } => {
                raw.allowed_values = Some(allowed_values)
            }
            RuleParams::Range(range) => {
                raw.min = Some(LenientInt::Number(range.min));
                raw.max = Some(LenientInt::Number(range.max));
                raw.step = Some(LenientInt::Number(range.step));
            }
            RuleParams::Other { fields, .. } => raw.extra = fields,
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_random_from_list() {
        let rule: CategoryRule = serde_json::from_value(json!({
            "rule": "random_from_list",
            "count": 2,
            "apply_all": true,
            "allowed_values": ["Ashe", "Lux"]
        }))
        .unwrap();

        assert_eq!(rule.kind(), Some(RuleKind::RandomFromList));
        assert_eq!(rule.count, 2);
        assert!(rule.is_shared());
        assert_eq!(
            rule.params,
            RuleParams::RandomFromList {
                allowed_values: vec!["Ashe".to_string(), "Lux".to_string()]
            }
        );
    }

    #[test]
    fn test_parse_range_from_form_strings() {
        let rule: CategoryRule = serde_json::from_value(json!({
            "rule": "range",
            "apply_all": false,
            "min": "1990",
            "max": "2020",
            "step": ""
        }))
        .unwrap();

        assert_eq!(rule.count, 1);
        assert_eq!(
            rule.params,
            RuleParams::Range(NumericRange {
                min: 1990,
                max: 2020,
                step: 1
            })
        );
    }

    #[test]
    fn test_missing_rule_defaults_to_random_from_category() {
        let rule: CategoryRule = serde_json::from_value(json!({ "count": "3" })).unwrap();

        assert_eq!(rule.kind(), Some(RuleKind::RandomFromCategory));
        assert_eq!(rule.count, 3);
        assert!(!rule.apply_all);
    }

    #[test]
    fn test_fixed_without_value_is_rejected() {
        let result: Result<CategoryRule, _> =
            serde_json::from_value(json!({ "rule": "fixed", "apply_all": true }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_kind_is_carried_through() {
        let wire = json!({
            "count": 1,
            "rule": "filter_and_random",
            "allowed_values": ["Coupe", "Hatchback"],
            "min": "2",
            "filter": {"era": "70s"}
        });

        let rule: CategoryRule = serde_json::from_value(wire.clone()).unwrap();

        assert_eq!(rule.kind(), None);
        assert_eq!(rule.rule_name(), "filter_and_random");
        assert!(rule.validate().is_ok());
        let mut echoed = serde_json::to_value(&rule).unwrap();
        assert_eq!(echoed["apply_all"], json!(false));
        echoed.as_object_mut().unwrap().remove("apply_all");
        assert_eq!(echoed, wire);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert_eq!(
            RuleKind::parse("weighted"),
            Err(RuleError::UnknownKind("weighted".to_string()))
        );
    }

    #[test]
    fn test_serializes_numbers_and_only_matching_parameters() {
        let rule = CategoryRule::range(10, 50, 5).with_apply_all(true);
        let value = serde_json::to_value(&rule).unwrap();

        assert_eq!(
            value,
            json!({
                "rule": "range",
                "count": 1,
                "apply_all": true,
                "min": 10,
                "max": 50,
                "step": 5
            })
        );
    }

    #[test]
    fn test_validate_catches_semantic_errors() {
        assert_eq!(
            CategoryRule::range(5, 1, 1).validate(),
            Err(RuleError::InvertedRange { min: 5, max: 1 })
        );
        assert_eq!(
            CategoryRule::range(1, 5, 0).validate(),
            Err(RuleError::NonPositiveStep)
        );
        assert_eq!(
            CategoryRule::random_from_list(Vec::<String>::new(), 1).validate(),
            Err(RuleError::EmptyAllowedValues)
        );
        assert!(CategoryRule::fixed("AWD").validate().is_ok());
    }
}
