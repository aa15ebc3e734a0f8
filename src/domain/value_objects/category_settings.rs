//! Settings-panel state for one category
//!
//! The settings panel lets a player edit a category's rule before (or
//! without) resubmitting the whole form. Rerolls started from the panel use
//! the rule derived here instead of the one stored with the last generation.

use serde::{Deserialize, Serialize};

use super::category_rule::{CategoryRule, NumericRange, RuleError, RuleKind, RuleParams};

/// Raw control values of one category block in the settings panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySettings {
    /// The "include category" checkbox
    #[serde(default)]
    pub included: bool,
    /// Selected rule kind
    #[serde(default)]
    pub rule: Option<String>,
    #[serde(default)]
    pub count: Option<String>,
    /// Shared-across-players checkbox; an absent control means shared
    #[serde(default)]
    pub apply_all: Option<bool>,
    #[serde(default)]
    pub fixed_value: Option<String>,
    /// Checked allow-list boxes
    #[serde(default)]
    pub allowed_values: Vec<String>,
    #[serde(default)]
    pub range_min: Option<String>,
    #[serde(default)]
    pub range_max: Option<String>,
    #[serde(default)]
    pub range_step: Option<String>,
}

impl CategorySettings {
    /// Derive the rule the panel currently describes
    pub fn derive_rule(&self) -> Result<CategoryRule, RuleError> {
        if !self.included {
            return Err(RuleError::CategoryExcluded);
        }

        let kind = RuleKind::parse(self.rule.as_deref().unwrap_or_default())?;

        // Unparseable or non-positive counts fall back to a single value
        let count = if kind.uses_count() {
            self.count
                .as_deref()
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .filter(|count| *count >= 1)
                .unwrap_or(1)
        } else {
            1
        };

        let params = match kind {
            RuleKind::Fixed => {
                let value = self
                    .fixed_value
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .ok_or(RuleError::MissingParameter {
                        kind,
                        field: "value",
                    })?;
                RuleParams::Fixed {
                    value: value.to_string(),
                }
            }
            RuleKind::RandomFromCategory => RuleParams::RandomFromCategory,
            RuleKind::RandomFromList => {
                let mut allowed_values: Vec<String> = Vec::new();
                for value in &self.allowed_values {
                    if !allowed_values.contains(value) {
                        allowed_values.push(value.clone());
                    }
                }
                RuleParams::RandomFromList { allowed_values }
            }
            RuleKind::Range => RuleParams::Range(NumericRange {
                min: required_number(&self.range_min, kind, "min")?,
                max: required_number(&self.range_max, kind, "max")?,
                step: optional_number(&self.range_step, "step")?.unwrap_or(1),
            }),
        };

        let rule = CategoryRule {
            count,
            apply_all: self.apply_all.unwrap_or(true),
            params,
        };
        rule.validate()?;
        Ok(rule)
    }
}

fn optional_number(raw: &Option<String>, field: &'static str) -> Result<Option<i64>, RuleError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| RuleError::NotANumber {
            field,
            value: text.to_string(),
        }),
    }
}

fn required_number(
    raw: &Option<String>,
    kind: RuleKind,
    field: &'static str,
) -> Result<i64, RuleError> {
    optional_number(raw, field)?.ok_or(RuleError::MissingParameter { kind, field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_settings() -> CategorySettings {
        CategorySettings {
            included: true,
            rule: Some("random_from_list".to_string()),
            count: Some("2".to_string()),
            apply_all: Some(false),
            allowed_values: vec!["Ashe".to_string(), "Lux".to_string(), "Ashe".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_random_from_list() {
        let rule = list_settings().derive_rule().unwrap();

        assert_eq!(rule.count, 2);
        assert!(!rule.apply_all);
        assert_eq!(
            rule.params,
            RuleParams::RandomFromList {
                allowed_values: vec!["Ashe".to_string(), "Lux".to_string()]
            }
        );
    }

    #[test]
    fn test_bad_count_falls_back_to_one() {
        let mut settings = list_settings();
        settings.count = Some("zero".to_string());
        assert_eq!(settings.derive_rule().unwrap().count, 1);

        settings.count = Some("0".to_string());
        assert_eq!(settings.derive_rule().unwrap().count, 1);
    }

    #[test]
    fn test_missing_shared_control_means_shared() {
        let mut settings = list_settings();
        settings.apply_all = None;
        assert!(settings.derive_rule().unwrap().apply_all);
    }

    #[test]
    fn test_excluded_category_has_no_rule() {
        let mut settings = list_settings();
        settings.included = false;
        assert_eq!(settings.derive_rule(), Err(RuleError::CategoryExcluded));
    }

    #[test]
    fn test_derive_range_with_default_step() {
        let settings = CategorySettings {
            included: true,
            rule: Some("range".to_string()),
            count: Some("4".to_string()),
            range_min: Some("100".to_string()),
            range_max: Some(" 500 ".to_string()),
            range_step: Some(String::new()),
            ..Default::default()
        };

        let rule = settings.derive_rule().unwrap();
        assert_eq!(rule.count, 1);
        assert_eq!(
            rule.params,
            RuleParams::Range(NumericRange {
                min: 100,
                max: 500,
                step: 1
            })
        );
    }

    #[test]
    fn test_range_requires_numeric_bounds() {
        let settings = CategorySettings {
            included: true,
            rule: Some("range".to_string()),
            range_min: Some("low".to_string()),
            range_max: Some("10".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            settings.derive_rule(),
            Err(RuleError::NotANumber { field: "min", .. })
        ));
    }

    #[test]
    fn test_fixed_requires_value() {
        let settings = CategorySettings {
            included: true,
            rule: Some("fixed".to_string()),
            fixed_value: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(
            settings.derive_rule(),
            Err(RuleError::MissingParameter {
                kind: RuleKind::Fixed,
                field: "value"
            })
        );
    }
}
