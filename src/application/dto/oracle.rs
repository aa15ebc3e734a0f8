//! Oracle wire types
//!
//! Request and response bodies of the generation oracle's endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ResultEntry, ResultStore};
use crate::domain::value_objects::{CategoryRule, GenerationConfig, TemplateOption};

/// Form fields forwarded verbatim to `POST /generate`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateForm {
    pub fields: Vec<(String, String)>,
}

impl GenerateForm {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Successful `POST /generate` body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedChallenge {
    pub config: GenerationConfig,
    pub results: ResultStore,
    #[serde(default)]
    pub is_custom: bool,
}

/// Failed `POST /generate` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateErrors {
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RerollType {
    All,
}

/// `POST /reroll_category` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RerollCategoryRequest {
    pub category_name: String,
    pub rules: CategoryRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reroll_type: Option<RerollType>,
}

impl RerollCategoryRequest {
    pub fn single(category_name: impl Into<String>, rules: CategoryRule) -> Self {
        Self {
            category_name: category_name.into(),
            rules,
            reroll_type: None,
        }
    }

    pub fn all(category_name: impl Into<String>, rules: CategoryRule) -> Self {
        Self {
            reroll_type: Some(RerollType::All),
            ..Self::single(category_name, rules)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RerollCategoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub new_values: Vec<ResultEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /save_template` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveTemplateRequest {
    pub name: String,
    pub description: String,
    pub config: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveTemplateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub new_template: Option<TemplateOption>,
    #[serde(default)]
    pub error: Option<String>,
}
