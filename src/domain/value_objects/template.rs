//! Saved template references

use serde::{Deserialize, Serialize};

/// A selectable template as returned by the oracle after saving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateOption {
    /// Oracle-assigned identifier; numeric ids are normalized to strings
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl TemplateOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_becomes_string() {
        let option: TemplateOption =
            serde_json::from_str(r#"{"id": 42, "name": "Budget build"}"#).unwrap();
        assert_eq!(option, TemplateOption::new("42", "Budget build"));
    }
}
