//! Generation oracle port - the backend that does the actual randomizing

use async_trait::async_trait;

use crate::application::dto::{
    GenerateForm, GeneratedChallenge, RerollCategoryRequest, SaveTemplateRequest,
};
use crate::domain::entities::ResultEntry;
use crate::domain::value_objects::TemplateOption;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// No response was received
    #[error("Oracle unreachable: {0}")]
    Unreachable(String),
    /// A response arrived but reports failure; carries its messages, if any
    #[error("Oracle rejected the request: {}", .0.join("; "))]
    Rejected(Vec<String>),
    /// A response arrived but could not be understood
    #[error("Invalid oracle response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationOraclePort: Send + Sync {
    /// Run a full generation from the submitted form
    async fn generate(&self, form: &GenerateForm) -> Result<GeneratedChallenge, OracleError>;

    /// Produce fresh values for one category
    async fn reroll_category(
        &self,
        request: &RerollCategoryRequest,
    ) -> Result<Vec<ResultEntry>, OracleError>;

    /// Persist a configuration as a named template
    async fn save_template(
        &self,
        request: &SaveTemplateRequest,
    ) -> Result<TemplateOption, OracleError>;
}
