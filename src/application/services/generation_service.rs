//! Generation Service - full challenge generation
//!
//! Forwards the submitted form to the oracle and, on success, replaces the
//! page's config and results in one step. A failed generation records its
//! messages and leaves the previous results on the page.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::dto::GenerateForm;
use crate::application::ports::inbound::{CommandError, GENERATE_UNKNOWN_ERROR, NETWORK_ERROR};
use crate::application::ports::outbound::{GenerationOraclePort, OracleError};
use crate::domain::entities::ControlId;

use super::page_context::PageHandle;

pub struct GenerationService {
    oracle: Arc<dyn GenerationOraclePort>,
}

impl GenerationService {
    pub fn new(oracle: Arc<dyn GenerationOraclePort>) -> Self {
        Self { oracle }
    }

    /// Generate a new challenge and return the full results markup
    #[instrument(skip(self, page, form), fields(page_id = %page.id(), form_fields = form.fields.len()))]
    pub async fn generate(
        &self,
        page: &Arc<PageHandle>,
        form: &GenerateForm,
    ) -> Result<String, CommandError> {
        let response = {
            let _busy = page.busy(ControlId::Generate);
            self.oracle.generate(form).await
        };

        match response {
            Ok(generated) => {
                let players = generated.results.len();
                let html = page.with(|ctx| {
                    ctx.apply_generation(generated);
                    ctx.render_results()
                });
                info!("Generated challenge for {} player(s)", players);
                Ok(html)
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                let (messages, error) = match e {
                    OracleError::Unreachable(_) => {
                        (vec![NETWORK_ERROR.to_string()], CommandError::Network)
                    }
                    OracleError::Rejected(messages) if !messages.is_empty() => {
                        (messages.clone(), CommandError::GenerationRejected(messages))
                    }
                    OracleError::Rejected(_) | OracleError::InvalidResponse(_) => {
                        let messages = vec![GENERATE_UNKNOWN_ERROR.to_string()];
                        (messages.clone(), CommandError::GenerationRejected(messages))
                    }
                };
                page.with(|ctx| ctx.page.record_generation_errors(messages));
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::GeneratedChallenge;
    use crate::application::ports::outbound::MockGenerationOraclePort;
    use crate::domain::entities::{ResultEntry, ResultStore};
    use crate::domain::value_objects::{CategoryRule, PageId};

    fn generated(players: usize) -> GeneratedChallenge {
        GeneratedChallenge {
            config: [("Champion", CategoryRule::random_from_list(["Ashe", "Lux"], 1))]
                .into_iter()
                .collect(),
            results: ResultStore::new(
                (0..players)
                    .map(|_| [("Champion", vec![ResultEntry::new("Ashe")])].into_iter().collect())
                    .collect(),
            ),
            is_custom: true,
        }
    }

    fn form() -> GenerateForm {
        GenerateForm::new(vec![("num_players".to_string(), "2".to_string())])
    }

    #[tokio::test]
    async fn test_generate_installs_results() {
        let mut oracle = MockGenerationOraclePort::new();
        oracle
            .expect_generate()
            .withf(|form| form.get("num_players") == Some("2"))
            .times(1)
            .returning(|_| Ok(generated(2)));
        let service = GenerationService::new(Arc::new(oracle));
        let page = Arc::new(PageHandle::new(PageId::new()));

        let html = service.generate(&page, &form()).await.unwrap();

        assert!(html.contains("col-lg-6 col-md-6"));
        assert!(html.contains("save-as-template-btn"));
        assert_eq!(page.with(|ctx| ctx.page.results().len()), 2);
        assert!(!page.with(|ctx| ctx.page.controls().is_busy(&ControlId::Generate)));
    }

    #[tokio::test]
    async fn test_rejected_generation_keeps_previous_results() {
        let mut oracle = MockGenerationOraclePort::new();
        oracle
            .expect_generate()
            .times(1)
            .returning(|_| Err(OracleError::Rejected(vec!["Template not found".into()])));
        let service = GenerationService::new(Arc::new(oracle));
        let page = Arc::new(PageHandle::new(PageId::new()));
        page.with(|ctx| ctx.apply_generation(generated(3)));

        let err = service.generate(&page, &form()).await.unwrap_err();

        assert_eq!(
            err,
            CommandError::GenerationRejected(vec!["Template not found".to_string()])
        );
        assert_eq!(page.with(|ctx| ctx.page.results().len()), 3);
        assert_eq!(
            page.with(|ctx| ctx.page.errors().to_vec()),
            vec!["Template not found".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rejection_without_messages_uses_fallback() {
        let mut oracle = MockGenerationOraclePort::new();
        oracle
            .expect_generate()
            .times(1)
            .returning(|_| Err(OracleError::Rejected(Vec::new())));
        let service = GenerationService::new(Arc::new(oracle));
        let page = Arc::new(PageHandle::new(PageId::new()));

        let err = service.generate(&page, &form()).await.unwrap_err();

        assert_eq!(
            err,
            CommandError::GenerationRejected(vec![GENERATE_UNKNOWN_ERROR.to_string()])
        );
    }

    #[tokio::test]
    async fn test_unreachable_oracle_is_network_error() {
        let mut oracle = MockGenerationOraclePort::new();
        oracle
            .expect_generate()
            .times(1)
            .returning(|_| Err(OracleError::Unreachable("connection refused".into())));
        let service = GenerationService::new(Arc::new(oracle));
        let page = Arc::new(PageHandle::new(PageId::new()));

        let err = service.generate(&page, &form()).await.unwrap_err();

        assert_eq!(err, CommandError::Network);
        assert_eq!(
            page.with(|ctx| ctx.page.errors().to_vec()),
            vec![NETWORK_ERROR.to_string()]
        );
        assert!(!page.with(|ctx| ctx.page.controls().is_busy(&ControlId::Generate)));
    }
}
