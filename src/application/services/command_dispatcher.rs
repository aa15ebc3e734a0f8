//! Command Dispatcher - single entry point for UI commands

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::inbound::{CommandError, CommandOutcome, UiCommand};
use crate::application::ports::outbound::GenerationOraclePort;

use super::page_context::PageHandle;
use super::render::{clipboard, html};
use super::reroll_service::RerollService;
use super::template_service::TemplateService;

pub struct CommandDispatcher {
    rerolls: RerollService,
    templates: TemplateService,
}

impl CommandDispatcher {
    pub fn new(oracle: Arc<dyn GenerationOraclePort>) -> Self {
        Self {
            rerolls: RerollService::new(Arc::clone(&oracle)),
            templates: TemplateService::new(oracle),
        }
    }

    #[instrument(skip_all, fields(page_id = %page.id()))]
    pub async fn dispatch(
        &self,
        page: &Arc<PageHandle>,
        command: UiCommand,
    ) -> Result<CommandOutcome, CommandError> {
        debug!("Dispatching {:?}", command);
        match command {
            UiCommand::Reroll {
                category,
                player_index,
                source,
            } => {
                self.rerolls
                    .reroll(page, &category, player_index, &source)
                    .await
            }
            UiCommand::RerollAll { category, source } => {
                self.rerolls.reroll_all(page, &category, &source).await
            }
            UiCommand::ToggleDescriptions => Ok(page.with(|ctx| {
                let visible = ctx.page.toggle_descriptions();
                ctx.view.set_descriptions_visible(visible);
                CommandOutcome::DescriptionsToggled {
                    visible,
                    label: html::toggle_label(visible).to_string(),
                }
            })),
            UiCommand::Copy => page.with(|ctx| {
                if ctx.view.is_empty() {
                    return Err(CommandError::NoResults);
                }
                Ok(CommandOutcome::Clipboard {
                    text: clipboard::copy_text(&ctx.view),
                })
            }),
            UiCommand::OpenSaveDialog => self.templates.open_dialog(page),
            UiCommand::SaveTemplate { name, description } => {
                self.templates.save(page, &name, &description).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::GeneratedChallenge;
    use crate::application::ports::inbound::RuleSource;
    use crate::application::ports::outbound::MockGenerationOraclePort;
    use crate::domain::entities::{ResultEntry, ResultStore};
    use crate::domain::value_objects::{CategoryRule, PageId};

    fn page() -> Arc<PageHandle> {
        let page = Arc::new(PageHandle::new(PageId::new()));
        page.with(|ctx| {
            ctx.apply_generation(GeneratedChallenge {
                config: [("Champion", CategoryRule::random_from_list(["Ashe", "Lux"], 1))]
                    .into_iter()
                    .collect(),
                results: ResultStore::new(vec![[(
                    "Champion",
                    vec![ResultEntry::new("Ashe").with_description("Archer")],
                )]
                .into_iter()
                .collect()]),
                is_custom: false,
            })
        });
        page
    }

    #[tokio::test]
    async fn test_toggle_flips_label() {
        let dispatcher = CommandDispatcher::new(Arc::new(MockGenerationOraclePort::new()));
        let page = page();

        let first = dispatcher.dispatch(&page, UiCommand::ToggleDescriptions).await.unwrap();
        assert_eq!(
            first,
            CommandOutcome::DescriptionsToggled {
                visible: true,
                label: "Hide Descriptions".to_string()
            }
        );

        let second = dispatcher.dispatch(&page, UiCommand::ToggleDescriptions).await.unwrap();
        assert_eq!(
            second,
            CommandOutcome::DescriptionsToggled {
                visible: false,
                label: "Show Descriptions".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_copy_includes_descriptions() {
        let dispatcher = CommandDispatcher::new(Arc::new(MockGenerationOraclePort::new()));

        let outcome = dispatcher.dispatch(&page(), UiCommand::Copy).await.unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::Clipboard {
                text: "Generated Challenge:\n\n--- Player 1 ---\nChampion:\n  - Ashe: Archer"
                    .to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_commands_on_empty_page() {
        let mut oracle = MockGenerationOraclePort::new();
        oracle.expect_reroll_category().never();
        let dispatcher = CommandDispatcher::new(Arc::new(oracle));
        let page = Arc::new(PageHandle::new(PageId::new()));

        assert_eq!(
            dispatcher.dispatch(&page, UiCommand::Copy).await,
            Err(CommandError::NoResults)
        );
        assert!(matches!(
            dispatcher
                .dispatch(
                    &page,
                    UiCommand::RerollAll {
                        category: "Champion".to_string(),
                        source: RuleSource::Stored,
                    }
                )
                .await,
            Err(CommandError::MissingData(_))
        ));
    }

    #[tokio::test]
    async fn test_reroll_routes_to_oracle() {
        let mut oracle = MockGenerationOraclePort::new();
        oracle
            .expect_reroll_category()
            .times(1)
            .returning(|_| Ok(vec![ResultEntry::new("Lux")]));
        let dispatcher = CommandDispatcher::new(Arc::new(oracle));
        let page = page();

        let outcome = dispatcher
            .dispatch(
                &page,
                UiCommand::Reroll {
                    category: "Champion".to_string(),
                    player_index: Some(0),
                    source: RuleSource::Stored,
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, CommandOutcome::CategoryUpdated { .. }));
        assert_eq!(
            page.with(|ctx| ctx.page.results().entry(0, "Champion").map(<[ResultEntry]>::to_vec)),
            Some(vec![ResultEntry::new("Lux")])
        );
    }
}
