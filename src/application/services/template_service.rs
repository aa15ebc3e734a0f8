//! Template Service - save the current configuration as a named template

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::dto::SaveTemplateRequest;
use crate::application::ports::inbound::{CommandError, CommandOutcome, SAVE_SERVER_ERROR};
use crate::application::ports::outbound::GenerationOraclePort;
use crate::domain::entities::ControlId;

use super::page_context::PageHandle;

pub struct TemplateService {
    oracle: Arc<dyn GenerationOraclePort>,
}

impl TemplateService {
    pub fn new(oracle: Arc<dyn GenerationOraclePort>) -> Self {
        Self { oracle }
    }

    /// Open the save dialog for the current result set
    pub fn open_dialog(&self, page: &PageHandle) -> Result<CommandOutcome, CommandError> {
        page.with(|ctx| ctx.page.open_save_dialog())?;
        Ok(CommandOutcome::SaveDialogOpened)
    }

    /// Save the config of the last generation under `name`
    ///
    /// Only possible from an open dialog on custom results. Any failure after
    /// that is shown under the name field and the dialog stays open.
    #[instrument(skip(self, page, description), fields(page_id = %page.id()))]
    pub async fn save(
        &self,
        page: &Arc<PageHandle>,
        name: &str,
        description: &str,
    ) -> Result<CommandOutcome, CommandError> {
        let config = page.with(|ctx| ctx.page.saveable_config())?;

        let name = name.trim();
        if name.is_empty() {
            let error = CommandError::InvalidTemplateName;
            page.with(|ctx| ctx.page.reject_template_name(error.to_string()));
            return Err(error);
        }

        let request = SaveTemplateRequest {
            name: name.to_string(),
            description: description.trim().to_string(),
            config,
        };

        let response = {
            let _busy = page.busy(ControlId::SaveTemplate);
            self.oracle.save_template(&request).await
        };

        match response {
            Ok(template) => {
                info!("Saved template '{}' as {}", template.name, template.id);
                page.with(|ctx| ctx.page.template_saved(template.clone()));
                Ok(CommandOutcome::TemplateSaved { template })
            }
            Err(e) => {
                warn!("Saving template '{}' failed: {}", name, e);
                let error = CommandError::from_oracle(e, SAVE_SERVER_ERROR);
                page.with(|ctx| ctx.page.reject_template_name(error.to_string()));
                Err(error)
            }
        }
    }
}
