//! Reroll Service - fresh values for one category
//!
//! Every reroll is exactly one oracle request. Preconditions are checked
//! before anything is sent; a failed request leaves the page untouched. The
//! triggering control is disabled for the duration of the request and
//! re-enabled in every outcome.
//!
//! Concurrent rerolls of the same target are not coordinated: whichever
//! response is applied last wins.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::dto::RerollCategoryRequest;
use crate::application::ports::inbound::{
    CommandError, CommandOutcome, RuleSource, REROLL_MISSING_DATA, REROLL_SERVER_ERROR,
    SETTINGS_RULES_MISSING,
};
use crate::application::ports::outbound::GenerationOraclePort;
use crate::domain::entities::ControlId;
use crate::domain::value_objects::CategoryRule;

use super::page_context::{PageContext, PageHandle};

/// Player targeted by a single reroll started from the settings panel
pub const SETTINGS_PLAYER_INDEX: usize = 0;

pub struct RerollService {
    oracle: Arc<dyn GenerationOraclePort>,
}

impl RerollService {
    pub fn new(oracle: Arc<dyn GenerationOraclePort>) -> Self {
        Self { oracle }
    }

    /// Reroll a category for a single player
    #[instrument(skip(self, page, source), fields(page_id = %page.id()))]
    pub async fn reroll(
        &self,
        page: &Arc<PageHandle>,
        category: &str,
        player_index: Option<usize>,
        source: &RuleSource,
    ) -> Result<CommandOutcome, CommandError> {
        let (rule, player_index, control) =
            page.with(|ctx| single_target(ctx, category, player_index, source))?;

        let request = RerollCategoryRequest::single(category, rule);
        let response = {
            let _busy = page.busy(control.clone());
            self.oracle.reroll_category(&request).await
        };

        let values = response.map_err(|e| {
            warn!("Reroll of '{}' failed: {}", category, e);
            CommandError::from_oracle(e, REROLL_SERVER_ERROR)
        })?;

        let fragments = page.with(|ctx| ctx.apply_single(player_index, category, values));
        info!(
            "Rerolled '{}' for player {} ({} fragment(s))",
            category,
            player_index,
            fragments.len()
        );

        Ok(CommandOutcome::CategoryUpdated {
            category: category.to_string(),
            control,
            fragments,
        })
    }

    /// Reroll a category once and give every player the result
    #[instrument(skip(self, page, source), fields(page_id = %page.id()))]
    pub async fn reroll_all(
        &self,
        page: &Arc<PageHandle>,
        category: &str,
        source: &RuleSource,
    ) -> Result<CommandOutcome, CommandError> {
        let (rule, control) = page.with(|ctx| all_target(ctx, category, source))?;

        let request = RerollCategoryRequest::all(category, rule);
        let response = {
            let _busy = page.busy(control.clone());
            self.oracle.reroll_category(&request).await
        };

        let values = response.map_err(|e| {
            warn!("Reroll of '{}' for all players failed: {}", category, e);
            CommandError::from_oracle(e, REROLL_SERVER_ERROR)
        })?;

        if values.is_empty() {
            debug!("Oracle returned no values for '{}', keeping current results", category);
            return Ok(CommandOutcome::CategoryUpdated {
                category: category.to_string(),
                control,
                fragments: Vec::new(),
            });
        }

        let fragments = page.with(|ctx| ctx.apply_broadcast(category, &values));
        info!(
            "Rerolled '{}' for all players ({} fragment(s))",
            category,
            fragments.len()
        );

        Ok(CommandOutcome::CategoryUpdated {
            category: category.to_string(),
            control,
            fragments,
        })
    }
}

/// Rule, player and control of a single reroll; nothing is sent on error
fn single_target(
    ctx: &PageContext,
    category: &str,
    player_index: Option<usize>,
    source: &RuleSource,
) -> Result<(CategoryRule, usize, ControlId), CommandError> {
    match source {
        RuleSource::Stored => {
            let player_index = player_index
                .ok_or_else(|| CommandError::MissingData(REROLL_MISSING_DATA.to_string()))?;
            ctx.page
                .results()
                .locate(player_index, category)
                .map_err(|e| {
                    debug!("Reroll target missing: {}", e);
                    CommandError::MissingData(REROLL_MISSING_DATA.to_string())
                })?;
            let rule = stored_rule(ctx.page.rule(category))?;
            Ok((
                rule,
                player_index,
                ControlId::Reroll {
                    category: category.to_string(),
                    player_index,
                },
            ))
        }
        RuleSource::Settings(settings) => {
            if !ctx.page.has_results() {
                return Err(CommandError::NoResults);
            }
            let rule = settings_rule(settings.derive_rule())?;
            ctx.page
                .results()
                .locate(SETTINGS_PLAYER_INDEX, category)
                .map_err(|e| {
                    debug!("Settings reroll target missing: {}", e);
                    CommandError::MissingData(REROLL_MISSING_DATA.to_string())
                })?;
            Ok((
                rule,
                SETTINGS_PLAYER_INDEX,
                ControlId::SettingsReroll {
                    category: category.to_string(),
                },
            ))
        }
    }
}

fn all_target(
    ctx: &PageContext,
    category: &str,
    source: &RuleSource,
) -> Result<(CategoryRule, ControlId), CommandError> {
    match source {
        RuleSource::Stored => Ok((
            stored_rule(ctx.page.rule(category))?,
            ControlId::RerollAll {
                category: category.to_string(),
            },
        )),
        RuleSource::Settings(settings) => {
            if !ctx.page.has_results() {
                return Err(CommandError::NoResults);
            }
            let rule = settings_rule(settings.derive_rule())?;
            let held = ctx
                .page
                .results()
                .players()
                .iter()
                .any(|player| player.contains(category));
            if !held {
                debug!("No player has results for '{}'", category);
                return Err(CommandError::MissingData(REROLL_MISSING_DATA.to_string()));
            }
            Ok((
                rule,
                ControlId::SettingsRerollAll {
                    category: category.to_string(),
                },
            ))
        }
    }
}

fn stored_rule(rule: Option<&CategoryRule>) -> Result<CategoryRule, CommandError> {
    rule.cloned()
        .ok_or_else(|| CommandError::MissingData(REROLL_MISSING_DATA.to_string()))
}

fn settings_rule<E: std::fmt::Display>(
    rule: Result<CategoryRule, E>,
) -> Result<CategoryRule, CommandError> {
    rule.map_err(|e| {
        debug!("Settings panel has no usable rule: {}", e);
        CommandError::MissingData(SETTINGS_RULES_MISSING.to_string())
    })
}
