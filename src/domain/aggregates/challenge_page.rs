//! Challenge Page Aggregate - everything one page load knows
//!
//! The generation config and the result store are created together by a
//! successful generation and replaced together by the next one. In between,
//! only rerolls touch the store, and only through the mutators below.

use crate::domain::entities::{ControlId, ControlPanel, ResultEntry, ResultStore, StoreError};
use crate::domain::value_objects::{CategoryRule, GenerationConfig, TemplateOption};

/// State of the save-template dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDialog {
    pub open: bool,
    /// Field-level error shown under the name input
    pub name_error: Option<String>,
}

/// The page aggregate root
#[derive(Debug, Clone, Default)]
pub struct ChallengePage {
    config: GenerationConfig,
    results: ResultStore,
    /// Whether the current results came from a custom (non-template) config
    is_custom: bool,
    /// Global description toggle
    descriptions_visible: bool,
    /// Messages of the last failed generation
    errors: Vec<String>,
    controls: ControlPanel,
    save_dialog: SaveDialog,
    /// Templates saved from this page
    saved_templates: Vec<TemplateOption>,
    selected_template: Option<String>,
}

impl ChallengePage {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    pub fn descriptions_visible(&self) -> bool {
        self.descriptions_visible
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    pub fn save_dialog(&self) -> &SaveDialog {
        &self.save_dialog
    }

    pub fn saved_templates(&self) -> &[TemplateOption] {
        &self.saved_templates
    }

    pub fn selected_template(&self) -> Option<&str> {
        self.selected_template.as_deref()
    }

    pub fn rule(&self, category: &str) -> Option<&CategoryRule> {
        self.config.get(category)
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Replace config and results with a fresh generation
    ///
    /// Descriptions start hidden again and previous errors are dropped.
    pub fn apply_generation(
        &mut self,
        config: GenerationConfig,
        results: ResultStore,
        is_custom: bool,
    ) {
        self.config = config;
        self.results = results;
        self.is_custom = is_custom;
        self.descriptions_visible = false;
        self.errors.clear();
        self.save_dialog = SaveDialog::default();
    }

    /// Record a failed generation; current results stay as they are
    pub fn record_generation_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }

    // ========================================================================
    // Rerolls
    // ========================================================================

    pub fn replace_entry(
        &mut self,
        player_index: usize,
        category: &str,
        values: Vec<ResultEntry>,
    ) -> Result<(), StoreError> {
        self.results.replace_entry(player_index, category, values)
    }

    pub fn broadcast(&mut self, category: &str, values: &[ResultEntry]) -> Vec<usize> {
        self.results.broadcast(category, values)
    }

    // ========================================================================
    // Controls
    // ========================================================================

    pub fn acquire_control(&mut self, control: ControlId) {
        self.controls.acquire(control);
    }

    pub fn release_control(&mut self, control: &ControlId) {
        self.controls.release(control);
    }

    // ========================================================================
    // View toggles
    // ========================================================================

    /// Flip the global description toggle and return the new state
    pub fn toggle_descriptions(&mut self) -> bool {
        self.descriptions_visible = !self.descriptions_visible;
        self.descriptions_visible
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Open the save dialog; only custom result sets can be saved
    pub fn open_save_dialog(&mut self) -> Result<(), PageError> {
        if !self.has_results() {
            return Err(PageError::NoResults);
        }
        if !self.is_custom {
            return Err(PageError::NotCustom);
        }
        self.save_dialog = SaveDialog {
            open: true,
            name_error: None,
        };
        Ok(())
    }

    /// Config to save from the open dialog
    pub fn saveable_config(&self) -> Result<GenerationConfig, PageError> {
        if !self.has_results() {
            return Err(PageError::NoResults);
        }
        if !self.is_custom {
            return Err(PageError::NotCustom);
        }
        if !self.save_dialog.open {
            return Err(PageError::DialogClosed);
        }
        Ok(self.config.clone())
    }

    /// Keep the dialog open and show an error under the name field
    pub fn reject_template_name(&mut self, message: impl Into<String>) {
        self.save_dialog.name_error = Some(message.into());
    }

    /// Add the new option, select it, then close and reset the dialog
    pub fn template_saved(&mut self, template: TemplateOption) {
        self.selected_template = Some(template.id.clone());
        self.saved_templates.push(template);
        self.save_dialog = SaveDialog::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("No results have been generated yet")]
    NoResults,
    #[error("Only custom configurations can be saved as templates")]
    NotCustom,
    #[error("The save dialog is not open")]
    DialogClosed,
}
