//! UI commands - everything a user can trigger on a rendered page

use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::OracleError;
use crate::domain::aggregates::PageError;
use crate::domain::entities::ControlId;
use crate::domain::value_objects::{CategorySettings, TemplateOption};

pub const REROLL_MISSING_DATA: &str = "Error: Data for reroll is missing.";
pub const SETTINGS_RULES_MISSING: &str = "Error: Could not get category rules.";
pub const REROLL_SERVER_ERROR: &str = "Server error during reroll.";
pub const SAVE_SERVER_ERROR: &str = "Server error.";
pub const GENERATE_UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const NETWORK_ERROR: &str = "Network error. Could not contact the server.";

/// Where a reroll takes its rule from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum RuleSource {
    /// Rule stored with the last generation (result-card buttons)
    #[default]
    Stored,
    /// Rule derived from the live settings panel
    Settings(CategorySettings),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    /// Reroll one category for one player; settings-panel rerolls always
    /// target the first player
    Reroll {
        category: String,
        #[serde(default)]
        player_index: Option<usize>,
        #[serde(default)]
        source: RuleSource,
    },
    /// Reroll one category and give every player the result
    RerollAll {
        category: String,
        #[serde(default)]
        source: RuleSource,
    },
    ToggleDescriptions,
    Copy,
    OpenSaveDialog,
    SaveTemplate {
        name: String,
        #[serde(default)]
        description: String,
    },
}

/// Re-rendered values list of one category block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFragment {
    pub player_index: usize,
    pub category: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOutcome {
    CategoryUpdated {
        category: String,
        /// Control to re-enable in the browser
        control: ControlId,
        fragments: Vec<RenderedFragment>,
    },
    DescriptionsToggled {
        visible: bool,
        label: String,
    },
    Clipboard {
        text: String,
    },
    SaveDialogOpened,
    TemplateSaved {
        template: TemplateOption,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Required data was absent; nothing was sent
    #[error("{0}")]
    MissingData(String),
    #[error("Generate a challenge first!")]
    NoResults,
    #[error("Network error. Could not contact the server.")]
    Network,
    #[error("{0}")]
    ServerRejection(String),
    #[error("Problems occurred during generation: {}", .0.join("; "))]
    GenerationRejected(Vec<String>),
    #[error("Template name cannot be empty.")]
    InvalidTemplateName,
    #[error(transparent)]
    Page(#[from] PageError),
}

impl CommandError {
    /// Classify an oracle failure, using `fallback` when it carries no message
    pub fn from_oracle(error: OracleError, fallback: &str) -> Self {
        match error {
            OracleError::Unreachable(_) => Self::Network,
            OracleError::Rejected(messages) if !messages.is_empty() => {
                Self::ServerRejection(messages.join("; "))
            }
            OracleError::Rejected(_) | OracleError::InvalidResponse(_) => {
                Self::ServerRejection(fallback.to_string())
            }
        }
    }
}
