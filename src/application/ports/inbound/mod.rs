//! Inbound ports - Interfaces that the application exposes to the outside world

pub mod commands;

pub use commands::{
    CommandError, CommandOutcome, RenderedFragment, RuleSource, UiCommand,
    GENERATE_UNKNOWN_ERROR, NETWORK_ERROR, REROLL_MISSING_DATA, REROLL_SERVER_ERROR,
    SAVE_SERVER_ERROR, SETTINGS_RULES_MISSING,
};
