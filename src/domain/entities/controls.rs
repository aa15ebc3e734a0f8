//! Interactive controls that trigger oracle requests
//!
//! A control is disabled while at least one request it started is pending.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identity of a request-triggering control on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum ControlId {
    /// Main form submit button
    Generate,
    /// Per-player reroll button on a result card
    Reroll {
        category: String,
        player_index: usize,
    },
    /// Reroll-for-everyone button on a result card
    RerollAll { category: String },
    /// Single reroll button in the settings panel
    SettingsReroll { category: String },
    /// Reroll-for-everyone button in the settings panel
    SettingsRerollAll { category: String },
    /// Confirm button of the save-template dialog
    SaveTemplate,
}

#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    in_flight: HashMap<ControlId, u32>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started from this control
    pub fn acquire(&mut self, control: ControlId) {
        *self.in_flight.entry(control).or_insert(0) += 1;
    }

    /// Mark one of the control's requests as finished
    pub fn release(&mut self, control: &ControlId) {
        if let Some(count) = self.in_flight.get_mut(control) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(control);
            }
        }
    }

    pub fn is_busy(&self, control: &ControlId) -> bool {
        self.in_flight.contains_key(control)
    }

    pub fn busy_controls(&self) -> impl Iterator<Item = &ControlId> {
        self.in_flight.keys()
    }
}
