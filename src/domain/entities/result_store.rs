//! Result Store - the generated values for every player
//!
//! One `PlayerResult` per player, index-addressed. The number of players is
//! fixed when a generation succeeds; rerolls replace category entries in
//! place and never add or remove players.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CategoryMap;

/// One generated value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResultEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Generated values of one player, keyed by category
pub type PlayerResult = CategoryMap<Vec<ResultEntry>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("No results for player {0}")]
    UnknownPlayer(usize),
    #[error("Player {player_index} has no results for '{category}'")]
    UnknownCategory {
        player_index: usize,
        category: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    players: Vec<PlayerResult>,
}

impl ResultStore {
    pub fn new(players: Vec<PlayerResult>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerResult] {
        &self.players
    }

    pub fn player(&self, player_index: usize) -> Option<&PlayerResult> {
        self.players.get(player_index)
    }

    pub fn entry(&self, player_index: usize, category: &str) -> Option<&[ResultEntry]> {
        self.player(player_index)
            .and_then(|player| player.get(category))
            .map(Vec::as_slice)
    }

    /// Check that a (player, category) target exists
    pub fn locate(&self, player_index: usize, category: &str) -> Result<(), StoreError> {
        let player = self
            .player(player_index)
            .ok_or(StoreError::UnknownPlayer(player_index))?;
        if player.contains(category) {
            Ok(())
        } else {
            Err(StoreError::UnknownCategory {
                player_index,
                category: category.to_string(),
            })
        }
    }

    /// Replace one player's entry for a category
    ///
    /// Only existing entries are replaced; every other player and category is
    /// left untouched.
    pub fn replace_entry(
        &mut self,
        player_index: usize,
        category: &str,
        values: Vec<ResultEntry>,
    ) -> Result<(), StoreError> {
        let player = self
            .players
            .get_mut(player_index)
            .ok_or(StoreError::UnknownPlayer(player_index))?;
        match player.get_mut(category) {
            Some(entry) => {
                *entry = values;
                Ok(())
            }
            None => Err(StoreError::UnknownCategory {
                player_index,
                category: category.to_string(),
            }),
        }
    }

    /// Give every player that has the category the same sequence
    ///
    /// Returns the indices of the players that were updated.
    pub fn broadcast(&mut self, category: &str, values: &[ResultEntry]) -> Vec<usize> {
        self.players
            .iter_mut()
            .enumerate()
            .filter_map(|(index, player)| {
                player.get_mut(category).map(|entry| {
                    *entry = values.to_vec();
                    index
                })
            })
            .collect()
    }
}
