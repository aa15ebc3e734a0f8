//! View tree - the projection of a page's results
//!
//! This is what the browser shows: one card per player, one block per
//! category, one item per value. Rerolls patch a single block's values in
//! place; everything else is rebuilt only by a full generation.

use crate::domain::aggregates::ChallengePage;
use crate::domain::entities::ResultEntry;
use crate::domain::value_objects::GenerationConfig;

/// Bootstrap grid classes for a result card, by number of players
pub fn column_class(player_count: usize) -> &'static str {
    match player_count {
        1 => "col-lg-12",
        2 => "col-lg-6 col-md-6",
        3 => "col-lg-4 col-md-6",
        _ => "col-lg-3 col-md-4 col-sm-6",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueItem {
    pub value: String,
    pub description: Option<String>,
    pub description_visible: bool,
}

impl ValueItem {
    fn from_entry(entry: &ResultEntry, descriptions_visible: bool) -> Self {
        Self {
            value: entry.value.clone(),
            description: entry.description.clone(),
            description_visible: descriptions_visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBlock {
    pub category: String,
    /// Per-player reroll button; only for categories that are not shared
    pub can_reroll: bool,
    /// Reroll-for-everyone button
    pub can_reroll_all: bool,
    pub values: Vec<ValueItem>,
}

impl CategoryBlock {
    fn new(category: &str, config: &GenerationConfig) -> Self {
        let rule = config.get(category);
        Self {
            category: category.to_string(),
            can_reroll: rule.is_some_and(|rule| !rule.is_shared()),
            can_reroll_all: rule.is_some(),
            values: Vec::new(),
        }
    }

    /// Clear the list, then repopulate it
    pub fn set_values(&mut self, entries: &[ResultEntry], descriptions_visible: bool) {
        self.values.clear();
        self.values.extend(
            entries
                .iter()
                .map(|entry| ValueItem::from_entry(entry, descriptions_visible)),
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub player_index: usize,
    pub column_class: &'static str,
    pub categories: Vec<CategoryBlock>,
}

impl PlayerCard {
    /// 1-based number shown in the card title
    pub fn player_number(&self) -> usize {
        self.player_index + 1
    }

    pub fn block(&self, category: &str) -> Option<&CategoryBlock> {
        self.categories.iter().find(|block| block.category == category)
    }

    fn block_mut(&mut self, category: &str) -> Option<&mut CategoryBlock> {
        self.categories
            .iter_mut()
            .find(|block| block.category == category)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    /// Offer "Save as Template"
    pub is_custom: bool,
    pub descriptions_visible: bool,
    pub cards: Vec<PlayerCard>,
}

impl ResultsView {
    /// Full render of a page's current results
    ///
    /// Descriptions follow the page's toggle; right after a generation that
    /// means hidden.
    pub fn build(page: &ChallengePage) -> Self {
        let results = page.results();
        let column_class = column_class(results.len());
        let visible = page.descriptions_visible();

        let cards = results
            .players()
            .iter()
            .enumerate()
            .map(|(player_index, player)| PlayerCard {
                player_index,
                column_class,
                categories: player
                    .iter()
                    .map(|(category, entries)| {
                        let mut block = CategoryBlock::new(category, page.config());
                        block.set_values(entries, visible);
                        block
                    })
                    .collect(),
            })
            .collect();

        Self {
            is_custom: page.is_custom(),
            descriptions_visible: visible,
            cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, player_index: usize) -> Option<&PlayerCard> {
        self.cards.iter().find(|card| card.player_index == player_index)
    }

    pub fn block(&self, player_index: usize, category: &str) -> Option<&CategoryBlock> {
        self.card(player_index).and_then(|card| card.block(category))
    }

    /// Replace the values list of one block, leaving sibling blocks alone
    ///
    /// Returns `None` when the page shows no such block.
    pub fn refresh_category(
        &mut self,
        player_index: usize,
        category: &str,
        entries: &[ResultEntry],
    ) -> Option<&CategoryBlock> {
        let visible = self.descriptions_visible;
        let block = self
            .cards
            .iter_mut()
            .find(|card| card.player_index == player_index)?
            .block_mut(category)?;
        block.set_values(entries, visible);
        Some(block)
    }

    /// Apply the global description toggle to every rendered item
    pub fn set_descriptions_visible(&mut self, visible: bool) {
        self.descriptions_visible = visible;
        for card in &mut self.cards {
            for block in &mut card.categories {
                for item in &mut block.values {
                    item.description_visible = visible;
                }
            }
        }
    }
}
