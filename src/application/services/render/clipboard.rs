//! Plain-text export of the rendered results

use super::view::ResultsView;

/// Text placed on the clipboard by "Copy All"
///
/// Descriptions are included whether or not they are currently shown.
pub fn copy_text(view: &ResultsView) -> String {
    let mut text = String::from("Generated Challenge:\n");
    for card in &view.cards {
        text.push_str(&format!("\n--- Player {} ---\n", card.player_number()));
        for block in &card.categories {
            text.push_str(&format!("{}:\n", block.category.trim()));
            for item in &block.values {
                match item.description.as_deref().map(str::trim) {
                    Some(description) if !description.is_empty() => {
                        text.push_str(&format!("  - {}: {}\n", item.value.trim(), description))
                    }
                    _ => text.push_str(&format!("  - {}\n", item.value.trim())),
                }
            }
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::ChallengePage;
    use crate::domain::entities::{ResultEntry, ResultStore};
    use crate::domain::value_objects::{CategoryRule, GenerationConfig};

    #[test]
    fn test_copy_text_format() {
        let config: GenerationConfig = [("Champion", CategoryRule::random_from_category(2))]
            .into_iter()
            .collect();
        let results = ResultStore::new(vec![
            [(
                "Champion",
                vec![
                    ResultEntry::new("Ashe").with_description("Archer"),
                    ResultEntry::new("Lux"),
                ],
            )]
            .into_iter()
            .collect(),
            [("Champion", vec![ResultEntry::new("Zed")])].into_iter().collect(),
        ]);
        let mut page = ChallengePage::new();
        page.apply_generation(config, results, true);

        let text = copy_text(&ResultsView::build(&page));

        assert_eq!(
            text,
            "Generated Challenge:\n\n--- Player 1 ---\nChampion:\n  - Ashe: Archer\n  - Lux\n\n--- Player 2 ---\nChampion:\n  - Zed"
        );
    }
}
