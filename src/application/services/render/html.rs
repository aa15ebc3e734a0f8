//! HTML rendering of the view tree
//!
//! Produces the results container for a full render and the values list for
//! a fragment render. Markup matches the page's Bootstrap template.

use crate::domain::entities::{ControlId, ControlPanel};
use crate::domain::value_objects::PageId;

use super::view::{CategoryBlock, PlayerCard, ResultsView, ValueItem};

const SPINNER: &str = r#"<span class="spinner-border spinner-border-sm"></span>"#;
const REROLL_ICON: &str = r#"<i class="bi bi-arrow-repeat"></i>"#;
const REROLL_ALL_ICON: &str = r#"<i class="bi bi-arrow-clockwise"></i>"#;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Label of the description toggle for a given state
pub fn toggle_label(descriptions_visible: bool) -> &'static str {
    if descriptions_visible {
        "Hide Descriptions"
    } else {
        "Show Descriptions"
    }
}

/// Full render: the whole results container
pub fn render_results(view: &ResultsView, controls: &ControlPanel) -> String {
    if view.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    html.push_str(
        r#"<div class="challenge-results-container border rounded p-4 bg-white shadow-sm mt-5">"#,
    );
    html.push_str(r#"<div class="d-flex justify-content-between align-items-center mb-3">"#);
    html.push_str(r#"<h2 class="mb-0">Generation Results:</h2><div>"#);

    if view.is_custom {
        html.push_str(
            r#"<button id="save-as-template-btn" class="btn btn-success btn-sm me-2"><i class="bi bi-save"></i> Save as Template</button>"#,
        );
    }

    let (expanded, eye) = if view.descriptions_visible {
        (" expanded", "bi-eye")
    } else {
        ("", "bi-eye-slash")
    };
    html.push_str(&format!(
        r#"<button id="toggle-all-descriptions" class="btn btn-info btn-sm me-2{}"><i class="bi {}"></i> {}</button>"#,
        expanded,
        eye,
        toggle_label(view.descriptions_visible)
    ));
    html.push_str(
        r#"<button id="copy-all-btn" class="btn btn-secondary btn-sm"><i class="bi bi-clipboard"></i> Copy All</button>"#,
    );
    html.push_str("</div></div>");

    html.push_str(r#"<div class="row g-4" id="results-area">"#);
    for card in &view.cards {
        html.push_str(&render_card(card, controls));
    }
    html.push_str("</div></div>");
    html
}

fn render_card(card: &PlayerCard, controls: &ControlPanel) -> String {
    let mut html = format!(
        r#"<div class="player-card {}" data-player-index="{}"><div class="card h-100 shadow-sm">"#,
        card.column_class, card.player_index
    );
    html.push_str(&format!(
        r#"<div class="card-header"><h5 class="mb-0">Player <span class="player-number">{}</span></h5></div>"#,
        card.player_number()
    ));
    html.push_str(r#"<div class="card-body"><div class="categories-list">"#);
    for block in &card.categories {
        html.push_str(&render_category_block(block, card.player_index, controls));
    }
    html.push_str("</div></div></div></div>");
    html
}

/// One category block with its buttons and values
pub fn render_category_block(
    block: &CategoryBlock,
    player_index: usize,
    controls: &ControlPanel,
) -> String {
    let category = escape(&block.category);
    let mut html = format!(
        r#"<div class="result-category mb-2" data-category="{}"><strong class="category-name">{}:</strong>"#,
        category, category
    );

    if block.can_reroll {
        let control = ControlId::Reroll {
            category: block.category.clone(),
            player_index,
        };
        html.push_str(&render_button(
            "reroll-button",
            &format!(
                r#" data-category-name="{}" data-player-index="{}""#,
                category, player_index
            ),
            "Reroll for this player",
            REROLL_ICON,
            controls.is_busy(&control),
        ));
    }

    if block.can_reroll_all {
        let control = ControlId::RerollAll {
            category: block.category.clone(),
        };
        html.push_str(&render_button(
            "reroll-all-button",
            &format!(r#" data-category-name="{}""#, category),
            "Reroll for all players",
            REROLL_ALL_ICON,
            controls.is_busy(&control),
        ));
    }

    html.push_str(&render_values_list(block, false));
    html.push_str("</div>");
    html
}

fn render_button(class: &str, data: &str, title: &str, icon: &str, busy: bool) -> String {
    format!(
        r#"<button type="button" class="btn btn-outline-secondary btn-sm ms-1 {}"{} title="{}"{}>{}</button>"#,
        class,
        data,
        title,
        if busy { " disabled" } else { "" },
        if busy { SPINNER } else { icon }
    )
}

/// The values list of one block
///
/// `highlight` marks a list that was just replaced by a reroll; full renders
/// never carry it.
pub fn render_values_list(block: &CategoryBlock, highlight: bool) -> String {
    let mut html = String::from(r#"<ul class="category-values-list list-unstyled ms-3 mb-0"#);
    if highlight {
        html.push_str(" new-item-highlight");
    }
    html.push_str(r#"">"#);
    for item in &block.values {
        html.push_str(&render_value_item(item));
    }
    html.push_str("</ul>");
    html
}

fn render_value_item(item: &ValueItem) -> String {
    let mut html = format!(
        r#"<li class="result-item"><span>{}</span>"#,
        escape(&item.value)
    );
    if let Some(description) = &item.description {
        html.push_str(&format!(
            r#"<span class="value-description text-muted fst-italic ms-1 toggleable-description" style="display: {};"> - {}</span>"#,
            if item.description_visible { "inline" } else { "none" },
            escape(description)
        ));
    }
    html.push_str("</li>");
    html
}

/// Alert listing the problems of a failed generation
pub fn render_error_alert(errors: &[String]) -> String {
    let mut html = String::from(
        r#"<div class="alert alert-danger alert-dismissible fade show" role="alert">"#,
    );
    html.push_str(r#"<strong>Problems occurred during generation:</strong><ul class="mb-0">"#);
    for error in errors {
        html.push_str(&format!("<li>{}</li>", escape(error)));
    }
    html.push_str(
        r#"</ul><button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#,
    );
    html
}

/// Minimal page shell; the form and dialog markup come from the page template
pub fn render_page_shell(page_id: &PageId) -> String {
    let mut html = String::from("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Challenge Generator</title></head><body>");
    html.push_str(&format!(
        r#"<main class="container" data-page-id="{}">"#,
        page_id
    ));
    html.push_str(r#"<div id="results-placeholder"></div>"#);
    html.push_str("</main></body></html>");
    html
}
