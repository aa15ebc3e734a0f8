//! Render engine - projects page state into HTML
//!
//! The view tree is kept per page so rerolls can patch one block and return
//! just that fragment.

pub mod clipboard;
pub mod html;
pub mod view;

pub use view::{column_class, CategoryBlock, PlayerCard, ResultsView, ValueItem};
