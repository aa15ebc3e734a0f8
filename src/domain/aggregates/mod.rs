//! Aggregates - Cluster of domain objects treated as a single unit

pub mod challenge_page;

pub use challenge_page::{ChallengePage, PageError, SaveDialog};
