//! Domain layer - Core page state with no I/O
//!
//! This layer contains:
//! - Entities: Result store, interactive controls
//! - Value Objects: Category rules, settings-panel state, identifiers
//! - Aggregates: The challenge page root

pub mod aggregates;
pub mod entities;
pub mod value_objects;
