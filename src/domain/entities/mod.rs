//! Domain entities - Core business objects

mod controls;
mod result_store;

pub use controls::{ControlId, ControlPanel};
pub use result_store::{PlayerResult, ResultEntry, ResultStore, StoreError};
