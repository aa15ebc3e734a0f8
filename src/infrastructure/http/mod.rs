//! HTTP routes

mod page_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all page routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(page_routes::open_page))
        .route("/ui/pages/{page_id}/generate", post(page_routes::generate))
        .route("/ui/pages/{page_id}/results", get(page_routes::get_results))
        .route("/ui/pages/{page_id}/commands", post(page_routes::run_command))
}
