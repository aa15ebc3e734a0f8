//! Challenge page routes
//!
//! Results come back as HTML for the page to insert; commands take and
//! return JSON.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Form, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::application::dto::GenerateForm;
use crate::application::ports::inbound::{CommandError, CommandOutcome, UiCommand};
use crate::application::services::render::html;
use crate::application::services::PageHandle;
use crate::domain::value_objects::PageId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn command_status(error: &CommandError) -> StatusCode {
    match error {
        CommandError::MissingData(_)
        | CommandError::NoResults
        | CommandError::InvalidTemplateName
        | CommandError::Page(_) => StatusCode::BAD_REQUEST,
        CommandError::ServerRejection(_) | CommandError::GenerationRejected(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CommandError::Network => StatusCode::BAD_GATEWAY,
    }
}

async fn find_page(state: &AppState, page_id: Uuid) -> Result<Arc<PageHandle>, StatusCode> {
    state
        .pages
        .get(&PageId::from_uuid(page_id))
        .await
        .ok_or(StatusCode::NOT_FOUND)
}

/// Open a new page and return its shell
pub async fn open_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = state.pages.open().await;
    Html(html::render_page_shell(&page.id()))
}

/// Run a full generation; failures render the error alert above the
/// results that are still on the page
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<Uuid>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let page = find_page(&state, page_id)
        .await
        .map_err(|status| (status, Html(String::new())))?;

    let form = GenerateForm::new(fields);
    match state.generation_service.generate(&page, &form).await {
        Ok(results) => Ok(Html(results)),
        Err(e) => {
            let markup = page.with(|ctx| {
                let mut markup = html::render_error_alert(ctx.page.errors());
                markup.push_str(&ctx.render_results());
                markup
            });
            Err((command_status(&e), Html(markup)))
        }
    }
}

/// Current results markup
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<Uuid>,
) -> Result<Html<String>, StatusCode> {
    let page = find_page(&state, page_id).await?;
    Ok(Html(page.with(|ctx| ctx.render_results())))
}

pub async fn run_command(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<Uuid>,
    Json(command): Json<UiCommand>,
) -> Result<Json<CommandOutcome>, ErrorResponse> {
    let page = find_page(&state, page_id)
        .await
        .map_err(|status| error_response(status, "Page not found"))?;

    state
        .commands
        .dispatch(&page, command)
        .await
        .map(Json)
        .map_err(|e| error_response(command_status(&e), e.to_string()))
}
