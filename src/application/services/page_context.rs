//! Page context - the state owned by one page load
//!
//! All access goes through [`PageHandle::with`], which takes the lock for the
//! duration of a synchronous closure. Services therefore never hold page
//! state across an `.await`; between two suspension points they see and
//! leave a consistent page.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::application::dto::GeneratedChallenge;
use crate::application::ports::inbound::RenderedFragment;
use crate::domain::aggregates::ChallengePage;
use crate::domain::entities::{ControlId, ResultEntry};
use crate::domain::value_objects::PageId;

use super::render::{html, ResultsView};

/// Page state plus its rendered projection
#[derive(Debug, Default)]
pub struct PageContext {
    pub page: ChallengePage,
    pub view: ResultsView,
}

impl PageContext {
    /// Install a fresh generation and redraw everything
    pub fn apply_generation(&mut self, generated: GeneratedChallenge) {
        self.page
            .apply_generation(generated.config, generated.results, generated.is_custom);
        self.view = ResultsView::build(&self.page);
    }

    /// Store one player's new values and re-render that block
    pub fn apply_single(
        &mut self,
        player_index: usize,
        category: &str,
        values: Vec<ResultEntry>,
    ) -> Vec<RenderedFragment> {
        if let Err(e) = self.page.replace_entry(player_index, category, values.clone()) {
            warn!("Discarding reroll result: {}", e);
            return Vec::new();
        }
        self.refresh(player_index, category, &values).into_iter().collect()
    }

    /// Store the same values for every player and re-render their blocks
    pub fn apply_broadcast(
        &mut self,
        category: &str,
        values: &[ResultEntry],
    ) -> Vec<RenderedFragment> {
        let updated = self.page.broadcast(category, values);
        if updated.len() < self.page.results().len() {
            debug!(
                "Category '{}' present for {} of {} players",
                category,
                updated.len(),
                self.page.results().len()
            );
        }
        updated
            .into_iter()
            .filter_map(|player_index| self.refresh(player_index, category, values))
            .collect()
    }

    fn refresh(
        &mut self,
        player_index: usize,
        category: &str,
        values: &[ResultEntry],
    ) -> Option<RenderedFragment> {
        let block = self.view.refresh_category(player_index, category, values)?;
        Some(RenderedFragment {
            player_index,
            category: category.to_string(),
            html: html::render_values_list(block, true),
        })
    }

    /// Full results markup
    pub fn render_results(&self) -> String {
        html::render_results(&self.view, self.page.controls())
    }
}

/// Shared handle to one page's state
#[derive(Debug)]
pub struct PageHandle {
    id: PageId,
    last_access: Mutex<DateTime<Utc>>,
    state: Mutex<PageContext>,
}

impl PageHandle {
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            last_access: Mutex::new(Utc::now()),
            state: Mutex::new(PageContext::default()),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn last_access(&self) -> DateTime<Utc> {
        *self.last_access.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark the page as just used
    pub fn touch(&self) {
        *self.last_access.lock().unwrap_or_else(PoisonError::into_inner) = Utc::now();
    }

    /// Run `f` with exclusive access to the page
    pub fn with<R>(&self, f: impl FnOnce(&mut PageContext) -> R) -> R {
        // A panic inside an earlier closure must not lock the page forever
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Disable a control until the returned guard is dropped
    pub fn busy(self: &Arc<Self>, control: ControlId) -> BusyControl {
        self.with(|ctx| ctx.page.acquire_control(control.clone()));
        BusyControl {
            page: Arc::clone(self),
            control,
        }
    }
}

/// Keeps a control disabled while a request is pending
///
/// Dropping the guard re-enables the control, whether the request succeeded,
/// failed, or its future was dropped.
#[must_use = "the control is released as soon as the guard is dropped"]
pub struct BusyControl {
    page: Arc<PageHandle>,
    control: ControlId,
}

impl BusyControl {
    pub fn control(&self) -> &ControlId {
        &self.control
    }
}

impl Drop for BusyControl {
    fn drop(&mut self) {
        self.page
            .with(|ctx| ctx.page.release_control(&self.control));
    }
}
