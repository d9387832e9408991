use crate::error::CatalogError;
use crate::services::catalog::CatalogApi;
use crate::view::render::render;
use crate::view::state::{reduce, Action, Effect, RequestId, ViewState};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Owns the view state and runs the requests the reducer asks for.
///
/// Requests run as spawned tasks and report back over a channel; their
/// completions are applied through the same reducer as user actions. A
/// superseded request is aborted, and dropping the view aborts everything
/// still in flight.
pub struct SearchView<C> {
    catalog: Arc<C>,
    state: ViewState,
    completions_tx: mpsc::UnboundedSender<Action>,
    completions_rx: mpsc::UnboundedReceiver<Action>,
    search_task: Option<(RequestId, JoinHandle<()>)>,
    detail_task: Option<(RequestId, JoinHandle<()>)>,
}

impl<C> SearchView<C>
where
    C: CatalogApi + Send + Sync + 'static,
{
    pub fn new(catalog: Arc<C>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            state: ViewState::new(),
            completions_tx,
            completions_rx,
            search_task: None,
            detail_task: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn render(&self) -> String {
        render(&self.state)
    }

    pub fn has_pending(&self) -> bool {
        self.state.loading() || self.state.detail_loading()
    }

    pub fn edit_query(&mut self, text: impl Into<String>) {
        self.dispatch(Action::EditQuery(text.into()));
    }

    pub fn submit_search(&mut self) {
        self.dispatch(Action::SubmitSearch);
    }

    /// `index` is zero-based into the shown results.
    pub fn select_result(&mut self, index: usize) {
        self.dispatch(Action::SelectResult(index));
    }

    pub fn dismiss_detail(&mut self) {
        self.dispatch(Action::DismissDetail);
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Action::DismissError);
    }

    pub fn retry(&mut self) {
        self.dispatch(Action::Retry);
    }

    pub fn dispatch(&mut self, action: Action) {
        let (next, effects) = reduce(&self.state, action);
        self.state = next;

        for effect in effects {
            self.run_effect(effect);
        }
    }

    /// Waits for one request to finish and applies it. Returns `false` when
    /// nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if !self.has_pending() {
            return false;
        }

        match self.completions_rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Applies completions until no request is pending.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Search { request, query } => {
                info!("Searching for '{}'", query);
                let catalog = Arc::clone(&self.catalog);
                let tx = self.completions_tx.clone();
                let handle = tokio::spawn(async move {
                    let outcome = AssertUnwindSafe(catalog.search(&query))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|panic| Err(task_failure(panic)));
                    let _ = tx.send(Action::SearchCompleted { request, outcome });
                });
                self.search_task = Some((request, handle));
            }
            Effect::FetchDetail { request, key } => {
                info!("Fetching details for {}", key);
                let catalog = Arc::clone(&self.catalog);
                let tx = self.completions_tx.clone();
                let handle = tokio::spawn(async move {
                    let outcome = AssertUnwindSafe(catalog.book_detail(&key))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|panic| Err(task_failure(panic)));
                    let _ = tx.send(Action::DetailCompleted { request, outcome });
                });
                self.detail_task = Some((request, handle));
            }
            Effect::CancelSearch(request) => {
                if let Some((id, handle)) = self.search_task.take() {
                    if id == request {
                        debug!("Cancelling superseded search {}", id);
                        handle.abort();
                    } else {
                        self.search_task = Some((id, handle));
                    }
                }
            }
            Effect::CancelDetail(request) => {
                if let Some((id, handle)) = self.detail_task.take() {
                    if id == request {
                        debug!("Cancelling superseded detail request {}", id);
                        handle.abort();
                    } else {
                        self.detail_task = Some((id, handle));
                    }
                }
            }
            Effect::ReportFailure { context, message } => {
                error!("{} error: {}", context, message);
            }
        }
    }
}

/// A request that panics still has to complete, or the view would stay loading.
fn task_failure(panic: Box<dyn Any + Send>) -> CatalogError {
    let message = panic
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "request panicked".to_string());
    CatalogError::TaskFailed(message)
}

impl<C> Drop for SearchView<C> {
    fn drop(&mut self) {
        for (id, handle) in self.search_task.take().into_iter().chain(self.detail_task.take()) {
            if !handle.is_finished() {
                debug!("Aborting request {} on teardown", id);
                handle.abort();
            }
        }
    }
}
