//! View state and the reducer that moves it between phases.
//!
//! `reduce` is the only way a [`ViewState`] changes. It never performs I/O;
//! instead it returns the [`Effect`]s the driver has to carry out (start or
//! cancel a request, report a failure). Request completions come back in as
//! [`Action`]s tagged with the id they were issued under, and completions for
//! anything but the currently pending request are discarded.

use crate::error::CatalogError;
use crate::models::book::{BookDetail, BookSummary};
use crate::utils::text::{normalize_query, strip_identifier_prefix};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No search has completed yet.
    Idle,
    Searching,
    ResultsShown,
    DetailShown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedRequest {
    Search { query: String },
    Detail { key: String },
}

/// Transient failure notice with enough context to re-issue the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub kind: &'static str,
    pub message: String,
    pub failed: FailedRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    id: RequestId,
    query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDetail {
    id: RequestId,
    key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub results: Vec<BookSummary>,
    pub selected: Option<BookDetail>,
    /// Set once any search has succeeded; separates "no results" from "not searched yet".
    pub searched: bool,
    pub error: Option<ErrorBanner>,
    pending_search: Option<PendingSearch>,
    pending_detail: Option<PendingDetail>,
    next_request: RequestId,
}

#[derive(Debug)]
pub enum Action {
    EditQuery(String),
    /// Submits the current query text.
    SubmitSearch,
    /// Zero-based position in the shown results.
    SelectResult(usize),
    DismissDetail,
    DismissError,
    Retry,
    SearchCompleted {
        request: RequestId,
        outcome: Result<Vec<BookSummary>, CatalogError>,
    },
    DetailCompleted {
        request: RequestId,
        outcome: Result<BookDetail, CatalogError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search { request: RequestId, query: String },
    FetchDetail { request: RequestId, key: String },
    CancelSearch(RequestId),
    CancelDetail(RequestId),
    ReportFailure { context: &'static str, message: String },
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.pending_search.is_some()
    }

    pub fn detail_loading(&self) -> bool {
        self.pending_detail.is_some()
    }

    pub fn pending_search_id(&self) -> Option<RequestId> {
        self.pending_search.as_ref().map(|pending| pending.id)
    }

    pub fn pending_detail_id(&self) -> Option<RequestId> {
        self.pending_detail.as_ref().map(|pending| pending.id)
    }

    pub fn phase(&self) -> Phase {
        if self.loading() {
            Phase::Searching
        } else if self.selected.is_some() {
            Phase::DetailShown
        } else if self.searched {
            Phase::ResultsShown
        } else {
            Phase::Idle
        }
    }

    fn issue_id(&mut self) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        id
    }

    fn begin_search(&mut self, query: String, effects: &mut Vec<Effect>) {
        if let Some(previous) = self.pending_search.take() {
            effects.push(Effect::CancelSearch(previous.id));
        }
        // The results a pending detail belongs to are about to be replaced.
        if let Some(previous) = self.pending_detail.take() {
            effects.push(Effect::CancelDetail(previous.id));
        }

        let id = self.issue_id();
        self.error = None;
        self.pending_search = Some(PendingSearch {
            id,
            query: query.clone(),
        });
        effects.push(Effect::Search { request: id, query });
    }

    fn begin_detail(&mut self, key: String, effects: &mut Vec<Effect>) {
        if let Some(previous) = self.pending_detail.take() {
            effects.push(Effect::CancelDetail(previous.id));
        }

        let id = self.issue_id();
        self.error = None;
        self.pending_detail = Some(PendingDetail {
            id,
            key: key.clone(),
        });
        effects.push(Effect::FetchDetail { request: id, key });
    }
}

pub fn reduce(state: &ViewState, action: Action) -> (ViewState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        Action::EditQuery(text) => {
            next.query = text;
        }

        Action::SubmitSearch => {
            if let Some(query) = normalize_query(&state.query) {
                next.begin_search(query, &mut effects);
            }
        }

        Action::SelectResult(index) => {
            if state.phase() == Phase::ResultsShown {
                if let Some(summary) = state.results.get(index) {
                    let key = strip_identifier_prefix(&summary.identifier);
                    if !key.is_empty() {
                        next.begin_detail(key.to_string(), &mut effects);
                    }
                }
            }
        }

        Action::DismissDetail => {
            next.selected = None;
        }

        Action::DismissError => {
            next.error = None;
        }

        Action::Retry => match state.error.as_ref().map(|banner| &banner.failed) {
            Some(FailedRequest::Search { query }) => {
                next.begin_search(query.clone(), &mut effects);
            }
            Some(FailedRequest::Detail { key }) if state.phase() == Phase::ResultsShown => {
                next.begin_detail(key.clone(), &mut effects);
            }
            _ => {}
        },

        Action::SearchCompleted { request, outcome } => {
            if state.pending_search_id() != Some(request) {
                return (next, effects);
            }
            let pending = next.pending_search.take();

            match outcome {
                Ok(books) => {
                    next.results = books;
                    next.selected = None;
                    next.searched = true;
                    next.error = None;
                }
                Err(e) => {
                    let query = pending.map(|p| p.query).unwrap_or_default();
                    effects.push(Effect::ReportFailure {
                        context: "Search",
                        message: e.to_string(),
                    });
                    next.error = Some(ErrorBanner {
                        kind: e.kind(),
                        message: e.to_string(),
                        failed: FailedRequest::Search { query },
                    });
                }
            }
        }

        Action::DetailCompleted { request, outcome } => {
            if state.pending_detail_id() != Some(request) {
                return (next, effects);
            }
            let pending = next.pending_detail.take();

            match outcome {
                Ok(detail) => {
                    next.selected = Some(detail);
                }
                Err(e) => {
                    let key = pending.map(|p| p.key).unwrap_or_default();
                    effects.push(Effect::ReportFailure {
                        context: "Details",
                        message: e.to_string(),
                    });
                    next.error = Some(ErrorBanner {
                        kind: e.kind(),
                        message: e.to_string(),
                        failed: FailedRequest::Detail { key },
                    });
                }
            }
        }
    }

    (next, effects)
}
