//! Archive state machine.
//!
//! Every change to a dependency (page, filters, limit, selection, population
//! mode, result callback) starts a new *run*. A run either derives its result
//! synchronously from the selection list or fetches one page from the
//! [`ListingSource`].
//!
//! Runs are numbered from a counter that only increases. Starting a run
//! aborts the previous run's loading timer and invalidates its fetch: the
//! fetch is not cancelled, but its result is dropped on arrival because its
//! number is no longer the one in flight. The run started last wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_cms::query::ARCHIVE_DEPTH;
use storefront_cms::{CmsError, ListingQuery};
use storefront_core::documents::resolved_docs;
use storefront_core::{DocReference, ListingResult, Product};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::{ArchiveConfig, PopulationMode, ResultCallback};
use crate::error::ArchiveError;
use crate::filter::{FilterSource, FilterState};
use crate::page_range::PageRange;
use crate::source::ListingSource;
use crate::view::{ArchiveView, Grid, PaginationView};

/// User-facing message for a failed fetch of `relation`.
#[must_use]
pub fn load_error_message(relation: &str) -> String {
    format!("Unable to load \"{relation} archive\" data at this time.")
}

/// Point-in-time copy of an archive's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveSnapshot {
    pub results: ListingResult<Product>,
    pub page: u32,
    pub is_loading: bool,
    pub error: Option<String>,
}

struct ControllerState {
    config: ArchiveConfig,
    filters: FilterState,
    page: u32,
    results: ListingResult<Product>,
    is_loading: bool,
    error: Option<String>,
    /// Number of the most recently started run.
    seq: u64,
    /// Run whose fetch is awaited, if any.
    in_flight: Option<u64>,
    loading_timer: Option<JoinHandle<()>>,
    mounted: bool,
}

impl ControllerState {
    fn cancel_loading_timer(&mut self) {
        if let Some(timer) = self.loading_timer.take() {
            timer.abort();
        }
    }
}

struct Shared<S> {
    source: Arc<S>,
    state: Mutex<ControllerState>,
    /// Highest run number that has resolved (or been abandoned).
    settled_tx: watch::Sender<u64>,
}

impl<S: ListingSource> Shared<S> {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` and starts a new run if it reports a change while mounted.
    fn update(self: &Arc<Self>, f: impl FnOnce(&mut ControllerState) -> bool) {
        let rerun = {
            let mut state = self.lock();
            f(&mut *state) && state.mounted
        };
        if rerun {
            self.start_run();
        }
    }

    fn start_run(self: &Arc<Self>) {
        let mut state = self.lock();
        // `update` releases the lock before calling here; an `unmount` may
        // have slipped in between.
        if !state.mounted {
            return;
        }
        state.cancel_loading_timer();
        state.seq += 1;
        let seq = state.seq;

        if state.config.serves_selection() {
            let selected = state.config.selected_docs.as_deref().unwrap_or_default();
            let total = selected.len() as u64;
            let docs = resolved_docs(selected);
            tracing::debug!(
                seq,
                selected = total,
                resolved = docs.len(),
                "archive populated from selection"
            );
            state.results = ListingResult::single_page(docs, total);
            state.is_loading = false;
            state.in_flight = None;
            drop(state);
            self.settled_tx.send_replace(seq);
            return;
        }

        let relation = state.config.relation_to.clone();
        let query = ListingQuery {
            sort: state.filters.sort.clone(),
            categories: state.filters.category_filters.clone(),
            limit: state.config.limit,
            page: state.page,
            depth: ARCHIVE_DEPTH,
        };
        state.in_flight = Some(seq);

        let delay = state.config.loading_delay;
        let timer_shared = Arc::clone(self);
        state.loading_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = timer_shared.lock();
            if state.in_flight == Some(seq) {
                state.is_loading = true;
            }
        }));
        drop(state);

        tracing::debug!(seq, relation = %relation, page = query.page, "archive fetch started");
        let fetch_shared = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = fetch_shared.source.fetch_page(&relation, &query).await;
            fetch_shared.resolve(seq, &relation, outcome);
        });
    }

    fn resolve(
        &self,
        seq: u64,
        relation: &str,
        outcome: Result<ListingResult<Product>, CmsError>,
    ) {
        let mut state = self.lock();
        if state.in_flight != Some(seq) {
            tracing::debug!(seq, current = state.seq, "dropping superseded archive result");
            return;
        }
        state.in_flight = None;
        state.cancel_loading_timer();
        state.is_loading = false;

        let mut notify: Option<(ResultCallback, ListingResult<Product>)> = None;
        match outcome {
            Ok(listing) => {
                tracing::debug!(
                    seq,
                    relation,
                    page = listing.page,
                    total_docs = listing.total_docs,
                    "archive result committed"
                );
                state.error = None;
                if let Some(callback) = state.config.on_result_change.clone() {
                    notify = Some((callback, listing.clone()));
                }
                state.results = listing;
            }
            Err(e) if e.is_malformed_listing() => {
                tracing::warn!(seq, relation, error = %e, "ignoring malformed archive payload");
            }
            Err(e) => {
                tracing::warn!(seq, relation, error = %e, "archive fetch failed");
                state.error = Some(load_error_message(relation));
            }
        }
        drop(state);

        if let Some((callback, listing)) = notify {
            callback(&listing);
        }
        self.settled_tx.send_replace(seq);
    }
}

/// Keeps a collection archive's listing current.
///
/// Methods that change a dependency must be called from within a Tokio
/// runtime once the controller is mounted, since they may spawn the fetch.
pub struct ArchiveController<S: ListingSource> {
    shared: Arc<Shared<S>>,
    filter_task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: ListingSource> ArchiveController<S> {
    /// Validates `config` and seeds the initial state from its pre-resolved
    /// or selected documents. Nothing is fetched until [`Self::mount`].
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] if `config` fails validation.
    pub fn new(source: Arc<S>, config: ArchiveConfig) -> Result<Self, ArchiveError> {
        config.validate()?;

        let docs = match (&config.populated_docs, &config.selected_docs) {
            (Some(populated), _) => resolved_docs(populated),
            (None, Some(selected)) => resolved_docs(selected),
            (None, None) => Vec::new(),
        };
        let results = ListingResult::single_page(docs, config.populated_docs_total.unwrap_or(0));

        let state = ControllerState {
            config,
            filters: FilterState::default(),
            page: 1,
            results,
            is_loading: false,
            error: None,
            seq: 0,
            in_flight: None,
            loading_timer: None,
            mounted: false,
        };
        let (settled_tx, _rx) = watch::channel(0);

        Ok(Self {
            shared: Arc::new(Shared {
                source,
                state: Mutex::new(state),
                settled_tx,
            }),
            filter_task: Mutex::new(None),
        })
    }

    /// Starts the first run with the current filters and follows later
    /// filter changes.
    pub fn mount<F: FilterSource + ?Sized>(&self, filters: &F) {
        let mut rx = filters.subscribe();
        let initial = rx.borrow_and_update().clone();
        {
            let mut state = self.shared.lock();
            state.filters = initial;
            state.mounted = true;
        }
        self.shared.start_run();

        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                shared.update(|state| replace_if_changed(&mut state.filters, next));
            }
        });
        let previous = self
            .filter_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Stops following filters, cancels the loading timer and drops any
    /// in-flight result.
    pub fn unmount(&self) {
        if let Some(task) = self
            .filter_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
        let seq = {
            let mut state = self.shared.lock();
            state.mounted = false;
            state.in_flight = None;
            state.cancel_loading_timer();
            state.seq
        };
        self.shared.settled_tx.send_replace(seq);
    }

    /// Navigates to `page` (pages are 1-based; 0 is treated as 1).
    pub fn set_page(&self, page: u32) {
        let page = page.max(1);
        self.shared
            .update(|state| replace_if_changed(&mut state.page, page));
    }

    pub fn set_filters(&self, filters: FilterState) {
        self.shared
            .update(|state| replace_if_changed(&mut state.filters, filters));
    }

    /// Changes the page size.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidLimit`] for a zero limit; state is unchanged.
    pub fn set_limit(&self, limit: u32) -> Result<(), ArchiveError> {
        if limit == 0 {
            return Err(ArchiveError::InvalidLimit);
        }
        self.shared
            .update(|state| replace_if_changed(&mut state.config.limit, limit));
        Ok(())
    }

    pub fn set_selected_docs(&self, docs: Option<Vec<DocReference<Product>>>) {
        self.shared
            .update(|state| replace_if_changed(&mut state.config.selected_docs, docs));
    }

    pub fn set_populate_by(&self, mode: PopulationMode) {
        self.shared
            .update(|state| replace_if_changed(&mut state.config.populate_by, mode));
    }

    /// Replaces the result callback. A different callback instance counts
    /// as a change even if it behaves the same.
    pub fn set_on_result_change(&self, callback: Option<ResultCallback>) {
        self.shared.update(|state| {
            let same = match (&state.config.on_result_change, &callback) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            state.config.on_result_change = callback;
            !same
        });
    }

    /// Resolves once the most recently started run has finished.
    ///
    /// Yields once first so a filter change already published to the
    /// [`FilterSource`] can start its run. On a multi-threaded runtime the
    /// follow task may still be scheduled later, in which case that run is
    /// not waited for.
    pub async fn settled(&self) {
        tokio::task::yield_now().await;
        let mut rx = self.shared.settled_tx.subscribe();
        let target = self.shared.lock().seq;
        // The sender lives as long as `self`, so this cannot close early.
        let _ = rx.wait_for(|settled| *settled >= target).await;
    }

    #[must_use]
    pub fn snapshot(&self) -> ArchiveSnapshot {
        let state = self.shared.lock();
        ArchiveSnapshot {
            results: state.results.clone(),
            page: state.page,
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    #[must_use]
    pub fn render(&self) -> ArchiveView {
        let state = self.shared.lock();
        let config = &state.config;
        let results = &state.results;

        ArchiveView {
            is_loading: state.is_loading,
            error: if state.is_loading {
                None
            } else {
                state.error.clone()
            },
            page_range: config.show_page_range.then(|| {
                PageRange::compute(
                    results.total_docs,
                    results.page,
                    &config.relation_to,
                    config.limit,
                )
            }),
            grid: Grid::from_docs(&config.relation_to, &results.docs),
            pagination: PaginationView::for_results(results.page, results.total_pages),
        }
    }
}

impl<S: ListingSource> Drop for ArchiveController<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, next: T) -> bool {
    if *slot == next {
        false
    } else {
        *slot = next;
        true
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
