//! Shared category/sort filters.
//!
//! A [`FilterContext`] is owned by whatever drives the filter UI. Archives
//! only read it: they take a snapshot with [`FilterSource::current`] and
//! react to changes through the `watch` receiver from [`FilterSource::subscribe`].

use storefront_cms::CategoryFilter;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category_filters: CategoryFilter,
    pub sort: Option<String>,
}

impl FilterState {
    #[must_use]
    pub fn new(category_filters: CategoryFilter, sort: Option<&str>) -> Self {
        Self {
            category_filters,
            sort: sort.filter(|s| !s.is_empty()).map(str::to_owned),
        }
    }
}

/// Read-only access to the current filters.
pub trait FilterSource {
    fn current(&self) -> FilterState;
    fn subscribe(&self) -> watch::Receiver<FilterState>;
}

/// Owner of the shared filter state.
#[derive(Debug)]
pub struct FilterContext {
    tx: watch::Sender<FilterState>,
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

impl FilterContext {
    #[must_use]
    pub fn new(initial: FilterState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn set_categories(&self, categories: CategoryFilter) {
        self.update(|state| state.category_filters = categories);
    }

    pub fn set_sort(&self, sort: Option<&str>) {
        let sort = sort.filter(|s| !s.is_empty()).map(str::to_owned);
        self.update(|state| state.sort = sort);
    }

    /// Applies `f`; subscribers are notified only if the state actually changed.
    pub fn update(&self, f: impl FnOnce(&mut FilterState)) {
        self.tx.send_if_modified(|state| {
            let before = state.clone();
            f(state);
            *state != before
        });
    }
}

impl FilterSource for FilterContext {
    fn current(&self) -> FilterState {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }
}
