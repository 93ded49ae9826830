use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use storefront_cms::query::DEFAULT_LIMIT;
use storefront_core::{AppConfig, DocReference, ListingResult, Product};

use crate::error::ArchiveError;

/// Grace period before the loading indicator turns on.
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(500);

pub const DEFAULT_RELATION: &str = "products";

/// Called after each committed collection-mode result.
pub type ResultCallback = Arc<dyn Fn(&ListingResult<Product>) + Send + Sync>;

/// How an archive gets its documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PopulationMode {
    /// Query the collection endpoint page by page.
    #[default]
    Collection,
    /// Show a hand-picked list supplied up front.
    Selection,
}

impl PopulationMode {
    /// Parses the CMS block value (`collection` / `selection`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "collection" => Some(PopulationMode::Collection),
            "selection" => Some(PopulationMode::Selection),
            _ => None,
        }
    }
}

/// Everything a parent supplies to an archive, with defaults filled in.
#[derive(Clone)]
pub struct ArchiveConfig {
    pub relation_to: String,
    pub populate_by: PopulationMode,
    pub limit: u32,
    pub show_page_range: bool,
    pub loading_delay: Duration,
    /// Pre-resolved first page, rendered until the first fetch commits.
    pub populated_docs: Option<Vec<DocReference<Product>>>,
    pub populated_docs_total: Option<u64>,
    /// Hand-picked documents for [`PopulationMode::Selection`].
    pub selected_docs: Option<Vec<DocReference<Product>>>,
    pub on_result_change: Option<ResultCallback>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            relation_to: DEFAULT_RELATION.to_owned(),
            populate_by: PopulationMode::Collection,
            limit: DEFAULT_LIMIT,
            show_page_range: true,
            loading_delay: DEFAULT_LOADING_DELAY,
            populated_docs: None,
            populated_docs_total: None,
            selected_docs: None,
            on_result_change: None,
        }
    }
}

impl fmt::Debug for ArchiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveConfig")
            .field("relation_to", &self.relation_to)
            .field("populate_by", &self.populate_by)
            .field("limit", &self.limit)
            .field("show_page_range", &self.show_page_range)
            .field("loading_delay", &self.loading_delay)
            .field(
                "populated_docs",
                &self.populated_docs.as_ref().map(Vec::len),
            )
            .field("populated_docs_total", &self.populated_docs_total)
            .field("selected_docs", &self.selected_docs.as_ref().map(Vec::len))
            .field(
                "on_result_change",
                &self.on_result_change.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl ArchiveConfig {
    /// Defaults with the page size and loading delay taken from app config.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            limit: config.archive_limit,
            loading_delay: Duration::from_millis(config.loading_delay_ms),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_relation(mut self, relation_to: &str) -> Self {
        relation_to.clone_into(&mut self.relation_to);
        self
    }

    #[must_use]
    pub fn with_populate_by(mut self, populate_by: PopulationMode) -> Self {
        self.populate_by = populate_by;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_show_page_range(mut self, show: bool) -> Self {
        self.show_page_range = show;
        self
    }

    #[must_use]
    pub fn with_loading_delay(mut self, delay: Duration) -> Self {
        self.loading_delay = delay;
        self
    }

    #[must_use]
    pub fn with_populated_docs(mut self, docs: Vec<DocReference<Product>>, total: u64) -> Self {
        self.populated_docs = Some(docs);
        self.populated_docs_total = Some(total);
        self
    }

    #[must_use]
    pub fn with_selected_docs(mut self, docs: Vec<DocReference<Product>>) -> Self {
        self.selected_docs = Some(docs);
        self
    }

    #[must_use]
    pub fn with_on_result_change(mut self, callback: ResultCallback) -> Self {
        self.on_result_change = Some(callback);
        self
    }

    /// Checks the invariants the controller relies on.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::InvalidLimit`] when `limit` is zero.
    /// - [`ArchiveError::EmptyRelation`] when `relation_to` is blank.
    pub fn validate(&self) -> Result<(), ArchiveError> {
        if self.limit == 0 {
            return Err(ArchiveError::InvalidLimit);
        }
        if self.relation_to.trim().is_empty() {
            return Err(ArchiveError::EmptyRelation);
        }
        Ok(())
    }

    /// `true` when results come from the selection list instead of a fetch.
    #[must_use]
    pub(crate) fn serves_selection(&self) -> bool {
        self.populate_by == PopulationMode::Selection && self.selected_docs.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_archive_block_defaults() {
        let config = ArchiveConfig::default();
        assert_eq!(config.relation_to, "products");
        assert_eq!(config.populate_by, PopulationMode::Collection);
        assert_eq!(config.limit, 10);
        assert!(config.show_page_range);
        assert_eq!(config.loading_delay, Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = ArchiveConfig::default().with_limit(0);
        assert_eq!(config.validate(), Err(ArchiveError::InvalidLimit));
    }

    #[test]
    fn blank_relation_is_rejected() {
        let config = ArchiveConfig::default().with_relation("  ");
        assert_eq!(config.validate(), Err(ArchiveError::EmptyRelation));
    }

    #[test]
    fn selection_without_docs_falls_back_to_collection() {
        let config = ArchiveConfig::default().with_populate_by(PopulationMode::Selection);
        assert!(!config.serves_selection());
        let config = config.with_selected_docs(Vec::new());
        assert!(config.serves_selection());
    }

    #[test]
    fn population_mode_parses_block_values() {
        assert_eq!(PopulationMode::parse("collection"), Some(PopulationMode::Collection));
        assert_eq!(PopulationMode::parse("selection"), Some(PopulationMode::Selection));
        assert_eq!(PopulationMode::parse("manual"), None);
    }

    #[test]
    fn debug_output_hides_callback() {
        let config = ArchiveConfig::default().with_on_result_change(Arc::new(|_| {}));
        let debug = format!("{config:?}");
        assert!(debug.contains("<callback>"));
    }
}
