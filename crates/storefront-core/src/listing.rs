//! Paginated listing envelope returned by the CMS collection endpoints.

use serde::{Deserialize, Serialize};

use crate::documents::Product;

/// One page of a collection listing.
///
/// `next_page` / `prev_page` are `null` on the wire when there is no such page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult<T = Product> {
    pub total_docs: u64,
    pub docs: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub prev_page: Option<u32>,
}

impl<T> ListingResult<T> {
    /// A single page holding `docs`, with `total_docs` counted separately.
    ///
    /// Used for pre-resolved and hand-picked lists, where the intended item
    /// count can exceed the number of documents actually available.
    #[must_use]
    pub fn single_page(docs: Vec<T>, total_docs: u64) -> Self {
        Self {
            total_docs,
            docs,
            page: 1,
            total_pages: 1,
            has_prev_page: false,
            has_next_page: false,
            next_page: None,
            prev_page: None,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::single_page(Vec::new(), 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<T> Default for ListingResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}
